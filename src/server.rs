//! HTTP API for the portfolio site.
//!
//! `GET /api/github/repos` exposes the raw fetcher; the remaining routes serve
//! the aggregated, localized views the page renders.

use crate::config::Config;
use crate::github::{
    is_valid_repo_type, is_valid_sort, FetchError, GithubClient, RepoListOptions, DEFAULT_PER_PAGE,
    DEFAULT_REPO_TYPE, DEFAULT_SORT, MAX_PER_PAGE,
};
use crate::i18n::{switch_locale_path, Language, TranslationCatalog};
use crate::projects::ProjectRecord;
use crate::theme::{resolve_theme, Theme};
use crate::view::{load_projects, ProjectDetail, ProjectFeed};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    github: GithubClient,
    started: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let github = GithubClient::new(&config);
        Self {
            config: Arc::new(config),
            github,
            started: Instant::now(),
        }
    }
}

// ==================== Query Parsing ====================

#[derive(Debug, Default, Deserialize)]
struct RepoQuery {
    username: Option<String>,
    sort: Option<String>,
    per_page: Option<String>,
    #[serde(rename = "type")]
    repo_type: Option<String>,
    include_private: Option<String>,
    include_archived: Option<String>,
    include_forks: Option<String>,
}

impl RepoQuery {
    /// Unknown `sort` and `type` values fall back to their defaults.
    fn options(&self) -> RepoListOptions {
        RepoListOptions {
            sort: self
                .sort
                .as_deref()
                .filter(|s| is_valid_sort(s))
                .unwrap_or(DEFAULT_SORT)
                .to_string(),
            per_page: parse_per_page(self.per_page.as_deref()),
            repo_type: self
                .repo_type
                .as_deref()
                .filter(|t| is_valid_repo_type(t))
                .unwrap_or(DEFAULT_REPO_TYPE)
                .to_string(),
            include_private: is_true(self.include_private.as_deref()),
            include_archived: is_true(self.include_archived.as_deref()),
            include_forks: is_true(self.include_forks.as_deref()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct LocaleQuery {
    locale: Option<String>,
}

impl LocaleQuery {
    fn language(&self) -> Language {
        Language::from_code_or_default(self.locale.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
struct SwitchQuery {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ThemeQuery {
    stored: Option<String>,
    prefers_dark: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Only the literal `true` enables a flag.
fn is_true(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Requested page size capped at 100. Leading digits are read and anything
/// after them ignored (`"20abc"` is 20); no leading digits means the default.
fn parse_per_page(value: Option<&str>) -> u32 {
    value
        .map(|v| {
            let v = v.trim_start();
            let end = v.find(|c: char| !c.is_ascii_digit()).unwrap_or(v.len());
            &v[..end]
        })
        .filter(|digits| !digits.is_empty())
        .map(|digits| digits.parse::<u32>().unwrap_or(MAX_PER_PAGE))
        .unwrap_or(DEFAULT_PER_PAGE)
        .min(MAX_PER_PAGE)
}

fn not_found(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"success": false, "error": message})),
    )
}

// ==================== Handlers ====================

/// `GET /api/github/repos`: the account's repositories as project records.
async fn list_repos(State(state): State<AppState>, Query(query): Query<RepoQuery>) -> ApiResult {
    let username = non_empty(query.username.as_deref())
        .or(state.config.github_username.as_deref())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": "GitHub username is required. Set GITHUB_USERNAME or provide the username query parameter.",
                })),
            )
        })?;

    let options = query.options();
    match state.github.list_repos(username, &options).await {
        Ok(repos) => {
            let data: Vec<ProjectRecord> = repos.collect();
            Ok(Json(json!({
                "success": true,
                "count": data.len(),
                "data": data,
            })))
        }
        Err(e @ (FetchError::MissingUsername | FetchError::InvalidName(_))) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": e.to_string()})),
        )),
        Err(e) => {
            error!("Error in GitHub repos route: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Failed to fetch GitHub repositories",
                    "message": e.to_string(),
                })),
            ))
        }
    }
}

/// `GET /api/github/repos/:owner/:repo`
async fn get_repo(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> ApiResult {
    let record = state
        .github
        .get_repo(&owner, &repo)
        .await
        .ok_or_else(|| not_found("Repository not found"))?;

    Ok(Json(json!({"success": true, "data": record})))
}

/// `GET /api/github/repos/:owner/:repo/languages`
async fn get_repo_languages(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> ApiResult {
    let languages = state.github.get_repo_languages(&owner, &repo).await;
    Ok(Json(json!({"success": true, "data": languages})))
}

/// `GET /api/projects?locale=`: the aggregated feed as cards.
async fn projects_feed(State(state): State<AppState>, Query(query): Query<LocaleQuery>) -> ApiResult {
    let loaded = load_projects(
        &state.github,
        state.config.github_username.as_deref(),
        &RepoListOptions::default(),
    )
    .await;

    let feed = ProjectFeed::build(&loaded, query.language(), TranslationCatalog::get());
    Ok(Json(json!(feed)))
}

/// `GET /api/projects/:id?locale=`
async fn project_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> ApiResult {
    let loaded = load_projects(
        &state.github,
        state.config.github_username.as_deref(),
        &RepoListOptions::default(),
    )
    .await;

    let record = loaded.find(&id).ok_or_else(|| not_found("Project not found"))?;
    let detail = ProjectDetail::build(record, query.language(), TranslationCatalog::get());
    Ok(Json(json!(detail)))
}

/// `GET /api/i18n/:locale`
async fn site_strings(Path(locale): Path<String>) -> ApiResult {
    let language = Language::from_code(&locale).map_err(|_| not_found("Unsupported locale"))?;

    Ok(Json(json!({
        "locale": language,
        "name": language.name(),
        "nativeName": language.native_name(),
        "alternate": language.alternate(),
        "strings": language.strings(),
    })))
}

/// `GET /api/locale/switch?path=`
async fn switch_locale(Query(query): Query<SwitchQuery>) -> ApiResult {
    let path = query.path.unwrap_or_default();
    Ok(Json(json!({
        "from": path,
        "to": switch_locale_path(&path),
    })))
}

/// `GET /api/theme?stored=&prefers_dark=`
async fn theme(Query(query): Query<ThemeQuery>) -> ApiResult {
    let stored = query.stored.as_deref();
    let theme = resolve_theme(stored, is_true(query.prefers_dark.as_deref()));

    Ok(Json(json!({
        "theme": theme,
        "dark": theme.is_dark(),
        "explicit": stored.and_then(Theme::parse).is_some(),
    })))
}

/// `GET /health`
async fn health(State(state): State<AppState>) -> ApiResult {
    Ok(Json(json!({
        "status": "ok",
        "uptime_secs": state.started.elapsed().as_secs(),
        "github_username_configured": state.config.github_username.is_some(),
        "metrics": state.github.metrics().report(),
    })))
}

// ==================== Router ====================

/// Build the axum router with shared state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/github/repos", get(list_repos))
        .route("/api/github/repos/:owner/:repo", get(get_repo))
        .route("/api/github/repos/:owner/:repo/languages", get(get_repo_languages))
        .route("/api/projects", get(projects_feed))
        .route("/api/projects/:id", get(project_detail))
        .route("/api/i18n/:locale", get(site_strings))
        .route("/api/locale/switch", get(switch_locale))
        .route("/api/theme", get(theme))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured port and serve until the process exits.
pub async fn serve(config: Config) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Portfolio API listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
