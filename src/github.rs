use crate::cache::ResponseCache;
use crate::config::Config;
use crate::metrics::FetchMetrics;
use crate::projects::{ProjectId, ProjectRecord};
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::header::{HeaderMap, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// GitHub caps `per_page` at 100.
pub const MAX_PER_PAGE: u32 = 100;
pub const DEFAULT_PER_PAGE: u32 = 6;
pub const DEFAULT_SORT: &str = "updated";
pub const DEFAULT_REPO_TYPE: &str = "owner";

const SORT_VALUES: [&str; 4] = ["created", "updated", "pushed", "full_name"];
const REPO_TYPES: [&str; 3] = ["all", "owner", "member"];

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = "Portfolio-App";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GitHub username is required")]
    MissingUsername,

    #[error("Invalid GitHub name: {0}")]
    InvalidName(String),

    #[error("GitHub API rate limit exceeded (resets at {reset})")]
    RateLimited { reset: String },

    #[error("GitHub API error: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Failed to reach GitHub API: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Failed to parse GitHub response: {0}")]
    Parse(#[source] serde_json::Error),
}

impl FetchError {
    /// Upstream HTTP status, for errors that carry one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::RateLimited { .. } => Some(403),
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ==================== Options ====================

/// Options for listing an account's repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoListOptions {
    /// `created`, `updated`, `pushed` or `full_name`
    pub sort: String,
    pub per_page: u32,
    /// `all`, `owner` or `member`
    pub repo_type: String,
    pub include_private: bool,
    pub include_archived: bool,
    pub include_forks: bool,
}

impl Default for RepoListOptions {
    fn default() -> Self {
        Self {
            sort: DEFAULT_SORT.to_string(),
            per_page: DEFAULT_PER_PAGE,
            repo_type: DEFAULT_REPO_TYPE.to_string(),
            include_private: false,
            include_archived: false,
            include_forks: false,
        }
    }
}

impl RepoListOptions {
    /// `per_page` as sent upstream: at least 1, at most [`MAX_PER_PAGE`].
    pub fn effective_per_page(&self) -> u32 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }

    /// `sort` as sent upstream. Values GitHub does not know become `updated`.
    pub fn effective_sort(&self) -> &str {
        if is_valid_sort(&self.sort) {
            &self.sort
        } else {
            DEFAULT_SORT
        }
    }

    /// `type` as sent upstream. Values GitHub does not know become `owner`.
    pub fn effective_repo_type(&self) -> &str {
        if is_valid_repo_type(&self.repo_type) {
            &self.repo_type
        } else {
            DEFAULT_REPO_TYPE
        }
    }

    fn filter(&self) -> RepoFilter {
        RepoFilter {
            include_private: self.include_private,
            include_archived: self.include_archived,
            include_forks: self.include_forks,
        }
    }
}

/// Visibility filter. Each flag is checked on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepoFilter {
    pub include_private: bool,
    pub include_archived: bool,
    pub include_forks: bool,
}

impl RepoFilter {
    pub fn allows(&self, repo: &GithubRepo) -> bool {
        (self.include_private || !repo.is_private())
            && (self.include_archived || !repo.is_archived())
            && (self.include_forks || !repo.is_fork())
    }
}

// ==================== Upstream Shapes ====================

#[derive(Debug, Clone, Deserialize)]
struct GithubLicense {
    name: Option<String>,
}

/// Repository as returned by the GitHub REST API. Only the fields the site
/// uses are kept; any of them may be absent or null.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubRepo {
    id: u64,
    name: String,
    full_name: Option<String>,
    description: Option<String>,
    html_url: Option<String>,
    homepage: Option<String>,
    language: Option<String>,
    stargazers_count: Option<u64>,
    forks_count: Option<u64>,
    watchers_count: Option<u64>,
    open_issues_count: Option<u64>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    pushed_at: Option<DateTime<Utc>>,
    topics: Option<Vec<String>>,
    private: Option<bool>,
    archived: Option<bool>,
    fork: Option<bool>,
    default_branch: Option<String>,
    size: Option<u64>,
    license: Option<GithubLicense>,
    has_pages: Option<bool>,
    has_wiki: Option<bool>,
    has_issues: Option<bool>,
}

impl GithubRepo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_private(&self) -> bool {
        self.private.unwrap_or(false)
    }

    pub fn is_archived(&self) -> bool {
        self.archived.unwrap_or(false)
    }

    pub fn is_fork(&self) -> bool {
        self.fork.unwrap_or(false)
    }
}

impl From<GithubRepo> for ProjectRecord {
    fn from(repo: GithubRepo) -> Self {
        let is_private = repo.is_private();
        let is_archived = repo.is_archived();
        let is_fork = repo.is_fork();

        ProjectRecord {
            id: ProjectId::Remote(repo.id),
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description.unwrap_or_default(),
            url: repo.html_url,
            homepage: repo.homepage.filter(|h| !h.trim().is_empty()),
            language: repo.language,
            stars: repo.stargazers_count.unwrap_or(0),
            forks: repo.forks_count.unwrap_or(0),
            watchers: repo.watchers_count.unwrap_or(0),
            open_issues: repo.open_issues_count.unwrap_or(0),
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            pushed_at: repo.pushed_at,
            topics: repo.topics.unwrap_or_default(),
            is_private,
            is_archived,
            is_fork,
            default_branch: repo.default_branch,
            size: repo.size.unwrap_or(0),
            license: repo.license.and_then(|l| l.name),
            has_pages: repo.has_pages.unwrap_or(false),
            has_wiki: repo.has_wiki.unwrap_or(false),
            has_issues: repo.has_issues.unwrap_or(false),
            order: None,
            is_custom: false,
            additional_info: None,
        }
    }
}

// ==================== Project Iterator ====================

/// One-shot iterator over a fetched repository list.
///
/// Filtering and normalization happen as items are pulled.
#[derive(Debug)]
pub struct ProjectIter {
    repos: std::vec::IntoIter<GithubRepo>,
    filter: RepoFilter,
}

impl ProjectIter {
    pub fn new(repos: Vec<GithubRepo>, filter: RepoFilter) -> Self {
        Self {
            repos: repos.into_iter(),
            filter,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), RepoFilter::default())
    }
}

impl Iterator for ProjectIter {
    type Item = ProjectRecord;

    fn next(&mut self) -> Option<ProjectRecord> {
        let filter = self.filter;
        self.repos
            .find(|repo| filter.allows(repo))
            .map(ProjectRecord::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.repos.size_hint().1)
    }
}

// ==================== Name Validation ====================

static LOGIN_REGEX: OnceLock<Regex> = OnceLock::new();
static REPO_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

/// GitHub login: alphanumerics and hyphens, 1-39 chars, no leading hyphen.
pub fn is_valid_login(login: &str) -> bool {
    let regex = LOGIN_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]{0,38}$").expect("login regex is valid")
    });
    regex.is_match(login)
}

pub fn is_valid_repo_name(name: &str) -> bool {
    let regex = REPO_NAME_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._-]{1,100}$").expect("repo name regex is valid")
    });
    regex.is_match(name) && name != "." && name != ".."
}

pub fn is_valid_sort(sort: &str) -> bool {
    SORT_VALUES.contains(&sort)
}

pub fn is_valid_repo_type(repo_type: &str) -> bool {
    REPO_TYPES.contains(&repo_type)
}

// ==================== Rate Limit Headers ====================

/// Render an `x-ratelimit-reset` epoch value as RFC 3339.
pub fn format_rate_limit_reset(raw: Option<&str>) -> String {
    raw.and_then(|ts| ts.trim().parse::<i64>().ok())
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| "unknown".to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

// ==================== Client ====================

/// Client for the GitHub REST API.
///
/// Cheap to clone; clones share the response cache and metrics.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
    cache: Arc<ResponseCache<Vec<GithubRepo>>>,
    metrics: Arc<FetchMetrics>,
}

impl GithubClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.github_api_url.trim_end_matches('/').to_string(),
            token: config.github_token.clone(),
            cache: Arc::new(ResponseCache::new(Duration::from_secs(config.cache_ttl_secs))),
            metrics: Arc::new(FetchMetrics::new()),
        }
    }

    pub fn metrics(&self) -> &FetchMetrics {
        &self.metrics
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self
            .http
            .get(url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, CLIENT_USER_AGENT);

        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// List an account's repositories.
    ///
    /// A 403 from GitHub is treated as an exhausted rate limit: it is logged
    /// and yields an empty list rather than an error.
    pub async fn list_repos(
        &self,
        username: &str,
        options: &RepoListOptions,
    ) -> Result<ProjectIter, FetchError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(FetchError::MissingUsername);
        }
        if !is_valid_login(username) {
            return Err(FetchError::InvalidName(username.to_string()));
        }

        let per_page = options.effective_per_page().to_string();
        let request = self
            .get(&format!("{}/users/{}/repos", self.api_url, username))
            .query(&[
                ("sort", options.effective_sort()),
                ("per_page", per_page.as_str()),
                ("type", options.effective_repo_type()),
            ])
            .build()
            .map_err(FetchError::Network)?;

        let cache_key = request.url().to_string();
        if let Some(repos) = self.cache.get(&cache_key).await {
            self.metrics.record_cache_hit();
            debug!("Serving {} repositories for {} from cache", repos.len(), username);
            return Ok(ProjectIter::new(repos, options.filter()));
        }
        self.metrics.record_cache_miss();

        let repos: Vec<GithubRepo> = match self.send_json(request).await {
            Ok(repos) => repos,
            Err(FetchError::RateLimited { .. }) => return Ok(ProjectIter::empty()),
            Err(e) => return Err(e),
        };

        info!("Fetched {} repositories for {}", repos.len(), username);
        self.cache.insert(&cache_key, repos.clone()).await;

        Ok(ProjectIter::new(repos, options.filter()))
    }

    /// Fetch a single repository. Any failure is logged and yields `None`.
    pub async fn get_repo(&self, owner: &str, repo: &str) -> Option<ProjectRecord> {
        if !is_valid_login(owner) || !is_valid_repo_name(repo) {
            warn!("Owner and repo name are required and must be valid GitHub names");
            return None;
        }

        let url = format!("{}/repos/{}/{}", self.api_url, owner, repo);
        let result = match self.get(&url).build() {
            Ok(request) => self.send_json::<GithubRepo>(request).await,
            Err(e) => Err(FetchError::Network(e)),
        };

        match result {
            Ok(repo) => Some(repo.into()),
            Err(e) => {
                warn!("Error fetching GitHub repo {}/{}: {}", owner, repo, e);
                None
            }
        }
    }

    /// Bytes of code per language for a repository. Any failure is logged
    /// and yields an empty map.
    pub async fn get_repo_languages(&self, owner: &str, repo: &str) -> BTreeMap<String, u64> {
        if !is_valid_login(owner) || !is_valid_repo_name(repo) {
            return BTreeMap::new();
        }

        let url = format!("{}/repos/{}/{}/languages", self.api_url, owner, repo);
        let result = match self.get(&url).build() {
            Ok(request) => self.send_json::<BTreeMap<String, u64>>(request).await,
            Err(e) => Err(FetchError::Network(e)),
        };

        result.unwrap_or_else(|e| {
            warn!("Error fetching languages for {}/{}: {}", owner, repo, e);
            BTreeMap::new()
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::Request) -> Result<T, FetchError> {
        let result = self.execute_json(request).await;
        match &result {
            Err(FetchError::RateLimited { .. }) => self.metrics.record_rate_limited(),
            Err(_) => self.metrics.record_failure(),
            Ok(_) => {}
        }
        result
    }

    async fn execute_json<T: DeserializeOwned>(&self, request: reqwest::Request) -> Result<T, FetchError> {
        self.metrics.record_upstream_call();

        let response = self
            .http
            .execute(request)
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();

        if status == StatusCode::FORBIDDEN {
            let headers = response.headers();
            let remaining = header_str(headers, "x-ratelimit-remaining").unwrap_or("?");
            let reset = format_rate_limit_reset(header_str(headers, "x-ratelimit-reset"));
            warn!(
                "GitHub API rate limit exceeded: {} remaining (resets at {})",
                remaining, reset
            );
            return Err(FetchError::RateLimited { reset });
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::Network)?;
        serde_json::from_slice(&body).map_err(FetchError::Parse)
    }
}
