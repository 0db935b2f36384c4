//! Presentation models for the projects section.
//!
//! Everything here is stateless: a record plus a locale in, a serializable
//! card or detail view out. `load_projects` is the one async entry point; it
//! fetches, aggregates and reports whether the fetch worked so the page can
//! tell "no projects" apart from "GitHub failed".

use crate::aggregate::aggregate;
use crate::github::{FetchError, GithubClient, ProjectIter, RepoListOptions};
use crate::i18n::{Language, LanguageStrings, TranslationCatalog};
use crate::projects::{custom_projects, AdditionalInfo, OrderTable, ProjectId, ProjectRecord};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

// ==================== Dates ====================

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const MONTHS_EN_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_ES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];
const MONTHS_ES_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// `Jan 15, 2024` / `15 ene 2024`. Missing dates render as `""`.
pub fn format_date_short(date: Option<DateTime<Utc>>, language: Language) -> String {
    let Some(date) = date else {
        return String::new();
    };
    let month = date.month0() as usize;

    if spanish_dates(language.config().date_locale) {
        format!("{} {} {}", date.day(), MONTHS_ES_SHORT[month], date.year())
    } else {
        format!("{} {}, {}", MONTHS_EN_SHORT[month], date.day(), date.year())
    }
}

/// `January 15, 2024` / `15 de enero de 2024`. Missing dates render as `""`.
pub fn format_date_long(date: Option<DateTime<Utc>>, language: Language) -> String {
    let Some(date) = date else {
        return String::new();
    };
    let month = date.month0() as usize;

    if spanish_dates(language.config().date_locale) {
        format!("{} de {} de {}", date.day(), MONTHS_ES[month], date.year())
    } else {
        format!("{} {}, {}", MONTHS_EN[month], date.day(), date.year())
    }
}

/// Spanish month names and day-first order for any `es-*` date locale;
/// English otherwise.
fn spanish_dates(date_locale: &str) -> bool {
    date_locale == "es" || date_locale.starts_with("es-")
}

/// Repository size as reported by GitHub (KB) in a readable unit.
pub fn format_size(kilobytes: u64) -> String {
    if kilobytes < 1024 {
        format!("{} KB", kilobytes)
    } else {
        format!("{:.1} MB", kilobytes as f64 / 1024.0)
    }
}

// ==================== Cards ====================

/// Summary tile in the projects grid.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub updated: String,
    pub topics: Vec<String>,
    pub url: Option<String>,
    pub homepage: Option<String>,
    pub is_custom: bool,
}

impl ProjectCard {
    pub fn build(record: &ProjectRecord, language: Language, catalog: &TranslationCatalog) -> Self {
        let locale = language.code();

        Self {
            id: record.id.clone(),
            title: catalog.resolve_title(&record.name, locale, &record.name),
            description: catalog.resolve_description(&record.name, locale, &record.description),
            language: record.language.clone(),
            stars: record.stars,
            forks: record.forks,
            updated: format_date_short(record.updated_at, language),
            topics: record.topics.clone(),
            url: record.url.clone(),
            homepage: record.homepage.clone(),
            is_custom: record.is_custom,
        }
    }
}

// ==================== Detail ====================

/// Expanded view of one project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    pub id: ProjectId,
    pub locale: Language,
    pub title: String,
    pub description: String,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub open_issues: u64,
    pub created: String,
    pub updated: String,
    pub pushed: String,
    pub size: String,
    pub default_branch: Option<String>,
    pub license: Option<String>,
    pub topics: Vec<String>,
    pub url: Option<String>,
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<AdditionalInfo>,
    pub labels: &'static LanguageStrings,
}

impl ProjectDetail {
    pub fn build(record: &ProjectRecord, language: Language, catalog: &TranslationCatalog) -> Self {
        let locale = language.code();

        Self {
            id: record.id.clone(),
            locale: language,
            title: catalog.resolve_title(&record.name, locale, &record.name),
            description: catalog.resolve_description(&record.name, locale, &record.description),
            language: record.language.clone(),
            stars: record.stars,
            forks: record.forks,
            watchers: record.watchers,
            open_issues: record.open_issues,
            created: format_date_long(record.created_at, language),
            updated: format_date_long(record.updated_at, language),
            pushed: format_date_long(record.pushed_at, language),
            size: format_size(record.size),
            default_branch: record.default_branch.clone(),
            license: record.license.clone(),
            topics: record.topics.clone(),
            url: record.url.clone(),
            homepage: record.homepage.clone(),
            additional_info: catalog
                .resolve_additional_info(&record.name, locale, record.additional_info.as_ref())
                .filter(|info| !info.is_empty()),
            labels: language.strings(),
        }
    }
}

// ==================== Feed ====================

/// Outcome of loading the projects section.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FeedStatus {
    Ready,
    Empty { message: String },
    Failed { message: String, detail: String },
}

/// Aggregated projects plus the fetch error, if any.
#[derive(Debug, Clone)]
pub struct LoadedProjects {
    pub projects: Vec<ProjectRecord>,
    pub error: Option<String>,
}

impl LoadedProjects {
    pub fn find(&self, id: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.id.matches(id))
    }
}

/// Fetch the account's repositories and merge them with the curated list.
///
/// Never fails: on any fetch error the curated projects are still returned
/// and the error is kept for display.
pub async fn load_projects(
    client: &GithubClient,
    username: Option<&str>,
    options: &RepoListOptions,
) -> LoadedProjects {
    let fetched = match username {
        Some(username) => client.list_repos(username, options).await,
        None => {
            warn!("GitHub username is not configured, showing curated projects only");
            Err(FetchError::MissingUsername)
        }
    };

    let (repos, error) = match fetched {
        Ok(repos) => (repos, None),
        Err(e) => {
            error!("Error fetching GitHub repos: {}", e);
            (ProjectIter::empty(), Some(e.to_string()))
        }
    };

    let projects = aggregate(custom_projects(), repos, OrderTable::get());
    info!("Loaded {} projects", projects.len());

    LoadedProjects { projects, error }
}

/// The projects section as served to the page.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectFeed {
    pub locale: Language,
    #[serde(flatten)]
    pub status: FeedStatus,
    pub count: usize,
    pub projects: Vec<ProjectCard>,
}

impl ProjectFeed {
    pub fn build(loaded: &LoadedProjects, language: Language, catalog: &TranslationCatalog) -> Self {
        let strings = language.strings();
        let projects: Vec<ProjectCard> = loaded
            .projects
            .iter()
            .map(|record| ProjectCard::build(record, language, catalog))
            .collect();

        let status = match &loaded.error {
            Some(detail) => FeedStatus::Failed {
                message: strings.projects_fetch_failed.to_string(),
                detail: detail.clone(),
            },
            None if projects.is_empty() => FeedStatus::Empty {
                message: strings.projects_empty.to_string(),
            },
            None => FeedStatus::Ready,
        };

        Self {
            locale: language,
            status,
            count: projects.len(),
            projects,
        }
    }
}
