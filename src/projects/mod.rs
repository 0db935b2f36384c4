//! Project records and the static data that feeds the portfolio.
//!
//! - `ProjectRecord`: the normalized shape shared by GitHub repositories and
//!   hand-curated entries
//! - `registry`: the hand-curated projects
//! - `order`: manual display precedence for fetched repositories

mod order;
mod registry;

pub use order::OrderTable;
pub use registry::{custom_project_by_id, custom_projects};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a record within one render.
///
/// GitHub repositories keep their numeric upstream id; curated entries carry
/// a locally assigned string such as `"custom-1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Remote(u64),
    Custom(String),
}

impl ProjectId {
    /// Compare against an id taken from a URL path segment.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            ProjectId::Remote(id) => raw.parse::<u64>().map(|n| n == *id).unwrap_or(false),
            ProjectId::Custom(id) => id == raw,
        }
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Remote(id) => write!(f, "{}", id),
            ProjectId::Custom(id) => f.write_str(id),
        }
    }
}

/// One section of the extended project description shown in the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum InfoSection {
    /// Trusted HTML snippet authored in the translation catalog
    Html(String),
    /// Ordered bullet list
    List(Vec<String>),
}

/// Extended information block: an optional heading followed by any number
/// of ordered sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub sections: Vec<InfoSection>,
}

impl AdditionalInfo {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.sections.is_empty()
    }
}

/// A single project's normalized data, whether fetched or hand-curated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub name: String,
    pub full_name: Option<String>,
    pub description: String,
    pub url: Option<String>,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub open_issues: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub topics: Vec<String>,
    pub is_private: bool,
    pub is_archived: bool,
    pub is_fork: bool,
    pub default_branch: Option<String>,
    pub size: u64,
    pub license: Option<String>,
    pub has_pages: bool,
    pub has_wiki: bool,
    pub has_issues: bool,
    pub order: Option<u32>,
    pub is_custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<AdditionalInfo>,
}

impl ProjectRecord {
    /// Start a hand-curated record; every stat defaults to zero and every
    /// optional field to `None`.
    pub fn custom(id: &str, name: &str) -> Self {
        Self {
            id: ProjectId::Custom(id.to_string()),
            name: name.to_string(),
            full_name: None,
            description: String::new(),
            url: None,
            homepage: None,
            language: None,
            stars: 0,
            forks: 0,
            watchers: 0,
            open_issues: 0,
            created_at: None,
            updated_at: None,
            pushed_at: None,
            topics: Vec::new(),
            is_private: false,
            is_archived: false,
            is_fork: false,
            default_branch: None,
            size: 0,
            license: None,
            has_pages: false,
            has_wiki: false,
            has_issues: false,
            order: None,
            is_custom: true,
            additional_info: None,
        }
    }
}
