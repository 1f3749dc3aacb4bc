//! Project domain rules: categories, lifecycle status, technologies
//! normalisation, and validation of the mutable field set.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;

/// Maximum length of `shortDescription`, in characters.
pub const MAX_SHORT_DESCRIPTION_LEN: u64 = 200;

/// Maximum number of projects on the public featured feed.
pub const FEATURED_LIMIT: usize = 6;

define_text_enum! {
    /// Portfolio grouping shown as a filter on the public site.
    ProjectCategory ("category") {
        WebDevelopment => "web-development",
        MobileApp => "mobile-app",
        UiDesign => "ui-design",
        Backend => "backend",
        Fullstack => "fullstack",
        Other => "other",
    }
}

impl Default for ProjectCategory {
    fn default() -> Self {
        ProjectCategory::WebDevelopment
    }
}

define_text_enum! {
    /// Project lifecycle status. Only `active` projects reach the featured feed.
    ProjectStatus ("status") {
        Active => "active",
        Inactive => "inactive",
        Completed => "completed",
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Active
    }
}

/// Technologies as submitted by a client: either a JSON array or a single
/// comma-delimited string such as `"Rust, Axum, Postgres"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TechnologiesInput {
    List(Vec<String>),
    Delimited(String),
}

impl TechnologiesInput {
    /// Produce the stored ordered list: elements trimmed, empties dropped.
    pub fn normalize(self) -> Vec<String> {
        match self {
            TechnologiesInput::List(items) => items
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            TechnologiesInput::Delimited(raw) => split_technologies(&raw),
        }
    }
}

/// Split a comma-delimited technologies string, trimming each element.
pub fn split_technologies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim an optional URL; blank values become `None`.
pub fn normalize_link(link: Option<String>) -> Option<String> {
    link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty())
}

/// Predicates for project listing. `None` fields are not applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub category: Option<ProjectCategory>,
    pub featured: Option<bool>,
    pub status: Option<ProjectStatus>,
}

impl ProjectFilter {
    /// Conjunction of the provided predicates.
    pub fn matches(&self, category: ProjectCategory, featured: bool, status: ProjectStatus) -> bool {
        self.category.is_none_or(|c| c == category)
            && self.featured.is_none_or(|f| f == featured)
            && self.status.is_none_or(|s| s == status)
    }
}

/// The complete set of mutable project fields, normalised and ready to be
/// validated and written. Produced from both create and update payloads.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ProjectDraft {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(length(
        min = 1,
        max = 200,
        message = "shortDescription is required and must be at most 200 characters"
    ))]
    pub short_description: String,
    #[validate(length(min = 1, message = "image is required"))]
    pub image: String,
    #[validate(length(min = 1, message = "at least one technology is required"))]
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub category: ProjectCategory,
    pub featured: bool,
    pub status: ProjectStatus,
}

impl ProjectDraft {
    /// Check field invariants, returning field-level detail on failure.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(CoreError::from)
    }
}
