//! Project entity model and DTOs.

use folio_core::project::{
    normalize_link, ProjectCategory, ProjectDraft, ProjectStatus, TechnologiesInput,
};
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub image: String,
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub category: ProjectCategory,
    pub featured: bool,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The current mutable fields as a draft, for merge-then-write updates.
    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            short_description: self.short_description.clone(),
            image: self.image.clone(),
            technologies: self.technologies.clone(),
            github_url: self.github_url.clone(),
            live_url: self.live_url.clone(),
            category: self.category,
            featured: self.featured,
            status: self.status,
        }
    }
}

/// DTO for creating a new project.
///
/// Required fields default to empty so that missing values are reported by
/// validation with field-level detail rather than as a malformed body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub image: String,
    pub technologies: Option<TechnologiesInput>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    /// Defaults to `web-development` if omitted.
    pub category: Option<ProjectCategory>,
    /// Defaults to `false` if omitted.
    pub featured: Option<bool>,
    /// Defaults to `active` if omitted.
    pub status: Option<ProjectStatus>,
}

impl CreateProject {
    /// Normalise into the full mutable field set, applying defaults.
    pub fn into_draft(self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.trim().to_string(),
            description: self.description,
            short_description: self.short_description,
            image: self.image.trim().to_string(),
            technologies: self
                .technologies
                .map(TechnologiesInput::normalize)
                .unwrap_or_default(),
            github_url: normalize_link(self.github_url),
            live_url: normalize_link(self.live_url),
            category: self.category.unwrap_or_default(),
            featured: self.featured.unwrap_or(false),
            status: self.status.unwrap_or_default(),
        }
    }
}

/// DTO for updating an existing project. All fields are optional; absent
/// fields keep their stored value. An empty `githubUrl`/`liveUrl` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub image: Option<String>,
    pub technologies: Option<TechnologiesInput>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub category: Option<ProjectCategory>,
    pub featured: Option<bool>,
    pub status: Option<ProjectStatus>,
}

impl UpdateProject {
    /// Merge the supplied fields over `current`, producing the record to write.
    pub fn apply_to(self, current: &Project) -> ProjectDraft {
        let mut draft = current.to_draft();
        if let Some(title) = self.title {
            draft.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(short_description) = self.short_description {
            draft.short_description = short_description;
        }
        if let Some(image) = self.image {
            draft.image = image.trim().to_string();
        }
        if let Some(technologies) = self.technologies {
            draft.technologies = technologies.normalize();
        }
        if self.github_url.is_some() {
            draft.github_url = normalize_link(self.github_url);
        }
        if self.live_url.is_some() {
            draft.live_url = normalize_link(self.live_url);
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(featured) = self.featured {
            draft.featured = featured;
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        draft
    }
}

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_projects: i64,
    /// Projects with `status = active`.
    pub active_projects: i64,
    /// Projects flagged featured, regardless of status.
    pub featured_projects: i64,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn stored() -> Project {
        let now = Utc::now();
        Project {
            id: 7,
            title: "Folio".into(),
            description: "Long form".into(),
            short_description: "Short".into(),
            image: "https://img.example.com/a.png".into(),
            technologies: vec!["Rust".into()],
            github_url: Some("https://github.com/me/folio".into()),
            live_url: None,
            category: ProjectCategory::Backend,
            featured: true,
            status: ProjectStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn create_applies_defaults_and_splits_technologies() {
        let input: CreateProject = serde_json::from_value(serde_json::json!({
            "title": "  Site  ",
            "description": "d",
            "shortDescription": "s",
            "image": "i.png",
            "technologies": "React, Node ,MongoDB",
        }))
        .unwrap();

        let draft = input.into_draft();
        assert_eq!(draft.title, "Site");
        assert_eq!(draft.technologies, vec!["React", "Node", "MongoDB"]);
        assert_eq!(draft.category, ProjectCategory::WebDevelopment);
        assert_eq!(draft.status, ProjectStatus::Active);
        assert!(!draft.featured);
        assert_eq!(draft.github_url, None);
    }

    #[test]
    fn missing_fields_deserialize_to_empty_and_fail_validation() {
        let input: CreateProject = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(input.into_draft().check().is_err());
    }

    #[test]
    fn update_leaves_absent_fields_unchanged() {
        let current = stored();
        let patch = UpdateProject {
            status: Some(ProjectStatus::Completed),
            ..Default::default()
        };
        let draft = patch.apply_to(&current);
        assert_eq!(draft.status, ProjectStatus::Completed);
        assert_eq!(draft.title, current.title);
        assert_eq!(draft.github_url, current.github_url);
        assert!(draft.featured);
    }

    #[test]
    fn update_with_empty_link_clears_it() {
        let patch = UpdateProject {
            github_url: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(patch.apply_to(&stored()).github_url, None);
    }

    #[test]
    fn project_serializes_camel_case() {
        let json = serde_json::to_value(stored()).unwrap();
        assert_eq!(json["shortDescription"], "Short");
        assert_eq!(json["githubUrl"], "https://github.com/me/folio");
        assert_eq!(json["category"], "backend");
        assert!(json["createdAt"].is_string());
    }
}
