//! Handlers for the public `/portfolio` surface.

use axum::extract::State;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::project::ProjectFilter;
use folio_db::models::project::Project;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{PathId, QueryParams};
use crate::state::AppState;

/// Query parameters for `GET /portfolio/projects`.
///
/// Kept as raw strings so unknown values are reported as validation errors
/// naming the offending parameter.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectListParams {
    pub category: Option<String>,
    pub featured: Option<String>,
    pub status: Option<String>,
}

impl ProjectListParams {
    pub fn into_filter(self) -> Result<ProjectFilter, CoreError> {
        let invalid = |e: folio_core::text_enum::UnknownVariant| CoreError::Validation(e.to_string());

        let featured = match self.featured.as_deref() {
            None => None,
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(other) => {
                return Err(CoreError::Validation(format!(
                    "invalid featured value '{other}', expected true or false"
                )))
            }
        };

        Ok(ProjectFilter {
            category: self
                .category
                .as_deref()
                .map(str::parse)
                .transpose()
                .map_err(invalid)?,
            featured,
            status: self
                .status
                .as_deref()
                .map(str::parse)
                .transpose()
                .map_err(invalid)?,
        })
    }
}

/// GET /api/portfolio/projects
pub async fn list_projects(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ProjectListParams>,
) -> AppResult<Json<Vec<Project>>> {
    let filter = params.into_filter()?;
    let projects = state.projects.list(&filter).await?;
    Ok(Json(projects))
}

/// GET /api/portfolio/projects/featured
pub async fn featured_projects(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = state.projects.list_featured().await?;
    Ok(Json(projects))
}

/// GET /api/portfolio/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Project>> {
    let project = state.projects.get(id).await?;
    Ok(Json(project))
}
