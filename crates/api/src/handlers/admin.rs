//! Handlers for the `/admin` surface: login, bootstrap, dashboard, project CRUD.
//!
//! Everything except `login` and `create` requires an admin token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::project::ProjectFilter;
use folio_db::models::project::{CreateProject, Project, ProjectStats, UpdateProject};
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::{JsonBody, PathId};
use crate::middleware::rbac::RequireAdmin;
use crate::services::auth::{BootstrapAdmin, LoginRequest, LoginResponse};
use crate::state::AppState;

/// Acknowledgement body for actions that return no record.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.auth.login(input).await?;
    Ok(Json(response))
}

/// POST /api/admin/create
///
/// One-time creation of the singleton admin account.
pub async fn bootstrap(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<BootstrapAdmin>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.auth.bootstrap_admin(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Admin user created successfully",
        }),
    ))
}

/// GET /api/admin/dashboard/stats
pub async fn dashboard_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<ProjectStats>> {
    let stats = state.projects.dashboard_stats().await?;
    Ok(Json(stats))
}

/// GET /api/admin/projects
pub async fn list_projects(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = state.projects.list(&ProjectFilter::default()).await?;
    Ok(Json(projects))
}

/// POST /api/admin/projects
pub async fn create_project(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = state.projects.create(input).await?;
    tracing::info!(
        admin_id = admin.user_id,
        project_id = project.id,
        title = %project.title,
        "Project created"
    );
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/admin/projects/{id}
pub async fn update_project(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    PathId(id): PathId,
    JsonBody(input): JsonBody<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = state.projects.update(id, input).await?;
    tracing::info!(admin_id = admin.user_id, project_id = id, "Project updated");
    Ok(Json(project))
}

/// DELETE /api/admin/projects/{id}
pub async fn delete_project(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<StatusCode> {
    state.projects.delete(id).await?;
    tracing::info!(admin_id = admin.user_id, project_id = id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
