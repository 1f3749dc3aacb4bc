//! Handlers for the `/contact` resource.
//!
//! Submission is public; everything else requires an admin token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::contact::ContactStatus;
use folio_db::models::contact::{Contact, ContactStats, CreateContact, UpdateContactStatus};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{JsonBody, PathId, QueryParams};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Query parameters for `GET /contact`.
#[derive(Debug, Deserialize)]
pub struct ContactListParams {
    pub status: Option<ContactStatus>,
}

/// POST /api/contact
pub async fn submit(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateContact>,
) -> AppResult<(StatusCode, Json<Contact>)> {
    let contact = state.contacts.submit(input).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// GET /api/contact
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ContactListParams>,
) -> AppResult<Json<Vec<Contact>>> {
    let contacts = state.contacts.list(params.status).await?;
    Ok(Json(contacts))
}

/// GET /api/contact/stats
pub async fn stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<ContactStats>> {
    let stats = state.contacts.stats().await?;
    Ok(Json(stats))
}

/// GET /api/contact/{id}
///
/// Viewing a `new` message marks it `read`.
pub async fn view(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Contact>> {
    let contact = state.contacts.view_one(id).await?;
    Ok(Json(contact))
}

/// PUT /api/contact/{id}
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    PathId(id): PathId,
    JsonBody(input): JsonBody<UpdateContactStatus>,
) -> AppResult<Json<Contact>> {
    let contact = state.contacts.update_status(id, input).await?;
    tracing::info!(
        admin_id = admin.user_id,
        contact_id = id,
        status = %contact.status,
        "Contact status updated"
    );
    Ok(Json(contact))
}

/// DELETE /api/contact/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<StatusCode> {
    state.contacts.delete(id).await?;
    tracing::info!(admin_id = admin.user_id, contact_id = id, "Contact message deleted");
    Ok(StatusCode::NO_CONTENT)
}
