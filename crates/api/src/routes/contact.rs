use axum::routing::get;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/contact`.
///
/// ```text
/// POST   /          -> submit (public)
/// GET    /          -> list
/// GET    /stats     -> stats
/// GET    /{id}      -> view
/// PUT    /{id}      -> update_status
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list).post(contact::submit))
        .route("/stats", get(contact::stats))
        .route(
            "/{id}",
            get(contact::view)
                .put(contact::update_status)
                .delete(contact::delete),
        )
}
