use axum::routing::get;
use axum::Router;

use crate::handlers::portfolio;
use crate::state::AppState;

/// Routes mounted at `/portfolio`.
///
/// ```text
/// GET /projects            -> list_projects
/// GET /projects/featured   -> featured_projects
/// GET /projects/{id}       -> get_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(portfolio::list_projects))
        .route("/projects/featured", get(portfolio::featured_projects))
        .route("/projects/{id}", get(portfolio::get_project))
}
