use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /login             -> login
/// POST   /create            -> bootstrap
/// GET    /dashboard/stats   -> dashboard_stats
/// GET    /projects          -> list_projects
/// POST   /projects          -> create_project
/// PUT    /projects/{id}     -> update_project
/// DELETE /projects/{id}     -> delete_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/create", post(admin::bootstrap))
        .route("/dashboard/stats", get(admin::dashboard_stats))
        .route(
            "/projects",
            get(admin::list_projects).post(admin::create_project),
        )
        .route(
            "/projects/{id}",
            put(admin::update_project).delete(admin::delete_project),
        )
}
