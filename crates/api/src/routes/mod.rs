pub mod admin;
pub mod contact;
pub mod health;
pub mod portfolio;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /portfolio/projects                 list with filters (public)
/// /portfolio/projects/featured        featured + active, max 6 (public)
/// /portfolio/projects/{id}            detail (public)
///
/// /admin/login                        login (public)
/// /admin/create                       bootstrap the singleton admin (public)
/// /admin/dashboard/stats              project counts (admin)
/// /admin/projects                     list, create (admin)
/// /admin/projects/{id}                update, delete (admin)
///
/// /contact                            submit (public), list (admin)
/// /contact/stats                      message counts (admin)
/// /contact/{id}                       view, update status, delete (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/portfolio", portfolio::router())
        .nest("/admin", admin::router())
        .nest("/contact", contact::router())
}
