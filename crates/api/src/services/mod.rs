//! Domain services. Each holds only the store handles it needs and is cheap
//! to clone into [`AppState`](crate::state::AppState).

pub mod auth;
pub mod contact;
pub mod project;

pub use auth::AuthGate;
pub use contact::ContactService;
pub use project::ProjectService;
