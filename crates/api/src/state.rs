use std::sync::Arc;

use folio_db::store::{StoreHealth, Stores};

use crate::config::ServerConfig;
use crate::services::{AuthGate, ContactService, ProjectService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (every member is behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthGate,
    pub projects: ProjectService,
    pub contacts: ContactService,
    /// Liveness probe for the backing store.
    pub store_health: Arc<dyn StoreHealth>,
}

impl AppState {
    /// Wire the services onto one set of stores.
    pub fn new(config: &ServerConfig, stores: Stores) -> Self {
        Self {
            auth: AuthGate::new(
                stores.users,
                config.jwt.clone(),
                config.min_password_length,
            ),
            projects: ProjectService::new(stores.projects),
            contacts: ContactService::new(stores.contacts),
            store_health: stores.health,
        }
    }
}
