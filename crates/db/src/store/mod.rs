//! Store traits consumed by the service layer.
//!
//! The services never talk to `sqlx` directly; they hold `Arc<dyn …Store>`
//! handles so the same logic runs against PostgreSQL ([`PgStore`]) or the
//! process-local [`MemoryStore`].
//!
//! Every operation is a single round trip and is atomic per record. Errors
//! use `sqlx::Error` so both backends share one propagation path.

use std::sync::Arc;

use async_trait::async_trait;
use folio_core::contact::ContactStatus;
use folio_core::project::{ProjectDraft, ProjectFilter};
use folio_core::types::DbId;

use crate::models::contact::{Contact, ContactStats, CreateContact, UpdateContactStatus};
use crate::models::project::{Project, ProjectStats};
use crate::models::user::{CreateUser, User};
use crate::DbPool;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Credential store.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;

    /// Whether any user anywhere holds the admin role.
    async fn admin_exists(&self) -> Result<bool, sqlx::Error>;

    async fn create(&self, input: &CreateUser) -> Result<User, sqlx::Error>;
}

/// Project store.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Projects matching `filter`, newest created first.
    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error>;

    /// Featured AND active projects, newest first, at most `limit`.
    async fn list_featured(&self, limit: usize) -> Result<Vec<Project>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, sqlx::Error>;

    async fn create(&self, input: &ProjectDraft) -> Result<Project, sqlx::Error>;

    /// Overwrite every mutable field. `None` if the id is unknown.
    async fn update(&self, id: DbId, input: &ProjectDraft)
        -> Result<Option<Project>, sqlx::Error>;

    /// Hard delete. `false` if the id is unknown.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn stats(&self) -> Result<ProjectStats, sqlx::Error>;
}

/// Contact message store.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn create(&self, input: &CreateContact) -> Result<Contact, sqlx::Error>;

    /// Messages, optionally of one status, newest created first.
    async fn list(&self, status: Option<ContactStatus>) -> Result<Vec<Contact>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Contact>, sqlx::Error>;

    /// Conditional `new -> read` write. `None` if the record is missing or
    /// not currently `new`.
    async fn mark_read(&self, id: DbId) -> Result<Option<Contact>, sqlx::Error>;

    /// Apply the non-`None` fields of `input`. `None` if the id is unknown.
    async fn update_status(
        &self,
        id: DbId,
        input: &UpdateContactStatus,
    ) -> Result<Option<Contact>, sqlx::Error>;

    /// Hard delete. `false` if the id is unknown.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn stats(&self) -> Result<ContactStats, sqlx::Error>;
}

/// Liveness probe for the backing store.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// The three collections plus a health probe, all backed by one store.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub projects: Arc<dyn ProjectStore>,
    pub contacts: Arc<dyn ContactStore>,
    pub health: Arc<dyn StoreHealth>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(pool: DbPool) -> Self {
        Self::from_backend(Arc::new(PgStore::new(pool)))
    }

    /// Fresh, empty in-memory stores.
    pub fn memory() -> Self {
        Self::from_backend(Arc::new(MemoryStore::new()))
    }

    fn from_backend<S>(backend: Arc<S>) -> Self
    where
        S: UserStore + ProjectStore + ContactStore + StoreHealth + 'static,
    {
        Self {
            users: backend.clone(),
            projects: backend.clone(),
            contacts: backend.clone(),
            health: backend,
        }
    }
}
