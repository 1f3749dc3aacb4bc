//! PostgreSQL store: delegates each trait method to the matching repository.

use async_trait::async_trait;
use folio_core::contact::ContactStatus;
use folio_core::project::{ProjectDraft, ProjectFilter};
use folio_core::types::DbId;

use super::{ContactStore, ProjectStore, StoreHealth, UserStore};
use crate::models::contact::{Contact, ContactStats, CreateContact, UpdateContactStatus};
use crate::models::project::{Project, ProjectStats};
use crate::models::user::{CreateUser, User};
use crate::repositories::{ContactRepo, ProjectRepo, UserRepo};
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_email(&self.pool, email).await
    }

    async fn admin_exists(&self) -> Result<bool, sqlx::Error> {
        UserRepo::admin_exists(&self.pool).await
    }

    async fn create(&self, input: &CreateUser) -> Result<User, sqlx::Error> {
        UserRepo::create(&self.pool, input).await
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        ProjectRepo::list(&self.pool, filter).await
    }

    async fn list_featured(&self, limit: usize) -> Result<Vec<Project>, sqlx::Error> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        ProjectRepo::list_featured(&self.pool, limit).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        ProjectRepo::find_by_id(&self.pool, id).await
    }

    async fn create(&self, input: &ProjectDraft) -> Result<Project, sqlx::Error> {
        ProjectRepo::create(&self.pool, input).await
    }

    async fn update(
        &self,
        id: DbId,
        input: &ProjectDraft,
    ) -> Result<Option<Project>, sqlx::Error> {
        ProjectRepo::update(&self.pool, id, input).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        ProjectRepo::delete(&self.pool, id).await
    }

    async fn stats(&self) -> Result<ProjectStats, sqlx::Error> {
        ProjectRepo::stats(&self.pool).await
    }
}

#[async_trait]
impl ContactStore for PgStore {
    async fn create(&self, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        ContactRepo::create(&self.pool, input).await
    }

    async fn list(&self, status: Option<ContactStatus>) -> Result<Vec<Contact>, sqlx::Error> {
        ContactRepo::list(&self.pool, status).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Contact>, sqlx::Error> {
        ContactRepo::find_by_id(&self.pool, id).await
    }

    async fn mark_read(&self, id: DbId) -> Result<Option<Contact>, sqlx::Error> {
        ContactRepo::mark_read(&self.pool, id).await
    }

    async fn update_status(
        &self,
        id: DbId,
        input: &UpdateContactStatus,
    ) -> Result<Option<Contact>, sqlx::Error> {
        ContactRepo::update_status(&self.pool, id, input).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        ContactRepo::delete(&self.pool, id).await
    }

    async fn stats(&self) -> Result<ContactStats, sqlx::Error> {
        ContactRepo::stats(&self.pool).await
    }
}

#[async_trait]
impl StoreHealth for PgStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
