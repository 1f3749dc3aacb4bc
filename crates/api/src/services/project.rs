//! Project Service: CRUD, filtered listing, the featured feed, dashboard stats.

use std::sync::Arc;

use folio_core::error::CoreError;
use folio_core::project::{ProjectFilter, FEATURED_LIMIT};
use folio_core::types::DbId;
use folio_db::models::project::{CreateProject, Project, ProjectStats, UpdateProject};
use folio_db::store::ProjectStore;

use crate::error::AppResult;

#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn ProjectStore>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    /// Projects matching every provided predicate, newest first.
    pub async fn list(&self, filter: &ProjectFilter) -> AppResult<Vec<Project>> {
        Ok(self.store.list(filter).await?)
    }

    /// The public home-page feed: featured AND active, newest first, capped.
    pub async fn list_featured(&self) -> AppResult<Vec<Project>> {
        Ok(self.store.list_featured(FEATURED_LIMIT).await?)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Project> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    pub async fn create(&self, input: CreateProject) -> AppResult<Project> {
        let draft = input.into_draft();
        draft.check()?;

        Ok(self.store.create(&draft).await?)
    }

    /// Merge the supplied fields over the stored record, re-validate, and
    /// write every mutable field.
    pub async fn update(&self, id: DbId, input: UpdateProject) -> AppResult<Project> {
        let current = self.get(id).await?;
        let draft = input.apply_to(&current);
        draft.check()?;

        self.store
            .update(id, &draft)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(not_found(id).into());
        }
        Ok(())
    }

    pub async fn dashboard_stats(&self) -> AppResult<ProjectStats> {
        Ok(self.store.stats().await?)
    }
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Project",
        id,
    }
}
