//! Contact Service: public submission and the admin triage workflow.
//!
//! Messages move `new -> read -> responded`. Viewing a `new` message marks it
//! read as part of the same call; explicit status updates accept any target.

use std::sync::Arc;

use folio_core::contact::ContactStatus;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::contact::{Contact, ContactStats, CreateContact, UpdateContactStatus};
use folio_db::store::ContactStore;
use validator::Validate;

use crate::error::AppResult;

#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    /// Record a new message. Every call creates a record with status `new`.
    pub async fn submit(&self, input: CreateContact) -> AppResult<Contact> {
        let input = input.trimmed();
        input.validate().map_err(CoreError::from)?;

        let contact = self.store.create(&input).await?;
        tracing::info!(contact_id = contact.id, "Contact message received");
        Ok(contact)
    }

    pub async fn list(&self, status: Option<ContactStatus>) -> AppResult<Vec<Contact>> {
        Ok(self.store.list(status).await?)
    }

    /// Fetch one message, advancing it from `new` to `read`.
    pub async fn view_one(&self, id: DbId) -> AppResult<Contact> {
        let contact = self.find(id).await?;
        if contact.status.next_on_view().is_none() {
            return Ok(contact);
        }

        match self.store.mark_read(id).await? {
            Some(updated) => {
                tracing::info!(contact_id = id, "Contact message marked read");
                Ok(updated)
            }
            // Another writer moved it first; report what is stored now.
            None => self.find(id).await,
        }
    }

    /// Set status and/or admin notes. Backward moves are allowed.
    pub async fn update_status(&self, id: DbId, input: UpdateContactStatus) -> AppResult<Contact> {
        if input.is_empty() {
            return Err(CoreError::Validation("status or adminNotes is required".into()).into());
        }

        let current = self.find(id).await?;
        if let Some(target) = input.status {
            if !current.status.is_forward_to(target) {
                tracing::warn!(
                    contact_id = id,
                    from = %current.status,
                    to = %target,
                    "Contact status moved backwards"
                );
            }
        }

        self.store
            .update_status(id, &input)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(not_found(id).into());
        }
        Ok(())
    }

    pub async fn stats(&self) -> AppResult<ContactStats> {
        Ok(self.store.stats().await?)
    }

    async fn find(&self, id: DbId) -> AppResult<Contact> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Contact",
        id,
    }
}
