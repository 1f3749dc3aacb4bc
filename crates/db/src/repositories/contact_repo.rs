//! Repository for the `contacts` table.

use folio_core::contact::ContactStatus;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact::{Contact, ContactStats, CreateContact, UpdateContactStatus};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, email, subject, message, status, admin_notes, created_at, updated_at";

/// Provides intake, triage and removal of contact messages.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new message with status `new`.
    pub async fn create(pool: &PgPool, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (name, email, subject, message, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.subject)
            .bind(&input.message)
            .bind(ContactStatus::New.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a message by ID without touching its status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List messages, optionally restricted to one status, newest first.
    pub async fn list(
        pool: &PgPool,
        status: Option<ContactStatus>,
    ) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contacts
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Move a message from `new` to `read`.
    ///
    /// Returns `None` when the row does not exist or is no longer `new`.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE contacts SET status = $2
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(ContactStatus::Read.as_str())
            .bind(ContactStatus::New.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Set status and/or admin notes. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContactStatus,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE contacts SET
                status = COALESCE($2, status),
                admin_notes = COALESCE($3, admin_notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(input.status.map(|s| s.as_str()))
            .bind(&input.admin_notes)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a message. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Per-status message counts.
    pub async fn stats(pool: &PgPool) -> Result<ContactStats, sqlx::Error> {
        let query = "\
            SELECT \
                COUNT(*) AS total_messages, \
                COUNT(*) FILTER (WHERE status = 'new') AS new_messages, \
                COUNT(*) FILTER (WHERE status = 'read') AS read_messages, \
                COUNT(*) FILTER (WHERE status = 'responded') AS responded_messages \
            FROM contacts";
        sqlx::query_as::<_, ContactStats>(query)
            .fetch_one(pool)
            .await
    }
}
