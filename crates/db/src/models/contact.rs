//! Contact message model and DTOs.

use folio_core::contact::ContactStatus;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `contacts` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[sqlx(try_from = "String")]
    pub status: ContactStatus,
    pub admin_notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the public contact form. New messages always start as `new`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateContact {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

impl CreateContact {
    /// Trim surrounding whitespace so blank input fails validation.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

/// DTO for an admin status change. Absent fields are left unchanged; any
/// target status is accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactStatus {
    pub status: Option<ContactStatus>,
    pub admin_notes: Option<String>,
}

impl UpdateContactStatus {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.admin_notes.is_none()
    }
}

/// Message counts per triage status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactStats {
    pub total_messages: i64,
    pub new_messages: i64,
    pub read_messages: i64,
    pub responded_messages: i64,
}
