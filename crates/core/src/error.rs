use crate::types::DbId;

/// Domain error taxonomy shared by every service operation.
///
/// Each operation fails with exactly one of these kinds; the HTTP layer owns
/// the mapping to status codes.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Field-level validation failures from a `validator::Validate` payload.
    #[error("Validation failed: {0}")]
    InvalidFields(#[from] validator::ValidationErrors),

    /// Login failure. Deliberately identical for "no such user" and
    /// "wrong password".
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The backing store did not answer in time or is shut down.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
