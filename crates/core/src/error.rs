//! Domain-level error type shared across crates.

use crate::types::EntityId;

/// Errors produced by domain logic and repository callers.
///
/// The API layer maps each variant onto an HTTP status code; see
/// `tea-api`'s `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The addressed entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        entity: &'static str,
        id: EntityId,
    },

    /// A request failed validation (missing field, bad identifier,
    /// invalid lifecycle transition).
    #[error("{0}")]
    Validation(String),

    /// The request conflicts with existing state (duplicate association).
    #[error("{0}")]
    Conflict(String),

    /// The caller supplied no usable credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// The addressed entity belongs to a different organization.
    #[error("{0}")]
    Forbidden(String),

    /// An unexpected internal failure. Never surfaced verbatim to callers.
    #[error("{0}")]
    Internal(String),
}
