//! Public error types for the `todolist` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;

/// Errors that can be returned by the `TodoListClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoListError {
    /// No todo with this id is visible to the caller.
    #[error("Todo not found: {id}")]
    NotFound { id: String },

    /// A todo with the specified id already exists.
    #[error("Todo with id '{id}' already exists")]
    Conflict { id: String },

    /// Validation error with the provided data.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The token's claims do not grant the operation.
    #[error("Access denied: {reason}")]
    Forbidden { reason: String },

    /// The token's claims are malformed or incomplete.
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// The token cannot be classified as a user or an application token.
    #[error("Unclassifiable token")]
    Unclassifiable,

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl TodoListError {
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    #[must_use]
    pub fn conflict(id: impl Into<String>) -> Self {
        Self::Conflict { id: id.into() }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
