use authz_resolver_sdk::EnforcerError;
use thiserror::Error;
use todolist_sdk::TodoListError;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Todo not found: {id}")]
    NotFound { id: String },

    #[error("Todo with id '{id}' already exists")]
    IdAlreadyExists { id: String },

    #[error("Todo id cannot be empty")]
    EmptyId,

    #[error("Description cannot be empty")]
    EmptyDescription,

    #[error("Description too long: {len} characters (max: {max})")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Access denied: {reason}")]
    Forbidden { reason: String },

    #[error("Unclassifiable token")]
    Unclassifiable,

    #[error("Malformed claims: {message}")]
    MalformedClaims { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    #[must_use]
    pub fn id_already_exists(id: impl Into<String>) -> Self {
        Self::IdAlreadyExists { id: id.into() }
    }

    #[must_use]
    pub fn description_too_long(len: usize, max: usize) -> Self {
        Self::DescriptionTooLong { len, max }
    }

    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for TodoListError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::NotFound { id } => TodoListError::not_found(id),
            DomainError::IdAlreadyExists { id } => TodoListError::conflict(id),
            e @ (DomainError::EmptyId
            | DomainError::EmptyDescription
            | DomainError::DescriptionTooLong { .. }) => TodoListError::validation(e.to_string()),
            DomainError::Validation { field, message } => {
                TodoListError::validation(format!("{field}: {message}"))
            }
            DomainError::Forbidden { reason } => TodoListError::forbidden(reason),
            DomainError::Unclassifiable => TodoListError::Unclassifiable,
            DomainError::MalformedClaims { message } => TodoListError::unauthorized(message),
            DomainError::Storage { .. } => TodoListError::internal(),
        }
    }
}

impl From<EnforcerError> for DomainError {
    fn from(e: EnforcerError) -> Self {
        tracing::debug!(error = %e, "Authorization rejected");
        match e {
            EnforcerError::Denied { reason, .. } => Self::Forbidden {
                reason: reason.to_string(),
            },
            EnforcerError::Unclassifiable(_) => Self::Unclassifiable,
            EnforcerError::MalformedClaims(err) => Self::MalformedClaims {
                message: err.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::storage(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::storage(e.to_string())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use authz_resolver_sdk::{Action, DenyReason};
    use claims_security::{ClassificationError, TokenKind};

    #[test]
    fn enforcer_errors_map_to_distinct_domain_errors() {
        let denied = DomainError::from(EnforcerError::Denied {
            action: Action::Get,
            reason: DenyReason::MissingPermission(TokenKind::User),
        });
        assert_eq!(
            denied,
            DomainError::Forbidden {
                reason: "user does not have the required permissions".to_owned()
            }
        );

        let ambiguous = DomainError::from(EnforcerError::Unclassifiable(
            ClassificationError::Ambiguous,
        ));
        assert_eq!(ambiguous, DomainError::Unclassifiable);
    }

    #[test]
    fn storage_details_do_not_reach_sdk_callers() {
        let err = TodoListError::from(DomainError::storage("disk full at /var/lib/x"));
        assert_eq!(err, TodoListError::Internal);
    }

    #[test]
    fn validation_messages_are_preserved() {
        let err = TodoListError::from(DomainError::description_too_long(2000, 1024));
        assert_eq!(
            err,
            TodoListError::validation("Description too long: 2000 characters (max: 1024)")
        );
    }
}
