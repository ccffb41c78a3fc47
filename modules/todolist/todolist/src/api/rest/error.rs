use api_gateway::Problem;
use axum::extract::rejection::JsonRejection;
use http::StatusCode;

use crate::domain::error::DomainError;

const VALIDATION_TITLE: &str = "Validation Failed";

fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

/// Map domain error to RFC9457 Problem
#[must_use]
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let problem = match e {
        DomainError::NotFound { id } => {
            Problem::not_found(format!("Todo with id {id} was not found"))
        }
        DomainError::IdAlreadyExists { id } => Problem::new(
            StatusCode::CONFLICT,
            "Conflict",
            format!("Todo with id '{id}' already exists"),
        ),
        DomainError::EmptyId
        | DomainError::EmptyDescription
        | DomainError::DescriptionTooLong { .. }
        | DomainError::Validation { .. } => Problem::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            VALIDATION_TITLE,
            e.to_string(),
        ),
        DomainError::Forbidden { reason } => Problem::forbidden(reason.clone()),
        DomainError::Unclassifiable => Problem::new(
            StatusCode::UNAUTHORIZED,
            "Unclassifiable token",
            "The token is neither a user token nor an application token",
        ),
        DomainError::MalformedClaims { message } => Problem::unauthorized(message.clone()),
        DomainError::Storage { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = %e, "Todo storage error");
            Problem::internal()
        }
    };

    problem
        .with_instance(instance)
        .with_trace_id(current_trace_id())
}

/// Map an axum JSON body rejection: syntax errors are 400, shape errors 422.
#[must_use]
pub fn json_rejection_to_problem(rejection: &JsonRejection, instance: &str) -> Problem {
    let status = rejection.status();
    let title = if status == StatusCode::UNPROCESSABLE_ENTITY {
        VALIDATION_TITLE
    } else {
        status.canonical_reason().unwrap_or("Bad Request")
    };

    Problem::new(status, title, rejection.body_text())
        .with_instance(instance)
        .with_trace_id(current_trace_id())
}
