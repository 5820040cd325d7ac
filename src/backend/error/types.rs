/**
 * Backend Error Types
 *
 * `BackendError` aggregates the per-layer error enums. Each variant maps to a
 * stable `kind` string and an HTTP status code. Validation, guard and engine
 * failures are raised before any store write; `Store` failures may happen
 * part way through a multi-document mutation and are never followed by a
 * fan-out event.
 */
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::sessions::AuthError;
use crate::backend::ordering::OrderingError;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Malformed or incomplete request data
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// Referenced entity does not exist
    #[error("{resource} not found")]
    NotFound {
        resource: &'static str,
        id: String,
    },

    /// Caller may not perform this operation on the resource
    #[error("{message}")]
    AccessDenied { message: String },

    /// Ordering contract violation (or stale expected version)
    #[error(transparent)]
    Ordering(#[from] OrderingError),

    /// Durable store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Missing, invalid or expired credentials
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Response serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BackendError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied {
            message: message.into(),
        }
    }

    /// Validation failure on a named request field
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(SharedError::validation(field, message))
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::AccessDenied { .. } => StatusCode::FORBIDDEN,
            Self::Ordering(err) => match err {
                OrderingError::InvalidSequence { .. } | OrderingError::InvalidIndex { .. } => {
                    StatusCode::BAD_REQUEST
                }
                OrderingError::DuplicateMember { .. } | OrderingError::Conflict { .. } => {
                    StatusCode::CONFLICT
                }
            },
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) if err.is_internal() => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::NotFound { .. } => "NotFound",
            Self::AccessDenied { .. } => "AccessDenied",
            Self::Ordering(OrderingError::DuplicateMember { .. }) => "DuplicateMember",
            Self::Ordering(OrderingError::InvalidSequence { .. }) => "InvalidSequence",
            Self::Ordering(OrderingError::InvalidIndex { .. }) => "InvalidIndex",
            Self::Ordering(OrderingError::Conflict { .. }) => "ConflictError",
            Self::Store(_) => "StoreError",
            Self::Auth(err) if err.is_internal() => "StoreError",
            Self::Auth(_) => "Unauthorized",
            Self::Serialization(_) => "StoreError",
        }
    }

    /// Message shown to clients. Server-side failures are not described.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(SharedError::ValidationError { message, .. }) => message.clone(),
            Self::Validation(err) => err.to_string(),
            Self::AccessDenied { message } => message.clone(),
            err if err.status_code().is_server_error() => "Server error".to_string(),
            err => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_not_found() {
        let err = BackendError::not_found("Board", Uuid::nil());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.kind(), "NotFound");
        assert_eq!(err.message(), "Board not found");
    }

    #[test]
    fn test_validation_message_is_bare() {
        let err = BackendError::validation("title", "title is required.");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "title is required.");
    }

    #[test]
    fn test_ordering_mapping() {
        let cases = [
            (OrderingError::DuplicateMember { member: Uuid::nil() }, StatusCode::CONFLICT, "DuplicateMember"),
            (OrderingError::invalid_sequence("x"), StatusCode::BAD_REQUEST, "InvalidSequence"),
            (OrderingError::invalid_index("x"), StatusCode::BAD_REQUEST, "InvalidIndex"),
            (OrderingError::Conflict { expected: 1, actual: 2 }, StatusCode::CONFLICT, "ConflictError"),
        ];
        for (ordering, status, kind) in cases {
            let err = BackendError::from(ordering);
            assert_eq!(err.status_code(), status);
            assert_eq!(err.kind(), kind);
        }
    }

    #[test]
    fn test_store_error_hides_details() {
        let err = BackendError::from(StoreError::Unavailable("pool closed".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), "StoreError");
        assert_eq!(err.message(), "Server error");
    }

    #[test]
    fn test_auth_errors() {
        let err = BackendError::from(AuthError::MissingToken);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.kind(), "Unauthorized");

        let err = BackendError::from(AuthError::Hashing("boom".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
