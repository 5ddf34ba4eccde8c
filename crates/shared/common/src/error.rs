//! Unified error handling for HTTP and gRPC.
//!
//! Provides a single error type that can be converted to:
//! - Axum HTTP responses (for API gateway)
//! - Tonic gRPC status codes (for microservices)
//!
//! The gateway converts a received [`Status`] back into an [`AppError`], so a
//! client sees the same HTTP status whichever hop produced the failure.

use std::num::ParseIntError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use tonic::Status;

/// Application error types with support for both HTTP and gRPC.
#[derive(Error, Debug)]
pub enum AppError {
    // Lookup & credentials
    #[error("user not found")]
    NotFound,

    #[error("wrong password")]
    WrongPassword,

    // Write conflicts
    #[error("user {0} already exists")]
    DuplicateKey(String),

    // Validation
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid age: {0}")]
    AgeNotInteger(#[from] ParseIntError),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // gRPC specific
    #[error("Service unavailable")]
    ServiceUnavailable(String),

    #[error("gRPC error: {0}")]
    Grpc(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::WrongPassword => "WRONG_PASSWORD",
            AppError::DuplicateKey(_) => "DUPLICATE_KEY",
            AppError::MissingField(_) => "MISSING_FIELD",
            AppError::AgeNotInteger(_) => "INVALID_AGE",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::Grpc(_) => "GRPC_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::WrongPassword => StatusCode::UNAUTHORIZED,
            AppError::DuplicateKey(_)
            | AppError::MissingField(_)
            | AppError::AgeNotInteger(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Grpc(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get gRPC status code
    pub fn grpc_code(&self) -> tonic::Code {
        match self {
            AppError::NotFound => tonic::Code::NotFound,
            AppError::WrongPassword => tonic::Code::Unauthenticated,
            AppError::DuplicateKey(_) => tonic::Code::AlreadyExists,
            AppError::MissingField(_) | AppError::AgeNotInteger(_) | AppError::BadRequest(_) => {
                tonic::Code::InvalidArgument
            }
            AppError::ServiceUnavailable(_) => tonic::Code::Unavailable,
            AppError::Grpc(_) | AppError::Internal(_) => tonic::Code::Internal,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),

            // Hide details for internal errors
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::ServiceUnavailable(service) => {
                tracing::error!("Service unavailable: {}", service);
                format!("Service {} is unavailable", service)
            }
            AppError::Grpc(msg) => {
                tracing::error!("gRPC error: {}", msg);
                "A service communication error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// gRPC Status (Tonic)
// =============================================================================

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        Status::new(err.grpc_code(), err.user_message())
    }
}

impl From<Status> for AppError {
    fn from(status: Status) -> Self {
        match status.code() {
            tonic::Code::NotFound => AppError::NotFound,
            tonic::Code::Unauthenticated => AppError::WrongPassword,
            tonic::Code::AlreadyExists => AppError::DuplicateKey(duplicate_field(status.message())),
            tonic::Code::InvalidArgument => AppError::BadRequest(status.message().to_string()),
            tonic::Code::Unavailable | tonic::Code::DeadlineExceeded => {
                AppError::ServiceUnavailable(status.message().to_string())
            }
            _ => AppError::Grpc(status.message().to_string()),
        }
    }
}

/// Recover the field name from a `user <field> already exists` message.
fn duplicate_field(message: &str) -> String {
    message
        .strip_prefix("user ")
        .and_then(|rest| rest.strip_suffix(" already exists"))
        .unwrap_or(message)
        .to_string()
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Hashing(msg) => AppError::Internal(format!("password hashing: {}", msg)),
            DomainError::RandomSource(msg) => AppError::Internal(format!("random source: {}", msg)),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn duplicate_key(field: impl Into<String>) -> Self {
        AppError::DuplicateKey(field.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn service_unavailable(service: impl Into<String>) -> Self {
        AppError::ServiceUnavailable(service.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::WrongPassword.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::duplicate_key("name").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MissingField("id").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_age_parse_error_converts() {
        let err: AppError = "thirty".parse::<i32>().unwrap_err().into();

        assert!(matches!(err, AppError::AgeNotInteger(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_messages() {
        assert_eq!(AppError::NotFound.to_string(), "user not found");
        assert_eq!(AppError::WrongPassword.to_string(), "wrong password");
        assert_eq!(
            AppError::duplicate_key("name").to_string(),
            "user name already exists"
        );
        assert_eq!(AppError::MissingField("password").to_string(), "missing password");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::internal("connection refused at 10.0.0.3");
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_status_round_trip_keeps_kind() {
        let cases = [
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (AppError::WrongPassword, StatusCode::UNAUTHORIZED),
            (AppError::duplicate_key("name"), StatusCode::BAD_REQUEST),
            (AppError::MissingField("name"), StatusCode::BAD_REQUEST),
            (AppError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let back = AppError::from(Status::from(err));
            assert_eq!(back.status(), expected);
        }
    }

    #[test]
    fn test_duplicate_key_field_survives_grpc() {
        let status = Status::from(AppError::duplicate_key("name"));
        assert_eq!(status.code(), tonic::Code::AlreadyExists);

        match AppError::from(status) {
            AppError::DuplicateKey(field) => assert_eq!(field, "name"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_domain_errors_are_internal() {
        let err = AppError::from(DomainError::RandomSource("closed".to_string()));
        assert!(matches!(err, AppError::Internal(_)));

        let err = AppError::from(DomainError::hashing("out of memory"));
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
