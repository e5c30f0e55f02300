use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::template::{TemplateError, TransferError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error("Nothing to import: the request body is empty")]
    EmptyImport,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Check if running in production mode (based on RUN_MODE env var)
fn is_production() -> bool {
    std::env::var("RUN_MODE")
        .map(|m| m == "production" || m == "prod")
        .unwrap_or(false)
}

/// Hide internal details from clients in production
fn redact(log_message: &str, generic: &str) -> String {
    if is_production() {
        generic.to_string()
    } else {
        log_message.to_string()
    }
}

impl AppError {
    /// Status code and machine-readable error code
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Template(TemplateError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "TEMPLATE_NOT_FOUND")
            }
            AppError::Template(TemplateError::BlankName) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            AppError::Transfer(TransferError::Export(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_FAILED")
            }
            AppError::Transfer(e) => (StatusCode::BAD_REQUEST, e.code()),
            AppError::EmptyImport => (StatusCode::BAD_REQUEST, "EMPTY_IMPORT"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let log_message = self.to_string();

        let client_message = match &self {
            AppError::Transfer(TransferError::Export(_)) => {
                redact(&log_message, "Internal server error")
            }
            _ => log_message.clone(),
        };

        if status.is_server_error() {
            tracing::error!(
                code = %code,
                status = %status.as_u16(),
                message = %log_message,
                "API error"
            );
        } else {
            tracing::warn!(
                code = %code,
                status = %status.as_u16(),
                message = %log_message,
                "API request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: client_message,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::from(TemplateError::NotFound("x".into()));
        assert_eq!(
            err.status_and_code(),
            (StatusCode::NOT_FOUND, "TEMPLATE_NOT_FOUND")
        );
        assert_eq!(err.to_string(), "Template not found: x");
    }

    #[test]
    fn test_import_errors_are_distinct() {
        let syntax = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::from(TransferError::InvalidJson(syntax));
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "INVALID_JSON"));

        let err = AppError::from(TransferError::InvalidFormat("missing field".into()));
        assert_eq!(
            err.status_and_code(),
            (StatusCode::BAD_REQUEST, "INVALID_FORMAT")
        );
    }

    #[test]
    fn test_validation_is_bad_request() {
        let err = AppError::Validation("empty update".into());
        assert_eq!(
            err.status_and_code(),
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        );
    }

    #[test]
    fn test_blank_name_is_validation_error() {
        let err = AppError::from(TemplateError::BlankName);
        assert_eq!(
            err.status_and_code(),
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        );
    }

    #[test]
    fn test_export_failure_is_server_error() {
        let cause = serde_json::from_str::<serde_json::Value>("").unwrap_err();
        let err = AppError::from(TransferError::Export(cause));
        assert_eq!(
            err.status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_FAILED")
        );
    }
}
