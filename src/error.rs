//! HTTP-facing error type.
//!
//! Every failure leaving a handler is an [`AppError`], rendered as
//!
//! ```json
//! { "error": { "code": "not_found", "message": "...", "details": { ... } } }
//! ```
//!
//! Retryable failures additionally carry a `Retry-After` header.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::errors::LinkError;

/// Seconds a client should wait before retrying a retryable failure.
pub const RETRY_AFTER_SECS: u64 = 1;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Unavailable {
        code: &'static str,
        message: String,
        details: Value,
        retry_after: Option<u64>,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            code,
            message: message.into(),
            details,
            retry_after: None,
        }
    }

    /// Adds a `Retry-After` hint. Only 503 responses carry it.
    pub fn with_retry_after(mut self, secs: u64) -> Self {
        if let Self::Unavailable { retry_after, .. } = &mut self {
            *retry_after = Some(secs);
        }
        self
    }

    /// `Retry-After` value in seconds, if any.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Unavailable { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Unavailable {
                code,
                message,
                details,
                ..
            } => (*code, message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Unavailable { message, .. } = &self {
            tracing::error!(error = %message, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (self.status(), Json(body)).into_response();
        if let Some(secs) = self.retry_after() {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, header::HeaderValue::from(secs));
        }
        response
    }
}

impl From<LinkError> for AppError {
    fn from(err: LinkError) -> Self {
        let message = err.to_string();
        let retryable = err.is_retryable();

        let app_err = match err {
            LinkError::InvalidTarget(reason) => {
                AppError::bad_request(message, json!({ "field": "targetUrl", "reason": reason }))
            }
            LinkError::InvalidCode(code) => {
                AppError::bad_request(message, json!({ "field": "customCode", "code": code }))
            }
            LinkError::CodeConflict(code) => AppError::conflict(message, json!({ "code": code })),
            LinkError::CodeNotFound(code) => AppError::not_found(message, json!({ "code": code })),
            LinkError::AllocationExhausted { attempts } => AppError::unavailable(
                "allocation_exhausted",
                message,
                json!({ "attempts": attempts }),
            ),
            LinkError::StoreUnavailable(reason) => {
                tracing::warn!(%reason, "Link store call failed");
                AppError::unavailable("store_unavailable", "Link store unavailable", json!({}))
            }
        };

        if retryable {
            app_err.with_retry_after(RETRY_AFTER_SECS)
        } else {
            app_err
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        AppError::bad_request(
            "Request validation failed",
            json!({ "fields": fields, "errors": errors }),
        )
    }
}
