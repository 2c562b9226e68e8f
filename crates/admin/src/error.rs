//! Unified error handling for admin.
//!
//! Every error response has the JSON shape
//! `{"error": ..., "details"?: [...], "fields"?: [{field, code, message}]}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use nature_core::FieldViolation;

use crate::services::CashierError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cashier operation failed.
    #[error(transparent)]
    Cashier(#[from] CashierError),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldViolation>>,
}

impl ErrorBody {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            fields: None,
        }
    }

    fn with_violations(error: impl Into<String>, violations: &[FieldViolation]) -> Self {
        Self {
            error: error.into(),
            details: Some(violations.iter().map(|v| v.message.clone()).collect()),
            fields: Some(violations.to_vec()),
        }
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Cashier(err) => match err {
                CashierError::MissingFields(_)
                | CashierError::Validation(_)
                | CashierError::Duplicate(_)
                | CashierError::Conflict(_) => StatusCode::BAD_REQUEST,
                CashierError::NotFound(_) => StatusCode::NOT_FOUND,
                CashierError::UserNamesExhausted(_) | CashierError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Body sent to the client. Server errors carry no detail.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        if self.status().is_server_error() {
            return ErrorBody::message("Internal server error");
        }
        match self {
            Self::Cashier(err) if !err.violations().is_empty() => {
                ErrorBody::with_violations(err.to_string(), err.violations())
            }
            _ => ErrorBody::message(self.to_string()),
        }
    }

    /// Log server errors and send them to Sentry. Client errors are ignored.
    pub fn report(&self) {
        if self.status().is_server_error() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.report();
        (self.status(), Json(self.body())).into_response()
    }
}
