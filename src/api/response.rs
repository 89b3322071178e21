//! Response types for the Warfot Presensi API.
//!
//! This module defines the JSON error body and the mapping from
//! [`PresensiError`] to HTTP status codes.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::PresensiError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Wraps an error body with a 400 status.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let error = match rejection {
            JsonRejection::JsonDataError(err) => {
                let body_text = err.body_text();
                if body_text.contains("missing field") {
                    ApiError::validation_error(body_text)
                } else {
                    ApiError::malformed_json(body_text)
                }
            }
            JsonRejection::JsonSyntaxError(err) => {
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            _ => ApiError::malformed_json("Failed to parse request body"),
        };
        Self::bad_request(error)
    }
}

impl From<QueryRejection> for ApiErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(ApiError::validation_error(rejection.body_text()))
    }
}

impl From<PresensiError> for ApiErrorResponse {
    fn from(error: PresensiError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            PresensiError::ConfigNotFound { .. }
            | PresensiError::ConfigParseError { .. }
            | PresensiError::InvalidSetting { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            PresensiError::StoreError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORE_ERROR", "Storage failure", message),
            ),
            PresensiError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            PresensiError::EmployeeExists { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("EMPLOYEE_EXISTS", message),
            ),
            PresensiError::RecordNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("RECORD_NOT_FOUND", message),
            ),
            PresensiError::AlreadyClockedIn { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "ALREADY_CLOCKED_IN",
                    message,
                    "Only one shift can be recorded per employee per day",
                ),
            ),
            PresensiError::NotClockedIn { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "NOT_CLOCKED_IN",
                    message,
                    "Clock in before clocking out",
                ),
            ),
            PresensiError::InvalidShift { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_SHIFT", message),
            ),
            PresensiError::InvalidEmployee { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_EMPLOYEE", message),
            ),
            PresensiError::InvalidYearMonth { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_YEAR_MONTH", message),
            ),
            PresensiError::InvalidHours { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_HOURS", message),
            ),
        };
        Self { status, error }
    }
}
