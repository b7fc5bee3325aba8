//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the Jagriti case search API, covering
//! caller-input validation, portal-side failures, and response
//! normalization problems.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from the validator, portal client, and normalizer
//! - **Output**: Structured error types with an HTTP status mapping
//! - **Error Categories**: Validation, Lookup, Upstream, Normalization, Configuration
//!
//! ## Key Features
//! - Single error enum shared by every component
//! - Field-level validation failures surfaced as 400 responses
//! - Upstream failures kept distinct from internal ones (502 vs 500)
//! - Structured logging integration

use actix_web::http::StatusCode;
use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, ApiError>;

/// Error taxonomy for the case search adapter
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input failed validation
    #[error("Validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Unknown state or commission identifier
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The portal could not be reached (network failure or timeout)
    #[error("Jagriti portal unavailable: {details}")]
    UpstreamUnavailable { details: String },

    /// The portal answered with a non-success status or an unusable body
    #[error("Jagriti portal returned a bad response: {details}")]
    UpstreamBadResponse { details: String },

    /// Portal payload could not be shaped into case records
    #[error("Failed to normalize portal response: {details}")]
    Normalization { details: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Internal system errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// HTTP status the error maps to at the API boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::UpstreamUnavailable { .. } | ApiError::UpstreamBadResponse { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::Normalization { .. }
            | ApiError::Config { .. }
            | ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Reason phrase used in the JSON error body
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::ValidationFailed { .. } => "Bad Request",
            ApiError::NotFound { .. } => "Not Found",
            ApiError::UpstreamUnavailable { .. } | ApiError::UpstreamBadResponse { .. } => {
                "Bad Gateway"
            }
            ApiError::Normalization { .. }
            | ApiError::Config { .. }
            | ApiError::Internal { .. } => "Internal Server Error",
        }
    }

    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::ValidationFailed { .. } => "validation",
            ApiError::NotFound { .. } => "lookup",
            ApiError::UpstreamUnavailable { .. } | ApiError::UpstreamBadResponse { .. } => {
                "upstream"
            }
            ApiError::Normalization { .. } => "normalization",
            ApiError::Config { .. } => "configuration",
            ApiError::Internal { .. } => "internal",
        }
    }
}

// Conversion from common error types
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            ApiError::UpstreamUnavailable {
                details: err.to_string(),
            }
        } else {
            ApiError::UpstreamBadResponse {
                details: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::UpstreamBadResponse {
            details: format!("JSON decode error: {}", err),
        }
    }
}

// Helper macro for common validation failures
#[macro_export]
macro_rules! validation_error {
    ($field:expr, $reason:expr) => {
        $crate::errors::ApiError::ValidationFailed {
            field: $field.to_string(),
            reason: $reason.to_string(),
        }
    };
}
