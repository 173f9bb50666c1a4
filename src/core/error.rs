//! Typed error handling for the conference API
//!
//! Every failure that reaches the HTTP boundary is an [`ApiError`], and every
//! [`ApiError`] renders as a `{"message": ...}` body with a matching status
//! code.
//!
//! # Error Categories
//!
//! - [`ApiError::Resolution`]: a client-supplied reference did not resolve (400)
//! - [`ApiError::NotFound`]: the addressed entity does not exist (404)
//! - [`ApiError::MalformedRequest`]: unparsable or incomplete body (400)
//! - [`ApiError::MethodNotSupported`]: the route does not implement the method (405)
//! - [`ApiError::Encoding`]: the encoder contract was violated (500)
//! - [`ApiError::Storage`]: the entity store failed (500)
//!
//! Server-side failures never leak their details to the client; they are
//! logged and answered with a generic message.

use crate::core::entity::EntityKind;
use crate::encoding::EncodingError;
use crate::resolver::ResolutionError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Message returned for every 5xx response
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// The error type returned by every handler
#[derive(Debug)]
pub enum ApiError {
    /// A reference field did not match any stored entity
    Resolution(ResolutionError),

    /// Entity was not found
    NotFound { kind: EntityKind },

    /// Request body is not valid JSON or lacks required structure
    MalformedRequest { message: String },

    /// The route does not implement the requested method
    MethodNotSupported,

    /// The encoder was handed a value outside its contract
    Encoding(EncodingError),

    /// The entity store failed
    Storage(anyhow::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Resolution(e) => write!(f, "{}", e),
            ApiError::NotFound { kind } => write!(f, "{} not found", kind.label()),
            ApiError::MalformedRequest { message } => write!(f, "{}", message),
            ApiError::MethodNotSupported => write!(f, "Method not allowed"),
            ApiError::Encoding(e) => write!(f, "Encoding contract violated: {}", e),
            ApiError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Resolution(e) => Some(e),
            ApiError::Encoding(e) => Some(e),
            ApiError::Storage(e) => Some(&**e),
            _ => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn not_found(kind: EntityKind) -> Self {
        ApiError::NotFound { kind }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        ApiError::MalformedRequest {
            message: message.into(),
        }
    }

    /// A create payload omitted a required field
    pub fn missing_field(field: &str) -> Self {
        Self::malformed(format!("Missing field '{}'", field))
    }

    /// A collection route received a method that needs an item id
    pub fn missing_id(kind: EntityKind) -> Self {
        Self::malformed(format!("Missing {} ID", kind.singular()))
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Resolution(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MalformedRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::MethodNotSupported => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error is the server's fault
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        let message = if self.is_internal() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };
        ErrorResponse { message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_internal() {
            tracing::error!(error = %self, "request failed");
        } else if let ApiError::Resolution(_) = &self {
            tracing::warn!(error = %self, "reference did not resolve");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(self.to_response())).into_response()
    }
}

impl From<ResolutionError> for ApiError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Lookup(e) => ApiError::Storage(e),
            other => ApiError::Resolution(other),
        }
    }
}

impl From<EncodingError> for ApiError {
    fn from(err: EncodingError) -> Self {
        ApiError::Encoding(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(err)
    }
}

/// Take a required create field out of its optional input slot
pub fn require<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::missing_field(field))
}
