//! Machine-readable error kinds carried in every error envelope.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidObjectId;
//! assert_eq!(code.as_str(), "INVALID_OBJECT_ID");
//! assert_eq!(code.code(), 1002);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body failed field validation
    ValidationError,

    /// Path or query id is not a 24-char hex ObjectId
    InvalidObjectId,

    /// Request body could not be read as JSON
    JsonExtraction,

    NotFound,

    /// Bearer token missing, malformed or expired
    Unauthorized,

    /// Token valid but lacks the admin role
    Forbidden,

    /// Unique constraint hit (e.g. duplicate email)
    Conflict,

    /// Generic client error, e.g. an unknown referenced category
    BadRequest,

    /// Upload rejected because of its MIME type
    UnsupportedMediaType,

    PayloadTooLarge,

    // Server errors (5000-5999)
    InternalError,

    ServiceUnavailable,

    /// MongoDB driver or server failure
    DatabaseError,

    /// Writing an uploaded file failed
    StorageError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidObjectId => "INVALID_OBJECT_ID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::BadRequest => "BAD_REQUEST",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::StorageError => "STORAGE_ERROR",
        }
    }

    /// Integer code for logs and dashboards.
    ///
    /// - 1000-1999: client errors
    /// - 5000-5999: server errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidObjectId => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::Unauthorized => 1005,
            Self::Forbidden => 1006,
            Self::Conflict => 1007,
            Self::BadRequest => 1008,
            Self::UnsupportedMediaType => 1009,
            Self::PayloadTooLarge => 1010,

            Self::InternalError => 5001,
            Self::ServiceUnavailable => 5002,
            Self::DatabaseError => 5003,
            Self::StorageError => 5004,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidObjectId => "Invalid id format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::Unauthorized => "The user is not authorized",
            Self::Forbidden => "Admin access required",
            Self::Conflict => "Resource already exists",
            Self::BadRequest => "Bad request",
            Self::UnsupportedMediaType => "Invalid image type",
            Self::PayloadTooLarge => "Upload is too large",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "Database error occurred",
            Self::StorageError => "Failed to store uploaded file",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
