use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_categories::CategoryError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ObjectId),

    /// The body's category id is malformed or names no stored category
    #[error("Invalid Category")]
    InvalidCategory,

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid image type: {0}")]
    UnsupportedMediaType(String),

    #[error("No file in part '{0}'")]
    MissingFile(&'static str),

    #[error("Unexpected field '{0}'")]
    UnexpectedField(String),

    #[error("Too many files: at most {0} allowed")]
    TooManyFiles(usize),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Product not found!".to_string()),
            ProductError::InvalidCategory => AppError::BadRequest("Invalid Category".to_string()),
            ProductError::InvalidId(raw) => AppError::InvalidObjectId(raw),
            ProductError::UnsupportedMediaType(mime) => {
                AppError::UnsupportedMediaType(format!("Invalid image type: {mime}"))
            }
            ProductError::MissingFile(part) => {
                AppError::BadRequest(format!("No image in the request (expected part '{part}')"))
            }
            ProductError::UnexpectedField(name) => {
                AppError::BadRequest(format!("Unexpected field '{name}'"))
            }
            ProductError::TooManyFiles(max) => {
                AppError::BadRequest(format!("At most {max} images per request"))
            }
            ProductError::Storage(msg) => AppError::Storage(msg),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

/// A category missing at lookup time is an invalid reference.
impl From<CategoryError> for ProductError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(_) => ProductError::InvalidCategory,
            CategoryError::Database(msg) => ProductError::Database(msg),
        }
    }
}

impl From<std::io::Error> for ProductError {
    fn from(err: std::io::Error) -> Self {
        ProductError::Storage(err.to_string())
    }
}
