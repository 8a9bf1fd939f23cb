use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_products::ProductError;
use domain_users::UserError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(ObjectId),

    /// A line item's product id is malformed or names no stored product
    #[error("Invalid Product")]
    InvalidProduct,

    /// The owner id is malformed or names no stored user
    #[error("Invalid User")]
    InvalidUser,

    #[error("Database error: {0}")]
    Database(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(_) => AppError::NotFound("the order was not found!".to_string()),
            OrderError::InvalidProduct => AppError::BadRequest("Invalid Product".to_string()),
            OrderError::InvalidUser => AppError::BadRequest("Invalid User".to_string()),
            OrderError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for OrderError {
    fn from(err: mongodb::error::Error) -> Self {
        OrderError::Database(err.to_string())
    }
}

/// Only lookups cross into the products domain, so anything it reports is a
/// store failure.
impl From<ProductError> for OrderError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Database(msg) => OrderError::Database(msg),
            other => OrderError::Database(other.to_string()),
        }
    }
}

impl From<UserError> for OrderError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Database(msg) => OrderError::Database(msg),
            other => OrderError::Database(other.to_string()),
        }
    }
}
