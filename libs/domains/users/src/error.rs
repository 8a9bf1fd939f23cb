use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(ObjectId),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    /// Unknown email and wrong password look the same to the caller
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound("The user was not found".to_string()),
            UserError::DuplicateEmail(email) => {
                AppError::Conflict(format!("User with email '{email}' already exists"))
            }
            UserError::InvalidCredentials => AppError::BadRequest("Invalid credentials".to_string()),
            UserError::PasswordHash(msg) | UserError::Token(msg) | UserError::Database(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}
