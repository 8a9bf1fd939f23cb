use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::JwtAuth;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, LoginRequest, LoginResponse, User, normalize_email};
use crate::repository::UserRepository;

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    auth: JwtAuth,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, auth: JwtAuth) -> Self {
        Self::from_shared(Arc::new(repository), auth)
    }

    pub fn from_shared(repository: Arc<R>, auth: JwtAuth) -> Self {
        Self { repository, auth }
    }

    /// Create a user as given, including `isAdmin`. Admin-only route.
    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        let email = normalize_email(&input.email);
        if self.repository.get_by_email(&email).await?.is_some() {
            return Err(UserError::DuplicateEmail(email));
        }

        let password_hash = hash_password(&input.password)?;
        self.repository.create(User::new(input, password_hash)).await
    }

    /// Public self-registration; never grants admin.
    #[instrument(skip(self, input))]
    pub async fn register(&self, mut input: CreateUser) -> UserResult<User> {
        input.is_admin = false;
        self.create_user(input).await
    }

    /// Check credentials and issue a bearer token.
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<LoginResponse> {
        let email = normalize_email(&input.email);
        let user = self
            .repository
            .get_by_email(&email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "Login rejected");
            return Err(UserError::InvalidCredentials);
        }

        let token = self
            .auth
            .create_token(&user.id.to_hex(), user.is_admin)
            .map_err(|e| UserError::Token(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse {
            user: user.email,
            token,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: ObjectId) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: ObjectId) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn count_users(&self) -> UserResult<u64> {
        self.repository.count().await
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            auth: self.auth.clone(),
        }
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
