use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `DuplicateEmail` if the address is taken
    async fn create(&self, user: User) -> UserResult<User>;

    async fn get_by_id(&self, id: ObjectId) -> UserResult<Option<User>>;

    /// `email` must already be normalized
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn list(&self) -> UserResult<Vec<User>>;

    /// `true` if a document was removed
    async fn delete(&self, id: ObjectId) -> UserResult<bool>;

    async fn count(&self) -> UserResult<u64>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<ObjectId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());
        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: ObjectId) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        // ObjectIds start with their creation second
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn delete(&self, id: ObjectId) -> UserResult<bool> {
        let removed = self.users.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(removed)
    }

    async fn count(&self) -> UserResult<u64> {
        Ok(self.users.read().await.len() as u64)
    }
}
