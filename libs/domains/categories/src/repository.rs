use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::CategoryResult;
use crate::models::Category;

/// Data access for categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: Category) -> CategoryResult<Category>;

    async fn get_by_id(&self, id: ObjectId) -> CategoryResult<Option<Category>>;

    async fn list(&self) -> CategoryResult<Vec<Category>>;

    /// Replace the stored document; `None` when nothing has `category.id`.
    async fn replace(&self, category: Category) -> CategoryResult<Option<Category>>;

    /// `true` if a document was removed
    async fn delete(&self, id: ObjectId) -> CategoryResult<bool>;

    async fn exists(&self, id: ObjectId) -> CategoryResult<bool>;
}
