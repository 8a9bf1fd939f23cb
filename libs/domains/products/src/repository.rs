use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ProductResult;
use crate::models::Product;

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: Product) -> ProductResult<Product>;

    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// All products, or only those whose category is in `categories` when
    /// it is non-empty. Store order.
    async fn list(&self, categories: Vec<ObjectId>) -> ProductResult<Vec<Product>>;

    /// Replace the stored document; `None` when nothing has `product.id`.
    async fn replace(&self, product: Product) -> ProductResult<Option<Product>>;

    /// `true` if a document was removed
    async fn delete(&self, id: ObjectId) -> ProductResult<bool>;

    async fn count(&self) -> ProductResult<u64>;

    /// Featured products, at most `limit` of them when given.
    async fn list_featured(&self, limit: Option<u64>) -> ProductResult<Vec<Product>>;

    /// Overwrite the gallery; `None` when the product does not exist.
    async fn set_gallery(&self, id: ObjectId, images: Vec<String>)
    -> ProductResult<Option<Product>>;
}
