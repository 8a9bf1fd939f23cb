//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::Product;
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "products")
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Product>(collection_name),
        }
    }

    /// Indexes backing the category filter and the featured listing.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "isFeatured": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_is_featured".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    fn category_filter(categories: &[ObjectId]) -> Document {
        if categories.is_empty() {
            doc! {}
        } else {
            doc! { "category": { "$in": categories } }
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn create(&self, product: Product) -> ProductResult<Product> {
        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, categories: Vec<ObjectId>) -> ProductResult<Vec<Product>> {
        let cursor = self
            .collection
            .find(Self::category_filter(&categories))
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn replace(&self, product: Product) -> ProductResult<Option<Product>> {
        let updated = self
            .collection
            .find_one_and_replace(doc! { "_id": product.id }, &product)
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!("Product updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count > 0 {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> ProductResult<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    #[instrument(skip(self))]
    async fn list_featured(&self, limit: Option<u64>) -> ProductResult<Vec<Product>> {
        let mut find = self.collection.find(doc! { "isFeatured": true });
        if let Some(limit) = limit {
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let cursor = find.await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, images), fields(image_count = images.len()))]
    async fn set_gallery(
        &self,
        id: ObjectId,
        images: Vec<String>,
    ) -> ProductResult<Option<Product>> {
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": { "images": images } })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductInput;
    use test_utils::TestMongo;

    fn product(category: ObjectId, featured: bool) -> Product {
        let input: ProductInput = serde_json::from_value(serde_json::json!({
            "name": "Shoe",
            "price": 20,
            "category": category.to_hex(),
            "countInStock": 5,
            "isFeatured": featured
        }))
        .unwrap();
        Product::new(input, category)
    }

    #[test]
    fn test_category_filter_empty_matches_everything() {
        assert!(MongoProductRepository::category_filter(&[]).is_empty());
    }

    #[test]
    fn test_category_filter_uses_in() {
        let ids = [ObjectId::new(), ObjectId::new()];
        let filter = MongoProductRepository::category_filter(&ids);
        let clause = filter.get_document("category").unwrap();
        assert_eq!(clause.get_array("$in").unwrap().len(), 2);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_count_list_and_featured() {
        let mongo = TestMongo::new().await;
        let repo = MongoProductRepository::new(&mongo.database("products_queries"));
        repo.init_indexes().await.unwrap();

        let shoes = ObjectId::new();
        let books = ObjectId::new();

        let before = repo.count().await.unwrap();
        for (category, featured) in [(shoes, true), (shoes, false), (books, true)] {
            repo.create(product(category, featured)).await.unwrap();
        }
        assert_eq!(repo.count().await.unwrap(), before + 3);

        let only_shoes = repo.list(vec![shoes]).await.unwrap();
        assert_eq!(only_shoes.len(), 2);
        assert!(only_shoes.iter().all(|p| p.category == shoes));
        assert_eq!(repo.list(vec![]).await.unwrap().len(), 3);

        assert_eq!(repo.list_featured(None).await.unwrap().len(), 2);
        let one = repo.list_featured(Some(1)).await.unwrap();
        assert_eq!(one.len(), 1);
        assert!(one[0].is_featured);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_replace_delete_and_gallery() {
        let mongo = TestMongo::new().await;
        let repo = MongoProductRepository::new(&mongo.database("products_writes"));

        let created = repo.create(product(ObjectId::new(), false)).await.unwrap();

        let mut changed = created.clone();
        changed.name = "Boot".to_string();
        let replaced = repo.replace(changed).await.unwrap().unwrap();
        assert_eq!(replaced.name, "Boot");
        assert_eq!(replaced.date_created, created.date_created);

        let gallery = vec!["http://localhost/public/uploads/a-1.png".to_string()];
        let with_gallery = repo
            .set_gallery(created.id, gallery.clone())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(with_gallery.images, gallery);

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
        assert!(repo.set_gallery(created.id, vec![]).await.unwrap().is_none());
    }
}
