//! MongoDB implementation of CategoryRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{doc, oid::ObjectId},
    options::ReturnDocument,
};
use tracing::instrument;

use crate::error::CategoryResult;
use crate::models::Category;
use crate::repository::CategoryRepository;

pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "categories")
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Category>(collection_name),
        }
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, category), fields(category_name = %category.name))]
    async fn create(&self, category: Category) -> CategoryResult<Category> {
        self.collection.insert_one(&category).await?;
        tracing::info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> CategoryResult<Option<Category>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CategoryResult<Vec<Category>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn replace(&self, category: Category) -> CategoryResult<Option<Category>> {
        let updated = self
            .collection
            .find_one_and_replace(doc! { "_id": category.id }, &category)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> CategoryResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        if result.deleted_count > 0 {
            tracing::info!(category_id = %id, "Category deleted");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: ObjectId) -> CategoryResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "_id": id })
            .limit(1)
            .await?;
        Ok(count > 0)
    }
}
