//! Category Service - Business logic layer

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryInput};
use crate::repository::CategoryRepository;

pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self::from_shared(Arc::new(repository))
    }

    /// Build on a repository that is also handed to other services.
    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(&self, input: CategoryInput) -> CategoryResult<Category> {
        self.repository.create(Category::new(input)).await
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: ObjectId) -> CategoryResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> CategoryResult<Vec<Category>> {
        self.repository.list().await
    }

    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: ObjectId,
        input: CategoryInput,
    ) -> CategoryResult<Category> {
        let mut category = self.get_category(id).await?;
        category.replace_with(input);

        self.repository
            .replace(category)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: ObjectId) -> CategoryResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CategoryError::NotFound(id));
        }
        Ok(())
    }
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCategoryRepository;
    use mockall::predicate::eq;

    fn input(name: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            icon: String::new(),
            color: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_create().times(1).returning(|c| Ok(c));

        let service = CategoryService::new(repo);
        let created = service.create_category(input("Shoes")).await.unwrap();
        assert_eq!(created.name, "Shoes");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let id = ObjectId::new();
        let mut repo = MockCategoryRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = CategoryService::new(repo);
        let err = service.get_category(id).await.unwrap_err();
        assert!(matches!(err, CategoryError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_replaces_fields() {
        let existing = Category::new(input("Old"));
        let id = existing.id;

        let mut repo = MockCategoryRepository::new();
        let stored = existing.clone();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_replace().returning(|c| Ok(Some(c)));

        let service = CategoryService::new(repo);
        let updated = service.update_category(id, input("New")).await.unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.name, "New");
    }

    #[tokio::test]
    async fn test_update_missing_skips_replace() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_replace().never();

        let service = CategoryService::new(repo);
        let err = service
            .update_category(ObjectId::new(), input("New"))
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_nothing_matched_is_not_found() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let service = CategoryService::new(repo);
        assert!(matches!(
            service.delete_category(ObjectId::new()).await,
            Err(CategoryError::NotFound(_))
        ));
    }
}
