//! Product Service - Business logic layer

use domain_categories::{Category, CategoryRepository};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, ProductInput};
use crate::repository::ProductRepository;

/// A product together with the category it references, if that still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductWithCategory {
    pub product: Product,
    pub category: Option<Category>,
}

/// Split the `categories` query value into ids. Blank segments are skipped,
/// a malformed one fails the whole request.
pub fn parse_category_ids(raw: &str) -> ProductResult<Vec<ObjectId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            ObjectId::parse_str(segment).map_err(|_| ProductError::InvalidId(segment.to_string()))
        })
        .collect()
}

/// Product service providing business logic operations
///
/// Category references are checked against the category repository before
/// every create or replace.
pub struct ProductService<R: ProductRepository, C: CategoryRepository> {
    repository: Arc<R>,
    categories: Arc<C>,
}

impl<R: ProductRepository, C: CategoryRepository> ProductService<R, C> {
    pub fn new(repository: R, categories: Arc<C>) -> Self {
        Self::from_shared(Arc::new(repository), categories)
    }

    pub fn from_shared(repository: Arc<R>, categories: Arc<C>) -> Self {
        Self {
            repository,
            categories,
        }
    }

    /// Resolve the body's category to the id of a stored category.
    ///
    /// The check and the following write are separate operations: a
    /// category deleted in between leaves a dangling reference, the same
    /// state a later category delete produces.
    async fn resolve_category(&self, raw: &str) -> ProductResult<ObjectId> {
        let id = ObjectId::parse_str(raw.trim()).map_err(|_| ProductError::InvalidCategory)?;

        if !self.categories.exists(id).await? {
            tracing::info!(category_id = %id, "Rejected unknown category");
            return Err(ProductError::InvalidCategory);
        }
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let categories = match filter.categories.as_deref() {
            Some(raw) => parse_category_ids(raw)?,
            None => Vec::new(),
        };
        self.repository.list(categories).await
    }

    /// Get a product with its category populated.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ObjectId) -> ProductResult<ProductWithCategory> {
        let product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let category = self.categories.get_by_id(product.category).await?;
        if category.is_none() {
            tracing::warn!(product_id = %id, category_id = %product.category, "Dangling category reference");
        }

        Ok(ProductWithCategory { product, category })
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        let category = self.resolve_category(&input.category).await?;
        self.repository.create(Product::new(input, category)).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: ObjectId, input: ProductInput) -> ProductResult<Product> {
        let mut product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;
        let category = self.resolve_category(&input.category).await?;
        product.replace_with(input, category);

        self.repository
            .replace(product)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ObjectId) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn count_products(&self) -> ProductResult<u64> {
        self.repository.count().await
    }

    /// Featured products; a `count` of 0 or none means no limit.
    #[instrument(skip(self))]
    pub async fn featured_products(&self, count: Option<u64>) -> ProductResult<Vec<Product>> {
        let limit = count.filter(|&n| n > 0);
        self.repository.list_featured(limit).await
    }

    /// Replace the gallery with already stored image URLs.
    #[instrument(skip(self, images), fields(image_count = images.len()))]
    pub async fn set_gallery(&self, id: ObjectId, images: Vec<String>) -> ProductResult<Product> {
        self.repository
            .set_gallery(id, images)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Fails with `NotFound` unless the product exists.
    pub async fn ensure_exists(&self, id: ObjectId) -> ProductResult<()> {
        match self.repository.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(ProductError::NotFound(id)),
        }
    }
}

impl<R: ProductRepository, C: CategoryRepository> Clone for ProductService<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            categories: Arc::clone(&self.categories),
        }
    }
}
