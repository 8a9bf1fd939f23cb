use chrono::{DateTime, Utc};
use domain_categories::{Category, CategoryResponse};
use mongodb::bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Product document as stored in the `products` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rich_description: String,
    /// Main image URL
    #[serde(default)]
    pub image: String,
    /// Gallery URLs, only changed through the gallery upload
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub brands: String,
    #[serde(default)]
    pub price: f64,
    pub category: ObjectId,
    pub count_in_stock: i32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub num_reviews: i32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_created: DateTime<Utc>,
}

impl Product {
    /// New document from a validated body whose category was already resolved.
    pub fn new(input: ProductInput, category: ObjectId) -> Self {
        Self {
            id: ObjectId::new(),
            name: input.name,
            description: input.description,
            rich_description: input.rich_description,
            image: input.image,
            images: Vec::new(),
            brands: input.brands,
            price: input.price,
            category,
            count_in_stock: input.count_in_stock,
            rating: input.rating,
            num_reviews: input.num_reviews,
            is_featured: input.is_featured,
            // BSON dates hold milliseconds
            date_created: DateTime::from_timestamp_millis(Utc::now().timestamp_millis())
                .unwrap_or_default(),
        }
    }

    /// Overwrite every client-supplied field. `id`, `images` and
    /// `date_created` are kept.
    pub fn replace_with(&mut self, input: ProductInput, category: ObjectId) {
        self.name = input.name;
        self.description = input.description;
        self.rich_description = input.rich_description;
        self.image = input.image;
        self.brands = input.brands;
        self.price = input.price;
        self.category = category;
        self.count_in_stock = input.count_in_stock;
        self.rating = input.rating;
        self.num_reviews = input.num_reviews;
        self.is_featured = input.is_featured;
    }
}

/// Body of `POST /` and `PUT /{id}`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rich_description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub brands: String,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// Id of an existing category
    #[schema(example = "64b7f0c2a1b2c3d4e5f60718")]
    pub category: String,
    #[validate(range(min = 0, max = 255))]
    pub count_in_stock: i32,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub num_reviews: i32,
    #[serde(default)]
    pub is_featured: bool,
}

/// Query string of `GET /`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Comma-separated category ids, e.g. `?categories=a1..,b2..`
    pub categories: Option<String>,
}

/// How the `category` field is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CategoryField {
    /// Plain reference, as stored
    Id(String),
    /// Embedded document; `null` when the referenced category was deleted
    Populated(Option<CategoryResponse>),
}

/// Product as rendered over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(example = "64b7f0c2a1b2c3d4e5f60719")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub rich_description: String,
    pub image: String,
    pub images: Vec<String>,
    pub brands: String,
    pub price: f64,
    pub category: CategoryField,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub is_featured: bool,
    pub date_created: DateTime<Utc>,
}

impl ProductResponse {
    fn render(product: Product, category: CategoryField) -> Self {
        Self {
            id: product.id.to_hex(),
            name: product.name,
            description: product.description,
            rich_description: product.rich_description,
            image: product.image,
            images: product.images,
            brands: product.brands,
            price: product.price,
            category,
            count_in_stock: product.count_in_stock,
            rating: product.rating,
            num_reviews: product.num_reviews,
            is_featured: product.is_featured,
            date_created: product.date_created,
        }
    }

    /// Render with the referenced category embedded.
    pub fn populated(product: Product, category: Option<Category>) -> Self {
        Self::render(product, CategoryField::Populated(category.map(Into::into)))
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let category = CategoryField::Id(product.category.to_hex());
        Self::render(product, category)
    }
}

/// `GET /get/count`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCount {
    pub product_count: u64,
}

/// Result of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    #[schema(example = "running-shoe-1700000000000.png")]
    pub file_name: String,
    #[schema(example = "http://localhost:8080/public/uploads/running-shoe-1700000000000.png")]
    pub url: String,
}
