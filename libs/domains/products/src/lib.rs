//! Products Domain
//!
//! The product catalog: CRUD over MongoDB, category reference checks,
//! featured listings and image uploads.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, multipart parsing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────────┐
//! │   Service   │ ──▶ │  Categories  │  ← reference checks
//! └──────┬──────┘     └──────────────┘
//!        │
//! ┌──────▼──────┐     ┌──────────────┐
//! │ Repository  │     │ Upload sink  │  ← images on local disk
//! └──────┬──────┘     └──────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Documents, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_categories::MongoCategoryRepository;
//! use domain_products::{handlers, MongoProductRepository, ProductService, UploadSink};
//! use std::sync::Arc;
//!
//! # async fn example(db: mongodb::Database) {
//! let categories = Arc::new(MongoCategoryRepository::new(&db));
//! let service = ProductService::new(MongoProductRepository::new(&db), categories);
//! let uploads = UploadSink::new("public/uploads", "http://localhost:8080");
//!
//! let router = handlers::router(service, uploads);
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod upload;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CategoryField, Product, ProductCount, ProductFilter, ProductInput, ProductResponse,
    StoredFile,
};
pub use mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use service::{ProductService, ProductWithCategory};
pub use upload::{DEFAULT_MAX_UPLOAD_BYTES, UPLOADS_ROUTE, UploadSink};
