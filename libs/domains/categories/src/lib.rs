//! Categories Domain
//!
//! Product categories stored in MongoDB. Products reference a category by
//! id; this crate owns the documents and exposes the existence check used
//! when products are created or replaced.
//!
//! ```rust,no_run
//! use domain_categories::{handlers, CategoryService, MongoCategoryRepository};
//!
//! # async fn example(db: mongodb::Database) {
//! let service = CategoryService::new(MongoCategoryRepository::new(&db));
//! let router = handlers::router(service);
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{CategoryError, CategoryResult};
pub use handlers::ApiDoc;
pub use models::{Category, CategoryInput, CategoryResponse};
pub use mongodb::MongoCategoryRepository;
pub use repository::CategoryRepository;
pub use service::CategoryService;
