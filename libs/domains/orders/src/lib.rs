//! Orders Domain
//!
//! Orders embed their line items and reference a user and products by id.
//! Placing an order checks both references and prices it from the current
//! product prices; reads populate the references back.
//!
//! ```rust,no_run
//! use domain_orders::{handlers, MongoOrderRepository, OrderService};
//! use domain_products::MongoProductRepository;
//! use domain_users::MongoUserRepository;
//! use std::sync::Arc;
//!
//! # async fn example(db: mongodb::Database) {
//! let service = OrderService::new(
//!     MongoOrderRepository::new(&db),
//!     Arc::new(MongoProductRepository::new(&db)),
//!     Arc::new(MongoUserRepository::new(&db)),
//! );
//! let router = handlers::router(service);
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{
    Order, OrderCount, OrderInput, OrderItem, OrderResponse, OrderStatus, StatusUpdate,
    TotalSales,
};
pub use mongodb::MongoOrderRepository;
pub use repository::OrderRepository;
pub use service::{OrderDetails, OrderService, OrderWithUser};
