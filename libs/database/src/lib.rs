//! MongoDB connection management for the shop services.
//!
//! The store handle is built once at startup, handed to every repository and
//! closed explicitly during shutdown:
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry, disconnect};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! // ... build repositories from `db` ...
//! disconnect(client).await;
//! ```
//!
//! # Features
//!
//! - `config` (default) - `core_config::FromEnv` support for [`mongodb::MongoConfig`]

pub mod common;
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
