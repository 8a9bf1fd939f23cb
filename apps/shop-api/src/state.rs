//! Application state shared by the route builders.

use mongodb::{Client, Database};

/// Built once at startup. Repositories get their own handles from `db`;
/// `mongo_client` is kept for the readiness probe and shutdown.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Shares the driver's connection pool
    pub mongo_client: Client,
    pub db: Database,
}
