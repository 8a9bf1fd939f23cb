//! API routes module
//!
//! Wires the MongoDB repositories into the domain routers and assembles the
//! full application router.

pub mod health;

use axum::Router;
use axum_helpers::{AccessPolicy, AuthGuard, JwtAuth, create_router, health_router};
use domain_categories::{CategoryService, MongoCategoryRepository};
use domain_orders::{MongoOrderRepository, OrderService};
use domain_products::{MongoProductRepository, ProductService, UPLOADS_ROUTE, UploadSink};
use domain_users::{MongoUserRepository, UserService};
use mongodb::Database;
use std::io;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create indexes for every collection. Safe to run on each start.
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoProductRepository::new(db).init_indexes().await?;
    MongoUserRepository::new(db).init_indexes().await?;
    MongoOrderRepository::new(db).init_indexes().await?;
    Ok(())
}

pub fn upload_sink(state: &AppState) -> UploadSink {
    let uploads = &state.config.uploads;
    UploadSink::new(uploads.dir.clone(), uploads.public_url.clone())
        .with_max_bytes(uploads.max_bytes)
}

/// Resource routers, nested under `API_URL` by [`app`].
///
/// Categories, products and users repositories are shared: products check
/// categories, orders read products and users.
pub fn routes(state: &AppState) -> Router {
    let categories = Arc::new(MongoCategoryRepository::new(&state.db));
    let products = Arc::new(MongoProductRepository::new(&state.db));
    let users = Arc::new(MongoUserRepository::new(&state.db));
    let auth = JwtAuth::new(&state.config.jwt);

    let product_service =
        ProductService::from_shared(Arc::clone(&products), Arc::clone(&categories));
    let order_service = OrderService::new(
        MongoOrderRepository::new(&state.db),
        products,
        Arc::clone(&users),
    );

    Router::new()
        .nest(
            "/products",
            domain_products::handlers::router(product_service, upload_sink(state)),
        )
        .nest(
            "/categories",
            domain_categories::handlers::router(CategoryService::from_shared(categories)),
        )
        .nest(
            "/users",
            domain_users::handlers::router(UserService::from_shared(users, auth)),
        )
        .nest("/orders", domain_orders::handlers::router(order_service))
}

/// The complete application: API, uploaded files, probes and docs behind
/// the interceptor stack.
pub fn app(state: &AppState) -> io::Result<Router> {
    let config = &state.config;

    let root = Router::new()
        .nest_service(UPLOADS_ROUTE, ServeDir::new(&config.uploads.dir))
        .merge(health_router(config.app))
        .merge(health::router(state.clone()));

    let policy = AccessPolicy::for_api(&config.api_url)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let guard = AuthGuard::new(JwtAuth::new(&config.jwt), policy);

    create_router::<ApiDoc>(&config.api_url, routes(state), root, guard)
}
