//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop API",
        version = "0.1.0",
        description = "MongoDB-backed REST API for the shop catalog, accounts and orders"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/v1/products", api = domain_products::ApiDoc),
        (path = "/api/v1/categories", api = domain_categories::ApiDoc),
        (path = "/api/v1/users", api = domain_users::ApiDoc),
        (path = "/api/v1/orders", api = domain_orders::ApiDoc)
    )
)]
pub struct ApiDoc;
