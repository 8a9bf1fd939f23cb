use super::shutdown::ShutdownCoordinator;
use crate::auth::{AuthGuard, auth_guard};
use crate::errors::handlers::not_found;
use crate::http::{cors_layer_from_env, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Check an API mount point such as `/api/v1` and strip any trailing slash.
pub fn normalize_api_prefix(prefix: &str) -> io::Result<String> {
    let trimmed = prefix.trim().trim_end_matches('/');
    if !trimmed.starts_with('/') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("API prefix must start with '/' and not be the root (got {prefix:?})"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Assemble the full application router.
///
/// - `apis` is nested under `api_prefix`
/// - `root` (static files, health probes) is merged at `/`
/// - OpenAPI docs are served at `/swagger-ui`, `/redoc`, `/rapidoc`, `/scalar`
///   and `/api-docs/openapi.json`
/// - unknown paths get the 404 envelope
///
/// Every request then passes the interceptors outermost first:
/// trace, CORS (from `CORS_ALLOWED_ORIGIN`), security headers, compression,
/// and finally [`auth_guard`]. A rejecting interceptor answers immediately
/// and the inner ones never run.
///
/// # Errors
/// Fails on a malformed `api_prefix` or a missing/invalid `CORS_ALLOWED_ORIGIN`.
pub fn create_router<T>(
    api_prefix: &str,
    apis: Router,
    root: Router,
    guard: AuthGuard,
) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let api_prefix = normalize_api_prefix(api_prefix)?;
    let cors = cors_layer_from_env()?;

    let interceptors = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(middleware::from_fn(security_headers))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn_with_state(guard, auth_guard));

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest(&api_prefix, apis)
        .merge(root)
        .fallback(not_found)
        .layer(interceptors);

    info!(%api_prefix, "Router assembled");
    Ok(router)
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` under `shutdown_timeout`.
///
/// In-flight requests drain before the listener closes; `cleanup` (closing
/// the database client, flushing files) starts once the signal arrives.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let cleanup_trigger = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        cleanup_trigger.wait_for_shutdown().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed successfully"),
            Err(_) => tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_shutdown().await })
        .await
        .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e));

    if let Err(e) = cleanup_handle.await {
        tracing::error!("Cleanup task panicked: {:?}", e);
    }

    serve_result
}
