//! # Axum Helpers
//!
//! Shared HTTP plumbing for the shop services.
//!
//! - **[`auth`]**: bearer JWT issuing/verification and the admin gate
//! - **[`server`]**: router assembly, health probes, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: the JSON error envelope and error codes
//! - **[`extractors`]**: ObjectId path and validated JSON extractors

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{AccessPolicy, AuthGuard, JwtAuth, JwtClaims, JwtConfig, auth_guard};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, normalize_api_prefix, run_health_checks, shutdown_signal,
};

pub use http::{Confirmation, cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{ObjectIdPath, ValidatedJson, parse_object_id};
