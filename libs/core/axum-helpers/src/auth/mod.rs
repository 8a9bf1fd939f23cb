//! Bearer-token authentication.
//!
//! ```ignore
//! use axum_helpers::auth::{AccessPolicy, AuthGuard, JwtAuth, JwtConfig, auth_guard};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//! let guard = AuthGuard::new(auth.clone(), AccessPolicy::for_api("/api/v1")?);
//!
//! let app = Router::new()
//!     .nest("/api/v1/products", products)
//!     .layer(axum::middleware::from_fn_with_state(guard, auth_guard));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod policy;

pub use config::{DEFAULT_TOKEN_TTL_SECS, JwtConfig};
pub use jwt::{JwtAuth, JwtClaims};
pub use middleware::{AuthGuard, auth_guard};
pub use policy::{AccessPolicy, PublicRule};
