//! Cross-cutting HTTP pieces: CORS, security headers, delete confirmations.

pub mod confirmation;
pub mod cors;
pub mod security;

pub use confirmation::Confirmation;
pub use cors::{cors_layer_from_env, create_cors_layer};
pub use security::security_headers;
