use super::{jwt::JwtAuth, policy::AccessPolicy};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// State for [`auth_guard`]: the token verifier plus the public-route policy.
#[derive(Clone)]
pub struct AuthGuard {
    auth: JwtAuth,
    policy: Arc<AccessPolicy>,
}

impl AuthGuard {
    pub fn new(auth: JwtAuth, policy: AccessPolicy) -> Self {
        Self {
            auth,
            policy: Arc::new(policy),
        }
    }
}

/// `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Admin gate for every non-public route.
///
/// - public per [`AccessPolicy`]: passed through untouched
/// - no token, or a bad or expired one: 401
/// - valid token without `isAdmin`: 403
/// - otherwise the [`JwtClaims`](super::JwtClaims) go into request extensions
pub async fn auth_guard(
    State(guard): State<AuthGuard>,
    mut request: Request,
    next: Next,
) -> Response {
    if guard
        .policy
        .is_public(request.method(), request.uri().path())
    {
        return next.run(request).await;
    }

    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!(path = %request.uri().path(), "No bearer token on protected route");
        return AppError::Unauthorized("The user is not authorized".to_string()).into_response();
    };

    let claims = match guard.auth.verify_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return AppError::Unauthorized("Invalid or expired token".to_string()).into_response();
        }
    };

    if !claims.is_admin {
        tracing::info!(user_id = %claims.sub, path = %request.uri().path(), "Non-admin token rejected");
        return AppError::Forbidden("Admin access required".to_string()).into_response();
    }

    request.extensions_mut().insert(claims);
    next.run(request).await
}
