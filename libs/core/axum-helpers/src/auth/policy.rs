//! Which requests may skip authentication.

use axum::http::Method;
use regex::Regex;

/// One public route: a path regex plus the methods it is public for.
#[derive(Debug, Clone)]
pub struct PublicRule {
    pattern: Regex,
    /// `None` means every method
    methods: Option<Vec<Method>>,
}

impl PublicRule {
    /// Rule for paths fully matching `pattern`.
    pub fn new(pattern: &str, methods: Option<Vec<Method>>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&format!("^(?:{pattern})$"))?,
            methods,
        })
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        let method_ok = self
            .methods
            .as_ref()
            .is_none_or(|allowed| allowed.contains(method));
        method_ok && self.pattern.is_match(path)
    }
}

/// Ordered list of public rules; anything unmatched needs an admin token.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    rules: Vec<PublicRule>,
}

impl AccessPolicy {
    pub fn new(rules: Vec<PublicRule>) -> Self {
        Self { rules }
    }

    /// Shop defaults for routes mounted under `api_prefix` (e.g. `/api/v1`):
    ///
    /// - `GET`/`OPTIONS` on uploaded files, products and categories
    /// - any method on `users/login` and `users/register`
    /// - health probes and API documentation
    pub fn for_api(api_prefix: &str) -> Result<Self, regex::Error> {
        let api = regex::escape(api_prefix.trim_end_matches('/'));
        let read_only = || Some(vec![Method::GET, Method::OPTIONS]);

        Ok(Self::new(vec![
            PublicRule::new(r"/public/uploads(?:/.*)?", read_only())?,
            PublicRule::new(&format!(r"{api}/products(?:/.*)?"), read_only())?,
            PublicRule::new(&format!(r"{api}/categories(?:/.*)?"), read_only())?,
            PublicRule::new(&format!(r"{api}/users/login"), None)?,
            PublicRule::new(&format!(r"{api}/users/register"), None)?,
            PublicRule::new(r"/health|/ready", None)?,
            PublicRule::new(
                r"/(?:swagger-ui|redoc|rapidoc|scalar|api-docs)(?:/.*)?",
                read_only(),
            )?,
        ]))
    }

    pub fn is_public(&self, method: &Method, path: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(method, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> AccessPolicy {
        AccessPolicy::for_api("/api/v1").unwrap()
    }

    #[test]
    fn test_catalog_reads_are_public() {
        let policy = policy();
        assert!(policy.is_public(&Method::GET, "/api/v1/products"));
        assert!(policy.is_public(&Method::GET, "/api/v1/products/get/featured/3"));
        assert!(policy.is_public(&Method::OPTIONS, "/api/v1/categories/abc"));
        assert!(policy.is_public(&Method::GET, "/public/uploads/shoe-1700000000000.png"));
    }

    #[test]
    fn test_catalog_writes_are_protected() {
        let policy = policy();
        assert!(!policy.is_public(&Method::POST, "/api/v1/products"));
        assert!(!policy.is_public(&Method::DELETE, "/api/v1/categories/abc"));
        assert!(!policy.is_public(&Method::POST, "/public/uploads/x.png"));
    }

    #[test]
    fn test_login_and_register_are_public_for_any_method() {
        let policy = policy();
        assert!(policy.is_public(&Method::POST, "/api/v1/users/login"));
        assert!(policy.is_public(&Method::POST, "/api/v1/users/register"));
        assert!(!policy.is_public(&Method::GET, "/api/v1/users"));
        assert!(!policy.is_public(&Method::GET, "/api/v1/users/login/extra"));
    }

    #[test]
    fn test_prefix_must_match_exactly() {
        let policy = policy();
        assert!(!policy.is_public(&Method::GET, "/api/v2/products"));
        assert!(!policy.is_public(&Method::GET, "/api/v1/productsx"));
        assert!(!policy.is_public(&Method::GET, "/api/v1/orders"));
    }

    #[test]
    fn test_operational_routes_are_public() {
        let policy = policy();
        assert!(policy.is_public(&Method::GET, "/health"));
        assert!(policy.is_public(&Method::GET, "/ready"));
        assert!(policy.is_public(&Method::GET, "/swagger-ui/index.html"));
        assert!(policy.is_public(&Method::GET, "/api-docs/openapi.json"));
    }

    #[test]
    fn test_prefix_with_regex_metacharacters_is_escaped() {
        let policy = AccessPolicy::for_api("/api.v1/").unwrap();
        assert!(policy.is_public(&Method::GET, "/api.v1/products"));
        assert!(!policy.is_public(&Method::GET, "/apiXv1/products"));
    }
}
