use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User document as stored in the `users` collection.
///
/// Carries the password hash, so it is never rendered directly; handlers
/// answer with [`UserResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    /// Stored lowercased; unique
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub apartment: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

impl User {
    /// Build from a validated body and an already computed hash.
    pub fn new(input: CreateUser, password_hash: String) -> Self {
        Self {
            id: ObjectId::new(),
            name: input.name,
            email: normalize_email(&input.email),
            password_hash,
            phone: input.phone,
            is_admin: input.is_admin,
            street: input.street,
            apartment: input.apartment,
            zip: input.zip,
            city: input.city,
            country: input.country,
        }
    }
}

/// Lookup form of an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Body of `POST /` and `POST /register`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(default)]
    pub phone: String,
    /// Ignored by `/register`
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub apartment: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

/// User without credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "64b7f0c2a1b2c3d4e5f6071a")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_admin: bool,
    pub street: String,
    pub apartment: String,
    pub zip: String,
    pub city: String,
    pub country: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name,
            email: user.email,
            phone: user.phone,
            is_admin: user.is_admin,
            street: user.street,
            apartment: user.apartment,
            zip: user.zip,
            city: user.city,
            country: user.country,
        }
    }
}

/// Just enough of a user to label an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful login: the email and a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: String,
    pub token: String,
}

/// `GET /get/count`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCount {
    pub user_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CreateUser {
        serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": " Ada@Example.COM ",
            "password": "correct horse"
        }))
        .unwrap()
    }

    #[test]
    fn test_new_user_normalizes_email() {
        let user = User::new(input(), "$argon2id$stub".to_string());
        assert_eq!(user.email, "ada@example.com");
        assert!(!user.is_admin);
    }

    #[test]
    fn test_response_has_no_password_hash() {
        let user = User::new(input(), "$argon2id$secret".to_string());
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("secret"));
        assert_eq!(json["isAdmin"], false);
    }

    #[test]
    fn test_short_password_fails_validation() {
        let mut input = input();
        input.email = "ada@example.com".to_string();
        assert!(input.validate().is_ok());

        input.password = "short".to_string();
        assert!(input.validate().is_err());
    }
}
