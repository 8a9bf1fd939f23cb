use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Category document as stored in the `categories` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

impl Category {
    pub fn new(input: CategoryInput) -> Self {
        Self {
            id: ObjectId::new(),
            name: input.name,
            icon: input.icon,
            color: input.color,
        }
    }

    /// Overwrite every client-supplied field, keeping the id.
    pub fn replace_with(&mut self, input: CategoryInput) {
        self.name = input.name;
        self.icon = input.icon;
        self.color = input.color;
    }
}

/// Body of `POST /` and `PUT /{id}`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

/// Category as rendered over HTTP, with the id as a hex string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    #[schema(example = "64b7f0c2a1b2c3d4e5f60718")]
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_hex(),
            name: category.name,
            icon: category.icon,
            color: category.color,
        }
    }
}
