use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{"success": true, "message": "..."}` body returned by deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Confirmation {
    pub success: bool,
    pub message: String,
}

impl Confirmation {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
