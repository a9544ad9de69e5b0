pub mod articles;
pub mod auth;
pub mod health;
pub mod users;

use serde::Serialize;
use utoipa::ToSchema;

/// Confirmation body used by delete and update endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
