use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::authz::{Role, UnknownRole};
use crate::errors::AppError;

/// Public user representation. The password hash lives only on the row
/// type and is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbUser {
    /// Parse the stored role against the closed enum. Anything else in the
    /// column fails closed at this boundary.
    pub fn role(&self) -> Result<Role, UnknownRole> {
        self.role.parse()
    }
}

impl TryFrom<DbUser> for User {
    type Error = AppError;

    fn try_from(value: DbUser) -> Result<Self, Self::Error> {
        let role = value
            .role()
            .map_err(|err| AppError::internal(err.to_string()))?;

        Ok(User {
            id: value.id,
            username: value.username,
            role,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin")]
    pub username: Option<String>,
    #[schema(example = "adminpass")]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
}

/// Partial update payload. `role` stays a raw string here: values outside
/// the closed enum are silently ignored rather than rejected.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UserUpdateRequest {
    #[schema(example = "new_name")]
    pub username: Option<String>,
    #[schema(example = "Editor")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserUpdateResponse {
    pub message: String,
    pub user: User,
}
