use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Article representation; maps 1:1 to its row. `updated_at` is null
/// until the first update.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ArticleCreateRequest {
    #[schema(example = "Launch notes")]
    pub title: Option<String>,
    #[schema(example = "Everything that shipped this week.")]
    pub content: Option<String>,
    /// Target owner; defaults to the authenticated actor.
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ArticleUpdateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}
