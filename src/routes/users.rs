use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::app::AppState;
use crate::authz::{Actor, Role};
use crate::db;
use crate::errors::{AppError, AppResult};
use crate::jwt::AuthUser;
use crate::models::user::{User, UserUpdateRequest, UserUpdateResponse};
use crate::routes::MessageResponse;
use crate::utils::utc_now;

#[derive(Debug, Deserialize)]
pub struct UserSearchQuery {
    pub username: Option<String>,
}

/// Users are an administrative resource class: a coarse role-only gate,
/// no ownership logic.
async fn require_admin(pool: &SqlitePool, auth: &AuthUser) -> AppResult<Actor> {
    let actor = db::users::load_actor(pool, auth.user_id).await?;
    if !actor.is_admin() {
        return Err(AppError::forbidden("Access denied"));
    }
    Ok(actor)
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "List users", body = [User]),
        (status = 403, description = "Access denied")
    )
)]
pub async fn list_users(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Vec<User>>> {
    require_admin(&state.pool, &auth).await?;

    let users: Vec<User> = db::users::list(&state.pool)
        .await?
        .into_iter()
        .map(User::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User detail", body = User),
        (status = 403, description = "Access denied"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<User>> {
    require_admin(&state.pool, &auth).await?;

    let user = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(user.try_into()?))
}

#[utoipa::path(
    get,
    path = "/api/users/search",
    tag = "Users",
    params(("username" = String, Query, description = "Username substring, case-insensitive")),
    responses(
        (status = 200, description = "Matching users", body = [User]),
        (status = 400, description = "Username parameter is required"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "No users found")
    )
)]
pub async fn search_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UserSearchQuery>,
) -> AppResult<Json<Vec<User>>> {
    require_admin(&state.pool, &auth).await?;

    let username = query.username.unwrap_or_default();
    if username.is_empty() {
        return Err(AppError::bad_request("Username parameter is required"));
    }

    let users = db::users::search_by_username(&state.pool, &username).await?;
    if users.is_empty() {
        return Err(AppError::not_found("No users found"));
    }

    let users: Vec<User> = users
        .into_iter()
        .map(User::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Json(users))
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UserUpdateRequest,
    responses(
        (status = 200, description = "User updated", body = UserUpdateResponse),
        (status = 400, description = "No input data provided"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already in use")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserUpdateRequest>,
) -> AppResult<Json<UserUpdateResponse>> {
    require_admin(&state.pool, &auth).await?;

    let mut user = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if payload.username.is_none() && payload.role.is_none() {
        return Err(AppError::bad_request("No input data provided"));
    }

    // An empty username is ignored like an absent one.
    if let Some(username) = payload.username.filter(|name| !name.is_empty()) {
        if username != user.username
            && db::users::username_taken(&state.pool, &username, Some(user.id)).await?
        {
            return Err(AppError::conflict("Username already in use"));
        }
        user.username = username;
    }

    // Role values outside the closed enum are silently ignored, not
    // rejected.
    if let Some(role) = payload.role.as_deref() {
        if let Ok(role) = role.parse::<Role>() {
            user.role = role.as_str().to_string();
        }
    }

    db::users::update(&state.pool, &user, utc_now()).await?;

    Ok(Json(UserUpdateResponse {
        message: "User updated successfully".to_string(),
        user: user.try_into()?,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 403, description = "Access denied"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    require_admin(&state.pool, &auth).await?;

    let user = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    // Owned articles go first, in the same transaction.
    db::users::delete_cascade(&state.pool, user.id).await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
