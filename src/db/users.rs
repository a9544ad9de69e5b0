use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::authz::Actor;
use crate::errors::{AppError, AppResult};
use crate::models::user::DbUser;

const USER_COLUMNS: &str = "id, username, password_hash, role, created_at, updated_at";

/// Resolve an authenticated identity into an [`Actor`], reading the role
/// fresh from storage. A token whose user row is gone resolves to 401; a
/// role value outside the closed enum fails closed.
pub async fn load_actor(pool: &SqlitePool, user_id: Uuid) -> AppResult<Actor> {
    let user = find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

    let role = user
        .role()
        .map_err(|_| AppError::forbidden("Access denied"))?;

    Ok(Actor::new(user.id, role))
}

pub async fn find_by_id(pool: &SqlitePool, user_id: Uuid) -> AppResult<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> AppResult<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn list(pool: &SqlitePool) -> AppResult<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(&format!("SELECT {USER_COLUMNS} FROM users"))
        .fetch_all(pool)
        .await?;

    Ok(users)
}

/// Case-insensitive substring match on username, in storage order.
pub async fn search_by_username(pool: &SqlitePool, fragment: &str) -> AppResult<Vec<DbUser>> {
    let pattern = format!("%{}%", fragment);
    let users = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username LIKE ?"
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn username_taken(pool: &SqlitePool, username: &str, exclude: Option<Uuid>) -> AppResult<bool> {
    let count: i64 = match exclude {
        Some(id) => {
            sqlx::query_scalar("SELECT COUNT(1) FROM users WHERE username = ? AND id != ?")
                .bind(username)
                .bind(id)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(1) FROM users WHERE username = ?")
                .bind(username)
                .fetch_one(pool)
                .await?
        }
    };

    Ok(count > 0)
}

/// Insert a new user, enforcing username uniqueness at creation.
pub async fn insert(
    pool: &SqlitePool,
    user_id: Uuid,
    username: &str,
    password_hash: &str,
    role: &str,
    now: DateTime<Utc>,
) -> AppResult<()> {
    if username_taken(pool, username, None).await? {
        return Err(AppError::conflict("Username already in use"));
    }

    sqlx::query(
        "INSERT INTO users (id, username, password_hash, role, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update(pool: &SqlitePool, user: &DbUser, now: DateTime<Utc>) -> AppResult<()> {
    sqlx::query("UPDATE users SET username = ?, role = ?, updated_at = ? WHERE id = ?")
        .bind(&user.username)
        .bind(&user.role)
        .bind(now)
        .bind(user.id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Hard-delete a user together with every article it owns, in a single
/// transaction. Articles go first so the owner reference never dangles.
pub async fn delete_cascade(pool: &SqlitePool, user_id: Uuid) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM articles WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}
