use sqlx::SqlitePool;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::article::Article;

const ARTICLE_COLUMNS: &str = "id, title, content, created_at, updated_at, user_id";

pub async fn find_by_id(pool: &SqlitePool, article_id: Uuid) -> AppResult<Option<Article>> {
    let article = sqlx::query_as::<_, Article>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?"
    ))
    .bind(article_id)
    .fetch_optional(pool)
    .await?;

    Ok(article)
}

/// All articles in storage insertion order; the collection read is not
/// filtered per actor.
pub async fn list(pool: &SqlitePool) -> AppResult<Vec<Article>> {
    let articles = sqlx::query_as::<_, Article>(&format!("SELECT {ARTICLE_COLUMNS} FROM articles"))
        .fetch_all(pool)
        .await?;

    Ok(articles)
}

pub async fn find_by_owner(pool: &SqlitePool, user_id: Uuid) -> AppResult<Vec<Article>> {
    let articles = sqlx::query_as::<_, Article>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE user_id = ?"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(articles)
}

/// Case-insensitive substring match on title, in storage order.
pub async fn search_by_title(pool: &SqlitePool, fragment: &str) -> AppResult<Vec<Article>> {
    let pattern = format!("%{}%", fragment);
    let articles = sqlx::query_as::<_, Article>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE title LIKE ?"
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(articles)
}

pub async fn insert(pool: &SqlitePool, article: &Article) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO articles (id, title, content, user_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(article.id)
    .bind(&article.title)
    .bind(&article.content)
    .bind(article.user_id)
    .bind(article.created_at)
    .bind(article.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update(pool: &SqlitePool, article: &Article) -> AppResult<()> {
    sqlx::query("UPDATE articles SET title = ?, content = ?, updated_at = ? WHERE id = ?")
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.updated_at)
        .bind(article.id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn delete(pool: &SqlitePool, article_id: Uuid) -> AppResult<()> {
    sqlx::query("DELETE FROM articles WHERE id = ?")
        .bind(article_id)
        .execute(pool)
        .await?;

    Ok(())
}
