#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt;
use uuid::Uuid;

use newsroom::authz::Role;
use newsroom::create_app;
use newsroom::models::article::Article;
use newsroom::utils::hash_password;

pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
    // Keeps the sqlite file alive for the test's duration.
    _dir: TempDir,
}

pub async fn spawn_app() -> Result<TestApp> {
    let dir = tempfile::tempdir().context("failed to create tempdir")?;
    let db_path = dir.path().join("test.db");
    let opts = SqliteConnectOptions::new()
        .filename(db_path.as_path())
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;

    let migrator = sqlx::migrate::Migrator::new(
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations"),
    )
    .await?;
    migrator.run(&pool).await?;

    std::env::set_var("JWT_SECRET", "test-secret");
    let app = create_app(pool.clone()).await?;

    Ok(TestApp {
        app,
        pool,
        _dir: dir,
    })
}

pub async fn insert_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
    role: Role,
) -> Result<Uuid> {
    let user_id = Uuid::new_v4();
    let password_hash = hash_password(password)?;
    newsroom::db::users::insert(
        pool,
        user_id,
        username,
        &password_hash,
        role.as_str(),
        chrono::Utc::now(),
    )
    .await?;
    Ok(user_id)
}

pub async fn insert_article(
    pool: &SqlitePool,
    title: &str,
    content: &str,
    user_id: Uuid,
) -> Result<Uuid> {
    let article = Article {
        id: Uuid::new_v4(),
        title: title.to_string(),
        content: content.to_string(),
        created_at: chrono::Utc::now(),
        updated_at: None,
        user_id,
    };
    newsroom::db::articles::insert(pool, &article).await?;
    Ok(article.id)
}

pub async fn login(app: &Router, username: &str, password: &str) -> Result<String> {
    let body = serde_json::json!({ "username": username, "password": password });
    let resp = request(app, "POST", "/api/login", None, Some(&body)).await?;
    let status = resp.status();
    let json = read_json(resp).await?;
    anyhow::ensure!(status == StatusCode::OK, "login failed: {status} - {json}");

    json.get("access_token")
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .context("missing access_token")
}

pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<&serde_json::Value>,
) -> Result<Response> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let req = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    Ok(app.clone().oneshot(req).await?)
}

pub async fn read_json(resp: Response) -> Result<serde_json::Value> {
    let bytes = axum::body::to_bytes(resp.into_body(), 10_485_760).await?;
    serde_json::from_slice(&bytes).context("response body was not JSON")
}
