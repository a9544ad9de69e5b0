use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use newsroom::authz::Role;

mod support;
use support::{insert_user, login, read_json, request, spawn_app};

#[tokio::test]
async fn auth_edge_cases() -> Result<()> {
    let t = spawn_app().await?;
    insert_user(&t.pool, "valid_user", "password123", Role::Viewer).await?;

    // 1. Login with an empty payload
    let resp = request(&t.app, "POST", "/api/login", None, Some(&json!({}))).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err = read_json(resp).await?;
    assert_eq!(
        err.get("message").and_then(|v| v.as_str()),
        Some("No input data provided")
    );

    // 2. Login with the wrong password
    let body = json!({ "username": "valid_user", "password": "wrongpassword" });
    let resp = request(&t.app, "POST", "/api/login", None, Some(&body)).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let err = read_json(resp).await?;
    assert_eq!(
        err.get("message").and_then(|v| v.as_str()),
        Some("Invalid credentials")
    );

    // 3. Login with a non-existent username
    let body = json!({ "username": "nobody", "password": "password123" });
    let resp = request(&t.app, "POST", "/api/login", None, Some(&body)).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 4. Protected route without a token
    let resp = request(&t.app, "GET", "/api/articles", None, None).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let err = read_json(resp).await?;
    assert_eq!(
        err.get("message").and_then(|v| v.as_str()),
        Some("Missing Authorization Header")
    );

    // 5. Protected route with a garbage token
    let resp = request(&t.app, "GET", "/api/articles", Some("not-a-jwt"), None).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn token_for_deleted_user_is_rejected() -> Result<()> {
    let t = spawn_app().await?;
    let user_id = insert_user(&t.pool, "ephemeral", "password123", Role::Viewer).await?;
    let token = login(&t.app, "ephemeral", "password123").await?;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(&t.pool)
        .await?;

    // The token is still valid, but the identity behind it is gone.
    let body = json!({ "title": "Ghost", "content": "Written by no one" });
    let resp = request(&t.app, "POST", "/api/articles", Some(&token), Some(&body)).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
