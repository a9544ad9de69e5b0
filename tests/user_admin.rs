use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use newsroom::authz::Role;

mod support;
use support::{insert_article, insert_user, login, read_json, request, spawn_app};

#[tokio::test]
async fn user_routes_are_admin_only() -> Result<()> {
    let t = spawn_app().await?;
    insert_user(&t.pool, "admin", "adminpass", Role::Admin).await?;
    let viewer_id = insert_user(&t.pool, "viewer", "viewerpass", Role::Viewer).await?;
    insert_user(&t.pool, "editor", "editorpass", Role::Editor).await?;

    for username in ["viewer", "editor"] {
        let token = login(&t.app, username, &format!("{username}pass")).await?;

        let resp = request(&t.app, "GET", "/api/users", Some(&token), None).await?;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let err = read_json(resp).await?;
        assert_eq!(err.get("message").and_then(|v| v.as_str()), Some("Access denied"));

        let resp = request(&t.app, "GET", &format!("/api/users/{viewer_id}"), Some(&token), None).await?;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = request(
            &t.app,
            "DELETE",
            &format!("/api/users/{viewer_id}"),
            Some(&token),
            None,
        )
        .await?;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    let admin_token = login(&t.app, "admin", "adminpass").await?;
    let resp = request(&t.app, "GET", "/api/users", Some(&admin_token), None).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let users = read_json(resp).await?;
    assert_eq!(users.as_array().map(Vec::len), Some(3));

    Ok(())
}

#[tokio::test]
async fn role_change_takes_effect_on_the_next_request() -> Result<()> {
    let t = spawn_app().await?;
    insert_user(&t.pool, "admin", "adminpass", Role::Admin).await?;
    let user_id = insert_user(&t.pool, "promotee", "promoteepass", Role::Viewer).await?;

    let admin_token = login(&t.app, "admin", "adminpass").await?;
    let user_token = login(&t.app, "promotee", "promoteepass").await?;

    // As a Viewer, creating an article for themselves works.
    let body = json!({ "title": "Before", "content": "Viewer can create" });
    let resp = request(&t.app, "POST", "/api/articles", Some(&user_token), Some(&body)).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Promote to Editor.
    let resp = request(
        &t.app,
        "PATCH",
        &format!("/api/users/{user_id}"),
        Some(&admin_token),
        Some(&json!({ "role": "Editor" })),
    )
    .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = read_json(resp).await?;
    assert_eq!(
        updated.get("message").and_then(|v| v.as_str()),
        Some("User updated successfully")
    );
    assert_eq!(
        updated.pointer("/user/role").and_then(|v| v.as_str()),
        Some("Editor")
    );

    // Same token, next request: the role is read fresh, and Editors
    // cannot create.
    let body = json!({ "title": "After", "content": "Editor cannot create" });
    let resp = request(&t.app, "POST", "/api/articles", Some(&user_token), Some(&body)).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn update_user_ignores_unknown_roles_and_empty_usernames() -> Result<()> {
    let t = spawn_app().await?;
    insert_user(&t.pool, "admin", "adminpass", Role::Admin).await?;
    let user_id = insert_user(&t.pool, "target", "targetpass", Role::Viewer).await?;
    let token = login(&t.app, "admin", "adminpass").await?;

    // Unknown role values are silently ignored, not rejected.
    let resp = request(
        &t.app,
        "PATCH",
        &format!("/api/users/{user_id}"),
        Some(&token),
        Some(&json!({ "username": "renamed", "role": "Overlord" })),
    )
    .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = read_json(resp).await?;
    assert_eq!(
        updated.pointer("/user/username").and_then(|v| v.as_str()),
        Some("renamed")
    );
    assert_eq!(
        updated.pointer("/user/role").and_then(|v| v.as_str()),
        Some("Viewer")
    );

    // An empty username is ignored like an absent one.
    let resp = request(
        &t.app,
        "PATCH",
        &format!("/api/users/{user_id}"),
        Some(&token),
        Some(&json!({ "username": "", "role": "Editor" })),
    )
    .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = read_json(resp).await?;
    assert_eq!(
        updated.pointer("/user/username").and_then(|v| v.as_str()),
        Some("renamed")
    );
    assert_eq!(
        updated.pointer("/user/role").and_then(|v| v.as_str()),
        Some("Editor")
    );

    // An empty payload is rejected.
    let resp = request(
        &t.app,
        "PATCH",
        &format!("/api/users/{user_id}"),
        Some(&token),
        Some(&json!({})),
    )
    .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Renaming onto a taken username conflicts.
    insert_user(&t.pool, "occupied", "occupiedpass", Role::Viewer).await?;
    let resp = request(
        &t.app,
        "PATCH",
        &format!("/api/users/{user_id}"),
        Some(&token),
        Some(&json!({ "username": "occupied" })),
    )
    .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Updating a nonexistent user is 404.
    let resp = request(
        &t.app,
        "PATCH",
        &format!("/api/users/{}", Uuid::new_v4()),
        Some(&token),
        Some(&json!({ "username": "ghost" })),
    )
    .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn deleting_a_user_cascades_to_their_articles() -> Result<()> {
    let t = spawn_app().await?;
    insert_user(&t.pool, "admin", "adminpass", Role::Admin).await?;
    let doomed_id = insert_user(&t.pool, "doomed", "doomedpass", Role::Viewer).await?;
    let keeper_id = insert_user(&t.pool, "keeper", "keeperpass", Role::Viewer).await?;

    let doomed_article = insert_article(&t.pool, "Doomed 1", "Going away", doomed_id).await?;
    insert_article(&t.pool, "Doomed 2", "Also going away", doomed_id).await?;
    let kept_article = insert_article(&t.pool, "Kept", "Staying", keeper_id).await?;

    let token = login(&t.app, "admin", "adminpass").await?;
    let resp = request(
        &t.app,
        "DELETE",
        &format!("/api/users/{doomed_id}"),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted = read_json(resp).await?;
    assert_eq!(
        deleted.get("message").and_then(|v| v.as_str()),
        Some("User deleted successfully")
    );

    // No article referencing the deleted owner remains queryable.
    let orphans = newsroom::db::articles::find_by_owner(&t.pool, doomed_id).await?;
    assert!(orphans.is_empty());

    let resp = request(
        &t.app,
        "GET",
        &format!("/api/articles/{doomed_article}"),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Other users' articles are untouched.
    let resp = request(
        &t.app,
        "GET",
        &format!("/api/articles/{kept_article}"),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    // Deleting a nonexistent user is 404.
    let resp = request(
        &t.app,
        "DELETE",
        &format!("/api/users/{doomed_id}"),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn user_search_semantics() -> Result<()> {
    let t = spawn_app().await?;
    insert_user(&t.pool, "admin", "adminpass", Role::Admin).await?;
    insert_user(&t.pool, "Alice_Writer", "alicepass", Role::Editor).await?;
    insert_user(&t.pool, "bob_writer", "bobpass", Role::Viewer).await?;
    let token = login(&t.app, "admin", "adminpass").await?;

    // Case-insensitive substring match.
    let resp = request(&t.app, "GET", "/api/users/search?username=WRITER", Some(&token), None).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let users = read_json(resp).await?;
    assert_eq!(users.as_array().map(Vec::len), Some(2));

    // Missing and empty parameters are rejected.
    for uri in ["/api/users/search", "/api/users/search?username="] {
        let resp = request(&t.app, "GET", uri, Some(&token), None).await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err = read_json(resp).await?;
        assert_eq!(
            err.get("message").and_then(|v| v.as_str()),
            Some("Username parameter is required")
        );
    }

    // No matches is a 404, not an empty 200.
    let resp = request(
        &t.app,
        "GET",
        "/api/users/search?username=nomatch",
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err = read_json(resp).await?;
    assert_eq!(err.get("message").and_then(|v| v.as_str()), Some("No users found"));

    Ok(())
}
