use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::authz::{Action, ResourceOwner};
use crate::db;
use crate::errors::{AppError, AppResult};
use crate::jwt::AuthUser;
use crate::models::article::{Article, ArticleCreateRequest, ArticleUpdateRequest};
use crate::routes::MessageResponse;
use crate::utils::utc_now;

#[derive(Debug, Deserialize)]
pub struct ArticleSearchQuery {
    pub title: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/articles",
    tag = "Articles",
    request_body = ArticleCreateRequest,
    responses(
        (status = 201, description = "Article created", body = Article),
        (status = 400, description = "Missing title or content"),
        (status = 403, description = "Access denied")
    )
)]
pub async fn create_article(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ArticleCreateRequest>,
) -> AppResult<(StatusCode, Json<Article>)> {
    let actor = db::users::load_actor(&state.pool, auth.user_id).await?;

    let title = payload.title.unwrap_or_default();
    let content = payload.content.unwrap_or_default();
    if title.is_empty() || content.is_empty() {
        return Err(AppError::bad_request("Title and content are required"));
    }

    // Target owner defaults to the actor itself.
    let target_owner = payload.user_id.unwrap_or(actor.id);

    if !actor.can(Action::Create, ResourceOwner::User(target_owner)) {
        return Err(AppError::forbidden("Access denied"));
    }

    if db::users::find_by_id(&state.pool, target_owner).await?.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    let article = Article {
        id: Uuid::new_v4(),
        title,
        content,
        created_at: utc_now(),
        updated_at: None,
        user_id: target_owner,
    };
    db::articles::insert(&state.pool, &article).await?;

    Ok((StatusCode::CREATED, Json(article)))
}

#[utoipa::path(
    get,
    path = "/api/articles",
    tag = "Articles",
    responses((status = 200, description = "List articles", body = [Article]))
)]
pub async fn list_articles(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<Article>>> {
    let articles = db::articles::list(&state.pool).await?;
    Ok(Json(articles))
}

#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    tag = "Articles",
    params(("id" = Uuid, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article detail", body = Article),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Article not found")
    )
)]
pub async fn get_article(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Article>> {
    let actor = db::users::load_actor(&state.pool, auth.user_id).await?;

    let article = db::articles::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Article not found"))?;

    // Owners may always read their own article; everyone else goes through
    // the decision engine.
    if article.user_id != actor.id
        && !actor.can(Action::Read, ResourceOwner::User(article.user_id))
    {
        return Err(AppError::forbidden("Access denied"));
    }

    Ok(Json(article))
}

#[utoipa::path(
    get,
    path = "/api/articles/search",
    tag = "Articles",
    params(("title" = String, Query, description = "Title substring, case-insensitive")),
    responses(
        (status = 200, description = "Matching articles", body = [Article]),
        (status = 400, description = "Title parameter is required"),
        (status = 404, description = "No articles found")
    )
)]
pub async fn search_articles(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ArticleSearchQuery>,
) -> AppResult<Json<Vec<Article>>> {
    let title = query.title.unwrap_or_default();
    if title.is_empty() {
        return Err(AppError::bad_request("Title parameter is required"));
    }

    let articles = db::articles::search_by_title(&state.pool, &title).await?;
    if articles.is_empty() {
        return Err(AppError::not_found("No articles found"));
    }

    Ok(Json(articles))
}

#[utoipa::path(
    patch,
    path = "/api/articles/{id}",
    tag = "Articles",
    params(("id" = Uuid, Path, description = "Article id")),
    request_body = ArticleUpdateRequest,
    responses(
        (status = 200, description = "Article updated", body = Article),
        (status = 400, description = "No input data provided"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Article not found")
    )
)]
pub async fn update_article(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ArticleUpdateRequest>,
) -> AppResult<Json<Article>> {
    let actor = db::users::load_actor(&state.pool, auth.user_id).await?;

    // Existence before permission: a missing article is 404 even for an
    // actor that would have been denied.
    let mut article = db::articles::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Article not found"))?;

    if !actor.can(Action::Update, ResourceOwner::User(article.user_id)) {
        return Err(AppError::forbidden("Access denied"));
    }

    if payload.title.is_none() && payload.content.is_none() {
        return Err(AppError::bad_request("No input data provided"));
    }

    if let Some(title) = payload.title {
        article.title = title;
    }
    if let Some(content) = payload.content {
        article.content = content;
    }
    article.updated_at = Some(utc_now());

    db::articles::update(&state.pool, &article).await?;

    Ok(Json(article))
}

#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    tag = "Articles",
    params(("id" = Uuid, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article deleted", body = MessageResponse),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Article not found")
    )
)]
pub async fn delete_article(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let actor = db::users::load_actor(&state.pool, auth.user_id).await?;

    let article = db::articles::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Article not found"))?;

    if !actor.can(Action::Delete, ResourceOwner::User(article.user_id)) {
        return Err(AppError::forbidden("Access denied"));
    }

    db::articles::delete(&state.pool, article.id).await?;

    Ok(Json(MessageResponse::new("Article deleted successfully")))
}
