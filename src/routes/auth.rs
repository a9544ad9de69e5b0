use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::db;
use crate::errors::{AppError, AppResult};
use crate::models::user::{LoginRequest, LoginResponse};
use crate::utils::verify_password;

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "No input data provided"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(AppError::bad_request("No input data provided"));
    };

    let user = db::users::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    if !verify_password(&password, &user.password_hash)? {
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let access_token = state.jwt.encode(user.id)?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        access_token,
    }))
}
