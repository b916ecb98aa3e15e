// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedAdmin,
    models::auth::{AdminProfile, AuthResponse, LoginPayload},
};

// POST /api/auth/admin/login
#[utoipa::path(
    post,
    path = "/api/auth/admin/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login efetuado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = app_state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}

// GET /api/auth/admin/me
#[utoipa::path(
    get,
    path = "/api/auth/admin/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Administrador autenticado", body = AdminProfile),
        (status = 401, description = "Token inválido ou ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn me(AuthenticatedAdmin(admin): AuthenticatedAdmin) -> impl IntoResponse {
    (StatusCode::OK, Json(AdminProfile::from(&admin)))
}
