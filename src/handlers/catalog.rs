// src/handlers/catalog.rs
//
// CRUD dos catálogos de tamanho e cor. A listagem pública aceita um filtro
// de categoria; entradas globais (sem categoria) aparecem sempre.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalog::{
        Color, CreateColorPayload, CreateSizePayload, Size, UpdateColorPayload,
        UpdateSizePayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCatalogQuery {
    pub category: Option<String>,
}

// --- Tamanhos ---

// GET /api/sizes
#[utoipa::path(
    get,
    path = "/api/sizes",
    tag = "Catálogo",
    params(ListCatalogQuery),
    responses((status = 200, description = "Listagem de tamanhos", body = Vec<Size>))
)]
pub async fn list_sizes(
    State(app_state): State<AppState>,
    Query(query): Query<ListCatalogQuery>,
) -> Result<impl IntoResponse, AppError> {
    let sizes = app_state
        .catalog_service
        .list_sizes(query.category.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(sizes)))
}

// GET /api/sizes/{id}
#[utoipa::path(
    get,
    path = "/api/sizes/{id}",
    tag = "Catálogo",
    params(("id" = Uuid, Path, description = "ID do tamanho")),
    responses(
        (status = 200, description = "Tamanho", body = Size),
        (status = 404, description = "Tamanho não encontrado")
    )
)]
pub async fn get_size(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let size = app_state.catalog_service.get_size(id).await?;
    Ok((StatusCode::OK, Json(size)))
}

// POST /api/sizes
#[utoipa::path(
    post,
    path = "/api/sizes",
    tag = "Catálogo",
    request_body = CreateSizePayload,
    responses(
        (status = 201, description = "Tamanho criado", body = Size),
        (status = 400, description = "Nome duplicado ou dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_size(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSizePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let size = app_state.catalog_service.create_size(payload).await?;
    Ok((StatusCode::CREATED, Json(size)))
}

// PUT /api/sizes/{id}
#[utoipa::path(
    put,
    path = "/api/sizes/{id}",
    tag = "Catálogo",
    params(("id" = Uuid, Path, description = "ID do tamanho")),
    request_body = UpdateSizePayload,
    responses(
        (status = 200, description = "Tamanho atualizado", body = Size),
        (status = 404, description = "Tamanho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_size(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSizePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let size = app_state.catalog_service.update_size(id, payload).await?;
    Ok((StatusCode::OK, Json(size)))
}

// DELETE /api/sizes/{id}
#[utoipa::path(
    delete,
    path = "/api/sizes/{id}",
    tag = "Catálogo",
    params(("id" = Uuid, Path, description = "ID do tamanho")),
    responses(
        (status = 200, description = "Tamanho excluído"),
        (status = 404, description = "Tamanho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_size(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_size(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Tamanho excluído com sucesso." })),
    ))
}

// --- Cores ---

// GET /api/colors
#[utoipa::path(
    get,
    path = "/api/colors",
    tag = "Catálogo",
    params(ListCatalogQuery),
    responses((status = 200, description = "Listagem de cores", body = Vec<Color>))
)]
pub async fn list_colors(
    State(app_state): State<AppState>,
    Query(query): Query<ListCatalogQuery>,
) -> Result<impl IntoResponse, AppError> {
    let colors = app_state
        .catalog_service
        .list_colors(query.category.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(colors)))
}

// GET /api/colors/{id}
#[utoipa::path(
    get,
    path = "/api/colors/{id}",
    tag = "Catálogo",
    params(("id" = Uuid, Path, description = "ID da cor")),
    responses(
        (status = 200, description = "Cor", body = Color),
        (status = 404, description = "Cor não encontrada")
    )
)]
pub async fn get_color(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let color = app_state.catalog_service.get_color(id).await?;
    Ok((StatusCode::OK, Json(color)))
}

// POST /api/colors
#[utoipa::path(
    post,
    path = "/api/colors",
    tag = "Catálogo",
    request_body = CreateColorPayload,
    responses(
        (status = 201, description = "Cor criada", body = Color),
        (status = 400, description = "Nome duplicado ou dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_color(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateColorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let color = app_state.catalog_service.create_color(payload).await?;
    Ok((StatusCode::CREATED, Json(color)))
}

// PUT /api/colors/{id}
#[utoipa::path(
    put,
    path = "/api/colors/{id}",
    tag = "Catálogo",
    params(("id" = Uuid, Path, description = "ID da cor")),
    request_body = UpdateColorPayload,
    responses(
        (status = 200, description = "Cor atualizada", body = Color),
        (status = 404, description = "Cor não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_color(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateColorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let color = app_state.catalog_service.update_color(id, payload).await?;
    Ok((StatusCode::OK, Json(color)))
}

// DELETE /api/colors/{id}
#[utoipa::path(
    delete,
    path = "/api/colors/{id}",
    tag = "Catálogo",
    params(("id" = Uuid, Path, description = "ID da cor")),
    responses(
        (status = 200, description = "Cor excluída"),
        (status = 404, description = "Cor não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_color(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_color(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Cor excluída com sucesso." })),
    ))
}
