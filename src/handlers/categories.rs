// src/handlers/categories.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::category::{Category, CategoryAdminRow, CategoryDetail, CategoryTree},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "O nome da categoria é obrigatório."))]
    #[schema(example = "Camisetas")]
    pub name: String,

    // String vazia = categoria principal
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub parent: Option<String>,

    #[schema(example = "/uploads/camisetas.jpg")]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryPayload {
    pub name: Option<String>,
    pub parent: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListCategoriesQuery {
    // true = listagem plana do painel, com o nome do pai em cada linha;
    // false/ausente = árvore da vitrine (principais + filhas populadas)
    #[serde(default)]
    pub include_subcategories: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CategoryListMode {
    Flat,
    Tree,
}

impl CategoryListMode {
    pub fn from_query(include_subcategories: bool) -> Self {
        if include_subcategories {
            Self::Flat
        } else {
            Self::Tree
        }
    }
}

// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categorias",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "Listagem de categorias", body = Vec<CategoryTree>)
    )
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<impl IntoResponse, AppError> {
    match CategoryListMode::from_query(query.include_subcategories) {
        CategoryListMode::Flat => {
            let rows: Vec<CategoryAdminRow> = app_state.category_service.list_admin().await?;
            Ok((StatusCode::OK, Json(json!(rows))))
        }
        CategoryListMode::Tree => {
            let trees: Vec<CategoryTree> = app_state.category_service.list_public().await?;
            Ok((StatusCode::OK, Json(json!(trees))))
        }
    }
}

// GET /api/categories/{id}
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "Categorias",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria com pai e filhas", body = CategoryDetail),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn get_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.category_service.get(id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

// POST /api/categories
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Categorias",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 400, description = "Dados inválidos ou slug duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .category_service
        .create(
            &payload.name,
            payload.parent.as_deref(),
            payload.image.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

// PUT /api/categories/{id}
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "Categorias",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    request_body = UpdateCategoryPayload,
    responses(
        (status = 200, description = "Categoria atualizada", body = CategoryDetail),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let detail = app_state
        .category_service
        .update(
            id,
            payload.name.as_deref(),
            payload.parent.as_deref(),
            payload.image.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(detail)))
}

// DELETE /api/categories/{id}
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "Categorias",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria excluída"),
        (status = 400, description = "Categoria em uso por produtos"),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.category_service.delete(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Categoria excluída com sucesso." })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // A flag devolve a listagem plana do painel; a vitrine, que chama sem
    // flag, recebe a árvore.
    #[test]
    fn flag_selects_flat_admin_listing() {
        assert_eq!(CategoryListMode::from_query(true), CategoryListMode::Flat);
    }

    #[test]
    fn default_is_the_storefront_tree() {
        assert_eq!(CategoryListMode::from_query(false), CategoryListMode::Tree);
    }
}
