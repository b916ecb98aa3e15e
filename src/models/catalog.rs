// src/models/catalog.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Catálogos de tamanho e cor. category_id = NULL significa "global":
// a entrada vale para qualquer categoria.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub category_id: Option<Uuid>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub hex_code: String,
    pub category_id: Option<Uuid>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSizePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "O nome de exibição é obrigatório."))]
    pub display_name: String,

    // String vazia = catálogo global
    pub category: Option<String>,

    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSizePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "O nome de exibição é obrigatório."))]
    pub display_name: Option<String>,

    pub category: Option<String>,

    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateColorPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "O nome de exibição é obrigatório."))]
    pub display_name: String,

    pub hex_code: Option<String>,

    pub category: Option<String>,

    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateColorPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "O nome de exibição é obrigatório."))]
    pub display_name: Option<String>,

    pub hex_code: Option<String>,

    pub category: Option<String>,

    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}
