// src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// Distingue "campo ausente" de "null explícito" na atualização parcial:
// ausente = mantém o valor atual (None), null = limpa (Some(None)).
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    // Texto livre com o nome da subcategoria; casado por nome
    // (case-insensitive) no filtro de listagem.
    pub subcategory: Option<String>,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub featured: bool,
    pub new_arrival: bool,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Produto como vai para a API: inclui nome e slug da categoria.
// O discount_price pode ter sido sobrescrito pela oferta especial
// (apenas na resposta, nunca persistido).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub product: Product,
    pub category_name: String,
    pub category_slug: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[serde(rename = "category")]
    pub category_id: Uuid,

    pub subcategory: Option<String>,

    // As imagens chegam como caminhos já publicados em /uploads
    #[validate(length(min = 1, message = "Pelo menos uma imagem é obrigatória."))]
    pub images: Vec<String>,

    #[serde(default)]
    pub sizes: Vec<String>,

    #[serde(default)]
    pub colors: Vec<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub discount_price: Option<Decimal>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub new_arrival: bool,

    #[validate(range(min = 0, message = "O estoque não pode ser negativo."))]
    #[serde(default)]
    pub stock: i32,
}

// Atualização parcial: campo ausente preserva o valor atual.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: Option<String>,

    #[serde(rename = "category")]
    pub category_id: Option<Uuid>,

    #[serde(default, deserialize_with = "explicit_null")]
    pub subcategory: Option<Option<String>>,

    #[validate(length(min = 1, message = "Pelo menos uma imagem é obrigatória."))]
    pub images: Option<Vec<String>>,

    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Option<Decimal>,

    // `discountPrice: null` remove o desconto; a não-negatividade do valor
    // presente é checada no service.
    #[serde(default, deserialize_with = "explicit_null")]
    pub discount_price: Option<Option<Decimal>>,

    pub featured: Option<bool>,
    pub new_arrival: Option<bool>,

    #[validate(range(min = 0, message = "O estoque não pode ser negativo."))]
    pub stock: Option<i32>,
}
