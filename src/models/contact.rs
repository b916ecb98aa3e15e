// src/models/contact.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub ip_address: Option<String>,
    pub read: bool,
    pub spam: bool,
    pub created_at: DateTime<Utc>,
}

// Página da listagem administrativa de mensagens.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessagePage {
    pub messages: Vec<ContactMessage>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    #[validate(length(min = 2, max = 200, message = "O nome deve ter entre 2 e 200 caracteres."))]
    pub name: String,

    #[validate(email(message = "E-mail inválido."))]
    pub email: String,

    pub phone: Option<String>,

    #[validate(length(
        min = 10,
        max = 5000,
        message = "A mensagem deve ter entre 10 e 5000 caracteres."
    ))]
    pub message: String,

    // Campo invisível no formulário. Preenchido = bot.
    pub honeypot: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageStats {
    pub total: i64,
    pub unread: i64,
    pub spam: i64,
    pub today: i64,
}
