// src/handlers/contact.rs

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, StatusCode},
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
    db::contact_repo::MessageFilter,
    models::contact::{ContactMessage, ContactPayload, MessagePage, MessageStats},
};

// IP do cliente: atrás de proxy vale o primeiro x-forwarded-for (ou
// x-real-ip); sem proxy, o endereço da conexão.
fn client_ip(headers: &HeaderMap, addr: &SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .unwrap_or_else(|| addr.ip().to_string())
}

// POST /api/settings/contact (formulário público)
#[utoipa::path(
    post,
    path = "/api/settings/contact",
    tag = "Contato",
    request_body = ContactPayload,
    responses(
        (status = 200, description = "Mensagem recebida"),
        (status = 400, description = "Dados inválidos"),
        (status = 429, description = "Limite de envios atingido")
    )
)]
pub async fn submit_contact(
    State(app_state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<ContactPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ip = client_ip(&headers, &addr);
    app_state.contact_service.submit(payload, Some(ip)).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Mensagem enviada com sucesso. Retornaremos em breve!" })),
    ))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListMessagesQuery {
    pub read: Option<bool>,
    pub spam: Option<bool>,
    pub search: Option<String>,
    pub page: Option<i64>,
}

// GET /api/contact-messages
#[utoipa::path(
    get,
    path = "/api/contact-messages",
    tag = "Contato",
    params(ListMessagesQuery),
    responses(
        (status = 200, description = "Página de mensagens", body = MessagePage)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_messages(
    State(app_state): State<AppState>,
    Query(query): Query<ListMessagesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = MessageFilter {
        read: query.read,
        spam: query.spam,
        search: query.search.filter(|s| !s.trim().is_empty()),
    };
    let page = app_state
        .contact_service
        .list(filter, query.page.unwrap_or(1))
        .await?;
    Ok((StatusCode::OK, Json(page)))
}

// GET /api/contact-messages/stats
#[utoipa::path(
    get,
    path = "/api/contact-messages/stats",
    tag = "Contato",
    responses((status = 200, description = "Contadores do painel", body = MessageStats)),
    security(("api_jwt" = []))
)]
pub async fn message_stats(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.contact_service.stats().await?;
    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/contact-messages/{id}
#[utoipa::path(
    get,
    path = "/api/contact-messages/{id}",
    tag = "Contato",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 200, description = "Mensagem", body = ContactMessage),
        (status = 404, description = "Mensagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_message(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let message = app_state.contact_service.get(id).await?;
    Ok((StatusCode::OK, Json(message)))
}

// PUT /api/contact-messages/{id}/read
#[utoipa::path(
    put,
    path = "/api/contact-messages/{id}/read",
    tag = "Contato",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 200, description = "Mensagem marcada como lida", body = ContactMessage),
        (status = 404, description = "Mensagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_message_read(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let message = app_state.contact_service.mark_read(id).await?;
    Ok((StatusCode::OK, Json(message)))
}

// PUT /api/contact-messages/{id}/spam
#[utoipa::path(
    put,
    path = "/api/contact-messages/{id}/spam",
    tag = "Contato",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 200, description = "Mensagem marcada como spam", body = ContactMessage),
        (status = 404, description = "Mensagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_message_spam(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let message = app_state.contact_service.set_spam(id, true).await?;
    Ok((StatusCode::OK, Json(message)))
}

// PUT /api/contact-messages/{id}/not-spam
#[utoipa::path(
    put,
    path = "/api/contact-messages/{id}/not-spam",
    tag = "Contato",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 200, description = "Marcação de spam removida", body = ContactMessage),
        (status = 404, description = "Mensagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_message_not_spam(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let message = app_state.contact_service.set_spam(id, false).await?;
    Ok((StatusCode::OK, Json(message)))
}

// DELETE /api/contact-messages/{id}
#[utoipa::path(
    delete,
    path = "/api/contact-messages/{id}",
    tag = "Contato",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 200, description = "Mensagem excluída"),
        (status = 404, description = "Mensagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_message(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.contact_service.delete(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Mensagem excluída com sucesso." })),
    ))
}
