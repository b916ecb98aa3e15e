// src/handlers/orders.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::order::{
        CreateOrderPayload, OrderResponse, OrderStats, OrderStatus, UpdateStatusPayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListOrdersQuery {
    pub status: Option<OrderStatus>,
}

// POST /api/orders (público: o checkout não exige conta)
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Pedidos",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado", body = OrderResponse),
        (status = 400, description = "Estoque insuficiente ou dados inválidos"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state.order_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Pedidos",
    params(ListOrdersQuery),
    responses(
        (status = 200, description = "Pedidos, mais recentes primeiro", body = Vec<OrderResponse>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service.list(query.status).await?;
    Ok((StatusCode::OK, Json(orders)))
}

// GET /api/orders/stats
#[utoipa::path(
    get,
    path = "/api/orders/stats",
    tag = "Pedidos",
    responses(
        (status = 200, description = "Contagens por status e receita entregue", body = OrderStats)
    ),
    security(("api_jwt" = []))
)]
pub async fn order_stats(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.order_service.stats().await?;
    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Pedidos",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido com itens", body = OrderResponse),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.get(id).await?;
    Ok((StatusCode::OK, Json(order)))
}

// PUT /api/orders/{id}/status
#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    tag = "Pedidos",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = OrderResponse),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .update_status(id, payload.status)
        .await?;
    Ok((StatusCode::OK, Json(order)))
}
