// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status")]
pub enum OrderStatus {
    Pending,
    Processing,
    Dispatched,
    Delivered,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub customer_address: String,
    pub total_amount: Decimal,
    pub delivery_fee: Decimal,
    pub payment_method: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

// Item com snapshot de título e preço tirados no momento da compra.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub title: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}

// Forma da API: pedido com o cliente aninhado e os itens juntos.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub items: Vec<OrderItem>,
    pub customer: CustomerInfo,
    pub total_amount: Decimal,
    pub delivery_fee: Decimal,
    pub payment_method: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderResponse {
    pub fn from_parts(order: Order, items: Vec<OrderItem>) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            items,
            customer: CustomerInfo {
                name: order.customer_name,
                phone: order.customer_phone,
                email: order.customer_email,
                address: order.customer_address,
            },
            total_amount: order.total_amount,
            delivery_fee: order.delivery_fee,
            payment_method: order.payment_method,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[validate(length(min = 1, message = "O nome do cliente é obrigatório."))]
    pub name: String,
    #[validate(length(min = 1, message = "O telefone do cliente é obrigatório."))]
    pub phone: String,
    #[validate(email(message = "O e-mail do cliente é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "O endereço do cliente é obrigatório."))]
    pub address: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[validate(length(min = 1, message = "Os itens do pedido são obrigatórios."))]
    pub items: Vec<OrderItemRequest>,

    #[validate(nested)]
    pub customer: CustomerInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product: Uuid,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub processing_orders: i64,
    pub dispatched_orders: i64,
    pub delivered_orders: i64,
    pub total_revenue: Decimal,
}
