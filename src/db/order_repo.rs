// src/db/order_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::order::{Order, OrderItem, OrderStats, OrderStatus},
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // A inserção do pedido e dos itens roda dentro da transação aberta pelo
    // service, por isso os métodos de escrita recebem o executor.
    pub async fn insert_order<'e, E>(
        &self,
        executor: E,
        order_number: &str,
        customer_name: &str,
        customer_phone: &str,
        customer_email: &str,
        customer_address: &str,
        total_amount: Decimal,
        delivery_fee: Decimal,
        payment_method: &str,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders
                (order_number, customer_name, customer_phone, customer_email,
                 customer_address, total_amount, delivery_fee, payment_method)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(order_number)
        .bind(customer_name)
        .bind(customer_phone)
        .bind(customer_email)
        .bind(customer_address)
        .bind(total_amount)
        .bind(delivery_fee)
        .bind(payment_method)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    // Colisão do número do pedido (timestamp + aleatório + pid)
                    return AppError::BadRequest(
                        "Número de pedido já existe. Tente novamente.".to_string(),
                    );
                }
            }
            e.into()
        })?;
        Ok(order)
    }

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        product_id: Uuid,
        title: &str,
        size: Option<&str>,
        color: Option<&str>,
        quantity: i32,
        price: Decimal,
    ) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items
                (order_id, product_id, title, size, color, quantity, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(title)
        .bind(size)
        .bind(color)
        .bind(quantity)
        .bind(price)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    pub async fn list(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE $1::order_status IS NULL OR status = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let maybe = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn items_for_order(&self, order_id: Uuid) -> Result<Vec<OrderItem>, AppError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn items_for_orders(&self, order_ids: &[Uuid]) -> Result<Vec<OrderItem>, AppError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = ANY($1)",
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, AppError> {
        let maybe = sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    // Indicadores do painel: contagem por status e receita dos entregues.
    pub async fn stats(&self) -> Result<OrderStats, AppError> {
        let row = sqlx::query_as::<_, (i64, i64, i64, i64, i64, Decimal)>(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'Pending'),
                COUNT(*) FILTER (WHERE status = 'Processing'),
                COUNT(*) FILTER (WHERE status = 'Dispatched'),
                COUNT(*) FILTER (WHERE status = 'Delivered'),
                COALESCE(SUM(total_amount) FILTER (WHERE status = 'Delivered'), 0)
            FROM orders
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(OrderStats {
            total_orders: row.0,
            pending_orders: row.1,
            processing_orders: row.2,
            dispatched_orders: row.3,
            delivered_orders: row.4,
            total_revenue: row.5,
        })
    }
}
