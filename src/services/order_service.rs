// src/services/order_service.rs

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OrderRepository, ProductRepository, SettingsRepository},
    models::{
        order::{
            CreateOrderPayload, OrderItem, OrderItemRequest, OrderResponse, OrderStats,
            OrderStatus,
        },
        product::Product,
    },
};

pub const PAYMENT_CASH_ON_DELIVERY: &str = "Cash on Delivery";

// Item já validado e precificado, pronto para virar linha de order_items.
#[derive(Debug, Clone)]
pub struct PricedItem {
    pub product_id: Uuid,
    pub title: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}

// Núcleo do pedido: valida estoque item a item, aplica o preço efetivo
// (desconto próprio, se houver) e acumula o total. O estoque é conferido
// mas não é decrementado; a baixa é feita manualmente pela operação.
pub fn price_items(
    lines: &[(Product, OrderItemRequest)],
) -> Result<(Vec<PricedItem>, Decimal), AppError> {
    let mut total = Decimal::ZERO;
    let mut priced = Vec::with_capacity(lines.len());

    for (product, request) in lines {
        if request.quantity < 1 {
            return Err(AppError::BadRequest(format!(
                "Quantidade inválida para \"{}\".",
                product.title
            )));
        }
        if product.stock == 0 {
            return Err(AppError::BadRequest(format!(
                "O produto \"{}\" está esgotado.",
                product.title
            )));
        }
        if request.quantity > product.stock {
            return Err(AppError::BadRequest(format!(
                "Apenas {} unidades disponíveis para \"{}\". Você pediu {}.",
                product.stock, product.title, request.quantity
            )));
        }

        let price = product.discount_price.unwrap_or(product.price);
        total += price * Decimal::from(request.quantity);

        priced.push(PricedItem {
            product_id: product.id,
            title: product.title.clone(),
            size: request.size.clone(),
            color: request.color.clone(),
            quantity: request.quantity,
            price,
        });
    }

    Ok((priced, total))
}

// Número do pedido: timestamp em milissegundos + aleatório + pid. A colisão
// é tratada como improvável; se acontecer, o índice único devolve 400.
pub fn generate_order_number() -> String {
    let timestamp = Utc::now().timestamp_millis();
    let random: u32 = rand::rng().random_range(0..100_000);
    format!("ORD-{}-{}-{}", timestamp, random, std::process::id())
}

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    product_repo: ProductRepository,
    settings_repo: SettingsRepository,
    pool: sqlx::PgPool,
}

impl OrderService {
    pub fn new(
        order_repo: OrderRepository,
        product_repo: ProductRepository,
        settings_repo: SettingsRepository,
        pool: sqlx::PgPool,
    ) -> Self {
        Self {
            order_repo,
            product_repo,
            settings_repo,
            pool,
        }
    }

    pub async fn create(&self, payload: CreateOrderPayload) -> Result<OrderResponse, AppError> {
        // Carrega os produtos na ordem dos itens; qualquer id desconhecido
        // aborta o pedido inteiro.
        let mut lines = Vec::with_capacity(payload.items.len());
        for request in payload.items {
            let product = self
                .product_repo
                .find_by_id(request.product)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Produto {} não encontrado.", request.product))
                })?;
            lines.push((product, request));
        }

        let (priced, total_amount) = price_items(&lines)?;

        let delivery_fee = self.settings_repo.get_or_create().await?.delivery_fee;
        let order_number = generate_order_number();

        // Pedido e itens na mesma transação: ou grava tudo, ou nada.
        let mut tx = self.pool.begin().await?;

        let order = self
            .order_repo
            .insert_order(
                &mut *tx,
                &order_number,
                payload.customer.name.trim(),
                payload.customer.phone.trim(),
                payload.customer.email.trim(),
                payload.customer.address.trim(),
                total_amount,
                delivery_fee,
                PAYMENT_CASH_ON_DELIVERY,
            )
            .await?;

        let mut items = Vec::with_capacity(priced.len());
        for item in &priced {
            let saved = self
                .order_repo
                .insert_item(
                    &mut *tx,
                    order.id,
                    item.product_id,
                    &item.title,
                    item.size.as_deref(),
                    item.color.as_deref(),
                    item.quantity,
                    item.price,
                )
                .await?;
            items.push(saved);
        }

        tx.commit().await?;

        tracing::info!("✅ Pedido criado: {}", order.order_number);
        Ok(OrderResponse::from_parts(order, items))
    }

    pub async fn list(&self, status: Option<OrderStatus>) -> Result<Vec<OrderResponse>, AppError> {
        let orders = self.order_repo.list(status).await?;
        let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let mut all_items = self.order_repo.items_for_orders(&ids).await?;

        let mut responses: Vec<OrderResponse> = orders
            .into_iter()
            .map(|order| OrderResponse::from_parts(order, Vec::new()))
            .collect();

        for item in all_items.drain(..) {
            if let Some(response) = responses.iter_mut().find(|r| r.id == item.order_id) {
                response.items.push(item);
            }
        }

        Ok(responses)
    }

    pub async fn get(&self, id: Uuid) -> Result<OrderResponse, AppError> {
        let order = self
            .order_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pedido não encontrado.".to_string()))?;
        let items: Vec<OrderItem> = self.order_repo.items_for_order(id).await?;
        Ok(OrderResponse::from_parts(order, items))
    }

    // O status é de livre escolha entre os quatro valores do enum; não há
    // máquina de estados imposta aqui.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<OrderResponse, AppError> {
        let order = self
            .order_repo
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Pedido não encontrado.".to_string()))?;
        let items = self.order_repo.items_for_order(id).await?;
        Ok(OrderResponse::from_parts(order, items))
    }

    pub async fn stats(&self) -> Result<OrderStats, AppError> {
        self.order_repo.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(title: &str, price: i64, discount: Option<i64>, stock: i32) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: "desc".to_string(),
            category_id: Uuid::new_v4(),
            subcategory: None,
            images: vec!["/uploads/x.jpg".to_string()],
            sizes: vec![],
            colors: vec![],
            price: Decimal::from(price),
            discount_price: discount.map(Decimal::from),
            featured: false,
            new_arrival: false,
            stock,
            created_at: now,
            updated_at: now,
        }
    }

    fn request(product_id: Uuid, quantity: i32) -> OrderItemRequest {
        OrderItemRequest {
            product: product_id,
            size: Some("M".to_string()),
            color: None,
            quantity,
        }
    }

    #[test]
    fn total_mixes_discounted_and_plain_prices() {
        let a = product("Camiseta", 20, None, 10);
        let b = product("Calça", 40, Some(15), 10);
        let lines = vec![
            (a.clone(), request(a.id, 2)),
            (b.clone(), request(b.id, 1)),
        ];

        let (items, total) = price_items(&lines).unwrap();
        // 20 * 2 + 15 * 1 = 55
        assert_eq!(total, Decimal::from(55));
        assert_eq!(items[0].price, Decimal::from(20));
        assert_eq!(items[1].price, Decimal::from(15));
    }

    #[test]
    fn snapshot_keeps_title_and_effective_price() {
        let p = product("Jaqueta", 200, Some(150), 3);
        let lines = vec![(p.clone(), request(p.id, 1))];

        let (items, _) = price_items(&lines).unwrap();
        assert_eq!(items[0].title, "Jaqueta");
        assert_eq!(items[0].price, Decimal::from(150));
        assert_eq!(items[0].product_id, p.id);
    }

    #[test]
    fn out_of_stock_rejects_whole_order() {
        let a = product("Disponível", 10, None, 5);
        let b = product("Esgotado", 10, None, 0);
        let lines = vec![
            (a.clone(), request(a.id, 1)),
            (b.clone(), request(b.id, 1)),
        ];

        let err = price_items(&lines).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("Esgotado")));
    }

    #[test]
    fn insufficient_stock_reports_available_count() {
        let p = product("Camiseta", 10, None, 3);
        let lines = vec![(p.clone(), request(p.id, 5))];

        let err = price_items(&lines).unwrap_err();
        match err {
            AppError::BadRequest(msg) => {
                assert!(msg.contains("Apenas 3 unidades"));
                assert!(msg.contains("Você pediu 5"));
            }
            other => panic!("erro inesperado: {other:?}"),
        }
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let p = product("Camiseta", 10, None, 3);
        let lines = vec![(p.clone(), request(p.id, 0))];
        assert!(price_items(&lines).is_err());
    }

    #[test]
    fn order_number_has_expected_shape() {
        let number = generate_order_number();
        let parts: Vec<&str> = number.split('-').collect();

        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "ORD");
        assert!(parts[1].parse::<i64>().is_ok()); // timestamp
        let random: u32 = parts[2].parse().unwrap();
        assert!(random < 100_000);
        assert_eq!(parts[3].parse::<u32>().unwrap(), std::process::id());
    }
}
