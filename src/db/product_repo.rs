// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::product::{Product, ProductView},
};

// Filtro de categoria já resolvido pelo service (ver product_service).
#[derive(Debug, Clone)]
pub enum CategoryFilter {
    // Sem filtro de categoria
    Any,
    // Id inválido ou inexistente: a listagem devolve vazio, não erro
    NoMatch,
    // Subcategoria: produtos atribuídos diretamente a ela, OU atribuídos ao
    // pai com o campo de texto `subcategory` casando com o nome dela.
    Subcategory {
        id: Uuid,
        parent_id: Uuid,
        name: String,
    },
    // Categoria principal: produtos dela ou de qualquer subcategoria.
    Main { id: Uuid, children: Vec<Uuid> },
}

#[derive(Debug, Clone)]
pub struct ProductQuery {
    pub category: CategoryFilter,
    pub featured: bool,
    pub new_arrival: bool,
    pub search: Option<String>,
}

const SELECT_VIEW: &str = r#"
SELECT p.*, c.name AS category_name, c.slug AS category_slug
FROM products p
JOIN categories c ON c.id = p.category_id
"#;

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &ProductQuery) -> Result<Vec<ProductView>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_VIEW);
        qb.push(" WHERE TRUE");

        match &query.category {
            CategoryFilter::Any => {}
            CategoryFilter::NoMatch => {
                qb.push(" AND FALSE");
            }
            CategoryFilter::Subcategory { id, parent_id, name } => {
                qb.push(" AND (p.category_id = ")
                    .push_bind(*id)
                    .push(" OR (p.category_id = ")
                    .push_bind(*parent_id)
                    .push(" AND p.subcategory ILIKE ")
                    .push_bind(format!("%{}%", name))
                    .push("))");
            }
            CategoryFilter::Main { id, children } => {
                qb.push(" AND (p.category_id = ")
                    .push_bind(*id)
                    .push(" OR p.category_id = ANY(")
                    .push_bind(children.clone())
                    .push("))");
            }
        }

        if query.featured {
            qb.push(" AND p.featured");
        }
        if query.new_arrival {
            qb.push(" AND p.new_arrival");
        }
        if let Some(search) = &query.search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (p.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR p.description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        qb.push(" ORDER BY p.created_at DESC");

        let products = qb
            .build_query_as::<ProductView>()
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let maybe = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn find_view_by_id(&self, id: Uuid) -> Result<Option<ProductView>, AppError> {
        let sql = format!("{SELECT_VIEW} WHERE p.id = $1");
        let maybe = sqlx::query_as::<_, ProductView>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn count_by_category(&self, category_id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products WHERE category_id = $1",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        &self,
        title: &str,
        description: &str,
        category_id: Uuid,
        subcategory: Option<&str>,
        images: &[String],
        sizes: &[String],
        colors: &[String],
        price: Decimal,
        discount_price: Option<Decimal>,
        featured: bool,
        new_arrival: bool,
        stock: i32,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (title, description, category_id, subcategory, images, sizes,
                 colors, price, discount_price, featured, new_arrival, stock)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(category_id)
        .bind(subcategory)
        .bind(images)
        .bind(sizes)
        .bind(colors)
        .bind(price)
        .bind(discount_price)
        .bind(featured)
        .bind(new_arrival)
        .bind(stock)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    // Atualização por linha inteira: o service faz o merge dos campos
    // opcionais sobre o produto carregado e grava tudo de uma vez.
    pub async fn update(&self, product: &Product) -> Result<Product, AppError> {
        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                title = $2, description = $3, category_id = $4, subcategory = $5,
                images = $6, sizes = $7, colors = $8, price = $9,
                discount_price = $10, featured = $11, new_arrival = $12,
                stock = $13, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(product.id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.category_id)
        .bind(&product.subcategory)
        .bind(&product.images)
        .bind(&product.sizes)
        .bind(&product.colors)
        .bind(product.price)
        .bind(product.discount_price)
        .bind(product.featured)
        .bind(product.new_arrival)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
