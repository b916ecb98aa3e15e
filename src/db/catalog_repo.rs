// src/db/catalog_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Color, Size},
};

// Repositório dos catálogos de tamanho e cor. A regra de visibilidade é a
// mesma para os dois: com filtro de categoria, entram as entradas daquela
// categoria e as globais (category_id NULL); sem filtro, entram todas.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Tamanhos ---

    pub async fn list_sizes(&self, category_id: Option<Uuid>) -> Result<Vec<Size>, AppError> {
        let sizes = sqlx::query_as::<_, Size>(
            r#"
            SELECT * FROM sizes
            WHERE $1::uuid IS NULL OR category_id = $1 OR category_id IS NULL
            ORDER BY sort_order, name
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sizes)
    }

    pub async fn find_size(&self, id: Uuid) -> Result<Option<Size>, AppError> {
        let maybe = sqlx::query_as::<_, Size>("SELECT * FROM sizes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn insert_size(
        &self,
        name: &str,
        display_name: &str,
        category_id: Option<Uuid>,
        sort_order: i32,
    ) -> Result<Size, AppError> {
        let size = sqlx::query_as::<_, Size>(
            r#"
            INSERT INTO sizes (name, display_name, category_id, sort_order)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(display_name)
        .bind(category_id)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_duplicate(e, "Já existe um tamanho com este nome."))?;
        Ok(size)
    }

    pub async fn update_size(&self, size: &Size) -> Result<Size, AppError> {
        let updated = sqlx::query_as::<_, Size>(
            r#"
            UPDATE sizes
            SET name = $2, display_name = $3, category_id = $4, sort_order = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(size.id)
        .bind(&size.name)
        .bind(&size.display_name)
        .bind(size.category_id)
        .bind(size.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_duplicate(e, "Já existe um tamanho com este nome."))?;
        Ok(updated)
    }

    pub async fn delete_size(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sizes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // --- Cores ---

    pub async fn list_colors(&self, category_id: Option<Uuid>) -> Result<Vec<Color>, AppError> {
        let colors = sqlx::query_as::<_, Color>(
            r#"
            SELECT * FROM colors
            WHERE $1::uuid IS NULL OR category_id = $1 OR category_id IS NULL
            ORDER BY sort_order, name
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(colors)
    }

    pub async fn find_color(&self, id: Uuid) -> Result<Option<Color>, AppError> {
        let maybe = sqlx::query_as::<_, Color>("SELECT * FROM colors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn insert_color(
        &self,
        name: &str,
        display_name: &str,
        hex_code: &str,
        category_id: Option<Uuid>,
        sort_order: i32,
    ) -> Result<Color, AppError> {
        let color = sqlx::query_as::<_, Color>(
            r#"
            INSERT INTO colors (name, display_name, hex_code, category_id, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(display_name)
        .bind(hex_code)
        .bind(category_id)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_duplicate(e, "Já existe uma cor com este nome."))?;
        Ok(color)
    }

    pub async fn update_color(&self, color: &Color) -> Result<Color, AppError> {
        let updated = sqlx::query_as::<_, Color>(
            r#"
            UPDATE colors
            SET name = $2, display_name = $3, hex_code = $4, category_id = $5,
                sort_order = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(color.id)
        .bind(&color.name)
        .bind(&color.display_name)
        .bind(&color.hex_code)
        .bind(color.category_id)
        .bind(color.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_duplicate(e, "Já existe uma cor com este nome."))?;
        Ok(updated)
    }

    pub async fn delete_color(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM colors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // O nome é único globalmente; a violação vira 400 com mensagem amigável.
    fn map_duplicate(e: sqlx::Error, message: &str) -> AppError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::BadRequest(message.to_string());
            }
        }
        e.into()
    }
}
