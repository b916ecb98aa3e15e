// src/db/category_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::category::{Category, CategoryAdminRow},
};

pub(crate) fn duplicate_slug_error(parent_id: Option<Uuid>) -> AppError {
    AppError::BadRequest(if parent_id.is_some() {
        "Já existe uma subcategoria com este nome sob esta categoria.".to_string()
    } else {
        "Já existe uma categoria com este nome.".to_string()
    })
}

#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let maybe = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    // Procura colisão de (slug, parent). IS NOT DISTINCT FROM trata o caso
    // de parent NULL; exclude permite ignorar a própria categoria no update.
    pub async fn find_duplicate_slug(
        &self,
        slug: &str,
        parent_id: Option<Uuid>,
        exclude: Option<Uuid>,
    ) -> Result<Option<Category>, AppError> {
        let maybe = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories
            WHERE slug = $1
              AND parent_id IS NOT DISTINCT FROM $2
              AND ($3::uuid IS NULL OR id <> $3)
            "#,
        )
        .bind(slug)
        .bind(parent_id)
        .bind(exclude)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    // Modo admin: todas as categorias, com o nome do pai, ordenadas por
    // (pai, nome) — as principais primeiro.
    pub async fn list_admin(&self) -> Result<Vec<CategoryAdminRow>, AppError> {
        let rows = sqlx::query_as::<_, CategoryAdminRow>(
            r#"
            SELECT c.*, p.name AS parent_name
            FROM categories c
            LEFT JOIN categories p ON p.id = c.parent_id
            ORDER BY c.parent_id NULLS FIRST, c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_main(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE parent_id IS NULL ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_children(&self, parent_id: Uuid) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE parent_id = $1 ORDER BY name",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_children_of(&self, parent_ids: &[Uuid]) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE parent_id = ANY($1) ORDER BY name",
        )
        .bind(parent_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn child_ids(&self, parent_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM categories WHERE parent_id = $1",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    // A violação do índice único vira um 400 com a mensagem certa
    // (categoria vs subcategoria), em vez de vazar o erro do banco.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        name: &str,
        slug: &str,
        parent_id: Option<Uuid>,
        image: Option<&str>,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, slug, parent_id, image)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(parent_id)
        .bind(image)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return duplicate_slug_error(parent_id);
                }
            }
            e.into()
        })?;
        Ok(category)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        slug: &str,
        parent_id: Option<Uuid>,
        image: Option<&str>,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, slug = $3, parent_id = $4, image = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .bind(parent_id)
        .bind(image)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return duplicate_slug_error(parent_id);
                }
            }
            e.into()
        })?;
        Ok(category)
    }

    pub async fn delete_children<'e, E>(
        &self,
        executor: E,
        parent_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM categories WHERE parent_id = $1")
            .bind(parent_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
