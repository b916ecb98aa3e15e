// src/db/contact_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::contact::{ContactMessage, MessageStats},
};

#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    pub read: Option<bool>,
    pub spam: Option<bool>,
    pub search: Option<String>,
}

#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Mensagens recentes do mesmo e-mail OU do mesmo IP (janela de 5 minutos
    // do rate limiting).
    pub async fn count_recent(
        &self,
        email: &str,
        ip_address: &str,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM contact_messages
            WHERE (email = $1 OR ip_address = $2) AND created_at >= $3
            "#,
        )
        .bind(email)
        .bind(ip_address)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn count_by_ip_since(
        &self,
        ip_address: &str,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contact_messages WHERE ip_address = $1 AND created_at >= $2",
        )
        .bind(ip_address)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn insert(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        message: &str,
        ip_address: Option<&str>,
        spam: bool,
    ) -> Result<ContactMessage, AppError> {
        let saved = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, phone, message, ip_address, spam)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(message)
        .bind(ip_address)
        .bind(spam)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    fn apply_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &MessageFilter) {
        if let Some(read) = filter.read {
            qb.push(" AND read = ").push_bind(read);
        }
        if let Some(spam) = filter.spam {
            qb.push(" AND spam = ").push_bind(spam);
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR email ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR message ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }

    pub async fn page(
        &self,
        filter: &MessageFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContactMessage>, AppError> {
        let mut qb =
            QueryBuilder::<Postgres>::new("SELECT * FROM contact_messages WHERE TRUE");
        Self::apply_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let messages = qb
            .build_query_as::<ContactMessage>()
            .fetch_all(&self.pool)
            .await?;
        Ok(messages)
    }

    pub async fn count(&self, filter: &MessageFilter) -> Result<i64, AppError> {
        let mut qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM contact_messages WHERE TRUE");
        Self::apply_filter(&mut qb, filter);

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ContactMessage>, AppError> {
        let maybe =
            sqlx::query_as::<_, ContactMessage>("SELECT * FROM contact_messages WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(maybe)
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<Option<ContactMessage>, AppError> {
        let maybe = sqlx::query_as::<_, ContactMessage>(
            "UPDATE contact_messages SET read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    // Marcar como spam também marca como lida, como no painel original.
    pub async fn set_spam(&self, id: Uuid, spam: bool) -> Result<Option<ContactMessage>, AppError> {
        let maybe = sqlx::query_as::<_, ContactMessage>(
            "UPDATE contact_messages SET spam = $2, read = (read OR $2) WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(spam)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn stats(&self) -> Result<MessageStats, AppError> {
        let row = sqlx::query_as::<_, (i64, i64, i64, i64)>(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE NOT read),
                COUNT(*) FILTER (WHERE spam),
                COUNT(*) FILTER (WHERE created_at >= date_trunc('day', NOW()))
            FROM contact_messages
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(MessageStats {
            total: row.0,
            unread: row.1,
            spam: row.2,
            today: row.3,
        })
    }
}
