// src/db/settings_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::settings::{SettingsRow, StoreSettings, UpdateSettingsPayload},
};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Singleton com chave fixa: o upsert garante que a primeira leitura cria
    // a linha de defaults e leituras concorrentes não criam duplicatas.
    pub async fn get_or_create(&self) -> Result<SettingsRow, AppError> {
        sqlx::query("INSERT INTO store_settings (id) VALUES (TRUE) ON CONFLICT (id) DO NOTHING")
            .execute(&self.pool)
            .await?;

        let row = sqlx::query_as::<_, SettingsRow>("SELECT * FROM store_settings WHERE id = TRUE")
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    // Atualização por seções: só os campos presentes no payload sobrescrevem
    // o valor atual; o resto é preservado.
    pub async fn update(&self, input: UpdateSettingsPayload) -> Result<StoreSettings, AppError> {
        let mut row = self.get_or_create().await?;

        if let Some(contact) = input.contact {
            if let Some(v) = contact.phone {
                row.contact_phone = v;
            }
            if let Some(v) = contact.call_phone {
                row.contact_call_phone = v;
            }
            if let Some(v) = contact.email {
                row.contact_email = v;
            }
            if let Some(v) = contact.address {
                row.contact_address = v;
            }
            if let Some(v) = contact.whatsapp {
                row.contact_whatsapp = v;
            }
        }

        if let Some(banner) = input.banner {
            if let Some(v) = banner.images {
                row.banner_images = v;
            }
            if let Some(v) = banner.title {
                row.banner_title = v;
            }
            if let Some(v) = banner.description {
                row.banner_description = v;
            }
        }

        if let Some(offer) = input.special_offer {
            if let Some(v) = offer.enabled {
                row.special_offer_enabled = v;
            }
            if let Some(v) = offer.percentage {
                row.special_offer_percentage = v;
            }
            if let Some(v) = offer.title {
                row.special_offer_title = v;
            }
        }

        if let Some(fee) = input.delivery_fee {
            row.delivery_fee = fee;
        }

        let updated = sqlx::query_as::<_, SettingsRow>(
            r#"
            UPDATE store_settings SET
                contact_phone = $1, contact_call_phone = $2, contact_email = $3,
                contact_address = $4, contact_whatsapp = $5,
                banner_images = $6, banner_title = $7, banner_description = $8,
                special_offer_enabled = $9, special_offer_percentage = $10,
                special_offer_title = $11, delivery_fee = $12, updated_at = NOW()
            WHERE id = TRUE
            RETURNING *
            "#,
        )
        .bind(&row.contact_phone)
        .bind(&row.contact_call_phone)
        .bind(&row.contact_email)
        .bind(&row.contact_address)
        .bind(&row.contact_whatsapp)
        .bind(&row.banner_images)
        .bind(&row.banner_title)
        .bind(&row.banner_description)
        .bind(row.special_offer_enabled)
        .bind(row.special_offer_percentage)
        .bind(&row.special_offer_title)
        .bind(row.delivery_fee)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated.into())
    }
}
