// src/models/settings.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Linha única da tabela store_settings (chave fixa id = TRUE).
#[derive(Debug, Clone, FromRow)]
pub struct SettingsRow {
    pub id: bool,
    pub contact_phone: String,
    pub contact_call_phone: String,
    pub contact_email: String,
    pub contact_address: String,
    pub contact_whatsapp: String,
    pub banner_images: Vec<String>,
    pub banner_title: String,
    pub banner_description: String,
    pub special_offer_enabled: bool,
    pub special_offer_percentage: Decimal,
    pub special_offer_title: String,
    pub delivery_fee: Decimal,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[schema(example = "(11) 99999-8888")]
    pub phone: String,
    pub call_phone: String,
    #[schema(example = "contato@sjclothing.com")]
    pub email: String,
    pub address: String,
    pub whatsapp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BannerSettings {
    pub images: Vec<String>,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecialOffer {
    pub enabled: bool,
    #[schema(example = 10.0)]
    pub percentage: Decimal,
    pub title: String,
}

// Forma aninhada que a API expõe (e que o admin edita por seções).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub contact: ContactInfo,
    pub banner: BannerSettings,
    pub special_offer: SpecialOffer,
    pub delivery_fee: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl From<SettingsRow> for StoreSettings {
    fn from(row: SettingsRow) -> Self {
        Self {
            contact: ContactInfo {
                phone: row.contact_phone,
                call_phone: row.contact_call_phone,
                email: row.contact_email,
                address: row.contact_address,
                whatsapp: row.contact_whatsapp,
            },
            banner: BannerSettings {
                images: row.banner_images,
                title: row.banner_title,
                description: row.banner_description,
            },
            special_offer: SpecialOffer {
                enabled: row.special_offer_enabled,
                percentage: row.special_offer_percentage,
                title: row.special_offer_title,
            },
            delivery_fee: row.delivery_fee,
            updated_at: row.updated_at,
        }
    }
}

// Payload de atualização: cada seção é opcional e, dentro dela,
// cada campo também. Campos ausentes preservam o valor atual.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsPayload {
    pub contact: Option<UpdateContactInfo>,
    pub banner: Option<UpdateBannerSettings>,
    pub special_offer: Option<UpdateSpecialOffer>,
    pub delivery_fee: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactInfo {
    pub phone: Option<String>,
    pub call_phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub whatsapp: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBannerSettings {
    pub images: Option<Vec<String>>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpecialOffer {
    pub enabled: Option<bool>,
    pub percentage: Option<Decimal>,
    pub title: Option<String>,
}
