// src/services/catalog_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{
        Color, CreateColorPayload, CreateSizePayload, Size, UpdateColorPayload,
        UpdateSizePayload,
    },
    services::category_service::normalize_parent,
};

// Normalização dos nomes de catálogo: tamanho em MAIÚSCULAS, cor em
// minúsculas, ambos sem espaços nas pontas.
pub fn normalize_size_name(name: &str) -> String {
    name.trim().to_uppercase()
}

pub fn normalize_color_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Clone)]
pub struct CatalogService {
    catalog_repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(catalog_repo: CatalogRepository) -> Self {
        Self { catalog_repo }
    }

    // --- Tamanhos ---

    pub async fn list_sizes(&self, category: Option<&str>) -> Result<Vec<Size>, AppError> {
        let category_id = normalize_parent(category)?;
        self.catalog_repo.list_sizes(category_id).await
    }

    pub async fn get_size(&self, id: Uuid) -> Result<Size, AppError> {
        self.catalog_repo
            .find_size(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tamanho não encontrado.".to_string()))
    }

    pub async fn create_size(&self, payload: CreateSizePayload) -> Result<Size, AppError> {
        let category_id = normalize_parent(payload.category.as_deref())?;
        self.catalog_repo
            .insert_size(
                &normalize_size_name(&payload.name),
                payload.display_name.trim(),
                category_id,
                payload.sort_order.unwrap_or(0),
            )
            .await
    }

    pub async fn update_size(
        &self,
        id: Uuid,
        payload: UpdateSizePayload,
    ) -> Result<Size, AppError> {
        let mut size = self.get_size(id).await?;

        if let Some(name) = payload.name {
            size.name = normalize_size_name(&name);
        }
        if let Some(display_name) = payload.display_name {
            size.display_name = display_name.trim().to_string();
        }
        if let Some(category) = payload.category {
            size.category_id = normalize_parent(Some(&category))?;
        }
        if let Some(sort_order) = payload.sort_order {
            size.sort_order = sort_order;
        }

        self.catalog_repo.update_size(&size).await
    }

    pub async fn delete_size(&self, id: Uuid) -> Result<(), AppError> {
        self.get_size(id).await?;
        self.catalog_repo.delete_size(id).await
    }

    // --- Cores ---

    pub async fn list_colors(&self, category: Option<&str>) -> Result<Vec<Color>, AppError> {
        let category_id = normalize_parent(category)?;
        self.catalog_repo.list_colors(category_id).await
    }

    pub async fn get_color(&self, id: Uuid) -> Result<Color, AppError> {
        self.catalog_repo
            .find_color(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cor não encontrada.".to_string()))
    }

    pub async fn create_color(&self, payload: CreateColorPayload) -> Result<Color, AppError> {
        let category_id = normalize_parent(payload.category.as_deref())?;
        self.catalog_repo
            .insert_color(
                &normalize_color_name(&payload.name),
                payload.display_name.trim(),
                payload.hex_code.as_deref().unwrap_or("#000000"),
                category_id,
                payload.sort_order.unwrap_or(0),
            )
            .await
    }

    pub async fn update_color(
        &self,
        id: Uuid,
        payload: UpdateColorPayload,
    ) -> Result<Color, AppError> {
        let mut color = self.get_color(id).await?;

        if let Some(name) = payload.name {
            color.name = normalize_color_name(&name);
        }
        if let Some(display_name) = payload.display_name {
            color.display_name = display_name.trim().to_string();
        }
        if let Some(hex_code) = payload.hex_code {
            color.hex_code = hex_code;
        }
        if let Some(category) = payload.category {
            color.category_id = normalize_parent(Some(&category))?;
        }
        if let Some(sort_order) = payload.sort_order {
            color.sort_order = sort_order;
        }

        self.catalog_repo.update_color(&color).await
    }

    pub async fn delete_color(&self, id: Uuid) -> Result<(), AppError> {
        self.get_color(id).await?;
        self.catalog_repo.delete_color(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_name_is_uppercased_and_trimmed() {
        assert_eq!(normalize_size_name("  gg "), "GG");
        assert_eq!(normalize_size_name("m"), "M");
    }

    #[test]
    fn color_name_is_lowercased_and_trimmed() {
        assert_eq!(normalize_color_name(" Azul Marinho "), "azul marinho");
        assert_eq!(normalize_color_name("PRETO"), "preto");
    }
}
