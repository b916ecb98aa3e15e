// src/services/product_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        product_repo::{CategoryFilter, ProductQuery},
        CategoryRepository, ProductRepository, SettingsRepository,
    },
    models::{
        product::{CreateProductPayload, Product, ProductView, UpdateProductPayload},
        settings::SpecialOffer,
    },
};

// Sobrepõe a oferta especial da loja aos produtos da resposta: quem não tem
// desconto próprio ganha um discount_price calculado. Nada é persistido.
pub fn apply_special_offer(products: &mut [ProductView], offer: &SpecialOffer) {
    if !offer.enabled || offer.percentage <= Decimal::ZERO {
        return;
    }
    let factor = Decimal::ONE - offer.percentage / Decimal::from(100);
    for view in products.iter_mut() {
        if view.product.discount_price.is_none() {
            view.product.discount_price = Some((view.product.price * factor).round_dp(2));
        }
    }
}

#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
    category_repo: CategoryRepository,
    settings_repo: SettingsRepository,
}

impl ProductService {
    pub fn new(
        product_repo: ProductRepository,
        category_repo: CategoryRepository,
        settings_repo: SettingsRepository,
    ) -> Self {
        Self {
            product_repo,
            category_repo,
            settings_repo,
        }
    }

    // Resolve o parâmetro `category` da query string. Id inválido ou
    // inexistente não é erro: a vitrine simplesmente mostra zero produtos.
    async fn resolve_category(&self, category: Option<&str>) -> Result<CategoryFilter, AppError> {
        let raw = match category {
            // O frontend às vezes manda o valor literal "null"/"undefined"
            None | Some("") | Some("null") | Some("undefined") => return Ok(CategoryFilter::Any),
            Some(raw) => raw,
        };

        let Ok(id) = raw.parse::<Uuid>() else {
            return Ok(CategoryFilter::NoMatch);
        };

        match self.category_repo.find_by_id(id).await? {
            None => Ok(CategoryFilter::NoMatch),
            Some(category) => match category.parent_id {
                Some(parent_id) => Ok(CategoryFilter::Subcategory {
                    id,
                    parent_id,
                    name: category.name,
                }),
                None => Ok(CategoryFilter::Main {
                    id,
                    children: self.category_repo.child_ids(id).await?,
                }),
            },
        }
    }

    pub async fn list(
        &self,
        category: Option<&str>,
        featured: bool,
        new_arrival: bool,
        search: Option<String>,
    ) -> Result<Vec<ProductView>, AppError> {
        let query = ProductQuery {
            category: self.resolve_category(category).await?,
            featured,
            new_arrival,
            search: search.filter(|s| !s.trim().is_empty()),
        };

        let mut products = self.product_repo.list(&query).await?;

        let settings = self.settings_repo.get_or_create().await?;
        let offer = SpecialOffer {
            enabled: settings.special_offer_enabled,
            percentage: settings.special_offer_percentage,
            title: settings.special_offer_title,
        };
        apply_special_offer(&mut products, &offer);

        Ok(products)
    }

    pub async fn get(&self, id: Uuid) -> Result<ProductView, AppError> {
        let view = self
            .product_repo
            .find_view_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".to_string()))?;

        let settings = self.settings_repo.get_or_create().await?;
        let offer = SpecialOffer {
            enabled: settings.special_offer_enabled,
            percentage: settings.special_offer_percentage,
            title: settings.special_offer_title,
        };

        let mut products = [view];
        apply_special_offer(&mut products, &offer);
        let [view] = products;
        Ok(view)
    }

    pub async fn create(&self, payload: CreateProductPayload) -> Result<ProductView, AppError> {
        self.category_repo
            .find_by_id(payload.category_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Categoria inválida.".to_string()))?;

        let product = self
            .product_repo
            .insert(
                payload.title.trim(),
                &payload.description,
                payload.category_id,
                payload.subcategory.as_deref(),
                &payload.images,
                &payload.sizes,
                &payload.colors,
                payload.price,
                payload.discount_price,
                payload.featured,
                payload.new_arrival,
                payload.stock,
            )
            .await?;

        self.view_of(product.id).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: UpdateProductPayload,
    ) -> Result<ProductView, AppError> {
        let mut product: Product = self
            .product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".to_string()))?;

        if let Some(category_id) = payload.category_id {
            self.category_repo
                .find_by_id(category_id)
                .await?
                .ok_or_else(|| AppError::BadRequest("Categoria inválida.".to_string()))?;
            product.category_id = category_id;
        }
        if let Some(title) = payload.title {
            product.title = title.trim().to_string();
        }
        if let Some(description) = payload.description {
            product.description = description;
        }
        // subcategory e discount_price distinguem null explícito (limpa o
        // campo) de ausência (preserva).
        if let Some(subcategory) = payload.subcategory {
            product.subcategory = subcategory;
        }
        if let Some(images) = payload.images {
            product.images = images;
        }
        if let Some(sizes) = payload.sizes {
            product.sizes = sizes;
        }
        if let Some(colors) = payload.colors {
            product.colors = colors;
        }
        if let Some(price) = payload.price {
            product.price = price;
        }
        if let Some(discount_price) = payload.discount_price {
            if discount_price.is_some_and(|dp| dp.is_sign_negative()) {
                return Err(AppError::BadRequest(
                    "O valor não pode ser negativo.".to_string(),
                ));
            }
            product.discount_price = discount_price;
        }
        if let Some(featured) = payload.featured {
            product.featured = featured;
        }
        if let Some(new_arrival) = payload.new_arrival {
            product.new_arrival = new_arrival;
        }
        if let Some(stock) = payload.stock {
            product.stock = stock;
        }

        self.product_repo.update(&product).await?;
        self.view_of(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".to_string()))?;
        self.product_repo.delete(id).await
    }

    async fn view_of(&self, id: Uuid) -> Result<ProductView, AppError> {
        self.product_repo
            .find_view_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn product_view(price: Decimal, discount: Option<Decimal>) -> ProductView {
        let now = Utc::now();
        ProductView {
            product: Product {
                id: Uuid::new_v4(),
                title: "Camiseta básica".to_string(),
                description: "Algodão".to_string(),
                category_id: Uuid::new_v4(),
                subcategory: None,
                images: vec!["/uploads/a.jpg".to_string()],
                sizes: vec!["M".to_string()],
                colors: vec!["preto".to_string()],
                price,
                discount_price: discount,
                featured: false,
                new_arrival: false,
                stock: 10,
                created_at: now,
                updated_at: now,
            },
            category_name: "Camisetas".to_string(),
            category_slug: "camisetas".to_string(),
        }
    }

    fn offer(enabled: bool, percentage: Decimal) -> SpecialOffer {
        SpecialOffer {
            enabled,
            percentage,
            title: "Liquidação".to_string(),
        }
    }

    #[test]
    fn overlay_fills_missing_discount() {
        let mut products = [product_view(Decimal::from(100), None)];
        apply_special_offer(&mut products, &offer(true, Decimal::from(10)));
        assert_eq!(
            products[0].product.discount_price,
            Some(Decimal::from(90))
        );
    }

    #[test]
    fn overlay_keeps_existing_discount() {
        let own = Decimal::from(80);
        let mut products = [product_view(Decimal::from(100), Some(own))];
        apply_special_offer(&mut products, &offer(true, Decimal::from(10)));
        assert_eq!(products[0].product.discount_price, Some(own));
    }

    #[test]
    fn overlay_disabled_changes_nothing() {
        let mut products = [product_view(Decimal::from(100), None)];
        apply_special_offer(&mut products, &offer(false, Decimal::from(10)));
        assert_eq!(products[0].product.discount_price, None);
    }

    #[test]
    fn overlay_zero_percentage_changes_nothing() {
        let mut products = [product_view(Decimal::from(100), None)];
        apply_special_offer(&mut products, &offer(true, Decimal::ZERO));
        assert_eq!(products[0].product.discount_price, None);
    }

    #[test]
    fn overlay_rounds_to_cents() {
        let mut products = [product_view(Decimal::new(1999, 2), None)]; // 19.99
        apply_special_offer(&mut products, &offer(true, Decimal::from(15)));
        // 19.99 * 0.85 = 16.9915 -> 16.99
        assert_eq!(
            products[0].product.discount_price,
            Some(Decimal::new(1699, 2))
        );
    }

    // Atualização parcial: ausência preserva, null explícito limpa.
    #[test]
    fn update_payload_distinguishes_null_from_absent() {
        let keep: UpdateProductPayload =
            serde_json::from_value(serde_json::json!({ "title": "Camiseta" })).unwrap();
        assert_eq!(keep.discount_price, None);
        assert_eq!(keep.subcategory, None);

        let clear: UpdateProductPayload = serde_json::from_value(serde_json::json!({
            "discountPrice": null,
            "subcategory": null
        }))
        .unwrap();
        assert_eq!(clear.discount_price, Some(None));
        assert_eq!(clear.subcategory, Some(None));

        let set: UpdateProductPayload = serde_json::from_value(serde_json::json!({
            "discountPrice": 10.0,
            "subcategory": "Regatas"
        }))
        .unwrap();
        assert_eq!(set.discount_price, Some(Some(Decimal::from(10))));
        assert_eq!(set.subcategory, Some(Some("Regatas".to_string())));
    }
}
