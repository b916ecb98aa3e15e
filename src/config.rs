// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AdminRepository, CatalogRepository, CategoryRepository, ContactRepository,
        OrderRepository, ProductRepository, SettingsRepository,
    },
    services::{
        auth::AuthService, CatalogService, CategoryService, ContactService, Mailer,
        OrderService, ProductService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub port: u16,
    pub upload_dir: String,
    pub auth_service: AuthService,
    pub category_service: CategoryService,
    pub product_service: ProductService,
    pub catalog_service: CatalogService,
    pub order_service: OrderService,
    pub contact_service: ContactService,
    pub settings_repo: SettingsRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let expire_days: i64 = env::var("JWT_EXPIRE_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7);
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5007);
        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let category_repo = CategoryRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let contact_repo = ContactRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());
        let admin_repo = AdminRepository::new(db_pool.clone());

        let auth_service = AuthService::new(admin_repo, jwt_secret, expire_days);
        let category_service = CategoryService::new(
            category_repo.clone(),
            product_repo.clone(),
            db_pool.clone(),
        );
        let product_service = ProductService::new(
            product_repo.clone(),
            category_repo.clone(),
            settings_repo.clone(),
        );
        let catalog_service = CatalogService::new(catalog_repo);
        let order_service = OrderService::new(
            order_repo,
            product_repo,
            settings_repo.clone(),
            db_pool.clone(),
        );
        let contact_service =
            ContactService::new(contact_repo, settings_repo.clone(), Mailer::from_env());

        Ok(Self {
            db_pool,
            port,
            upload_dir,
            auth_service,
            category_service,
            product_service,
            catalog_service,
            order_service,
            contact_service,
            settings_repo,
        })
    }
}
