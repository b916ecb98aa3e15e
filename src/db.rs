// src/db.rs

pub mod admin_repo;
pub use admin_repo::AdminRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod category_repo;
pub use category_repo::CategoryRepository;
pub mod contact_repo;
pub use contact_repo::ContactRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
