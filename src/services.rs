// src/services.rs

pub mod auth;
pub mod catalog_service;
pub mod category_service;
pub mod contact_service;
pub mod mailer;
pub mod order_service;
pub mod product_service;

pub use auth::AuthService;
pub use catalog_service::CatalogService;
pub use category_service::CategoryService;
pub use contact_service::ContactService;
pub use mailer::Mailer;
pub use order_service::OrderService;
pub use product_service::ProductService;
