// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::me,

        // --- Categorias ---
        handlers::categories::list_categories,
        handlers::categories::get_category,
        handlers::categories::create_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,

        // --- Produtos ---
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Catálogo (tamanhos e cores) ---
        handlers::catalog::list_sizes,
        handlers::catalog::get_size,
        handlers::catalog::create_size,
        handlers::catalog::update_size,
        handlers::catalog::delete_size,
        handlers::catalog::list_colors,
        handlers::catalog::get_color,
        handlers::catalog::create_color,
        handlers::catalog::update_color,
        handlers::catalog::delete_color,

        // --- Pedidos ---
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::order_stats,
        handlers::orders::get_order,
        handlers::orders::update_order_status,

        // --- Contato ---
        handlers::contact::submit_contact,
        handlers::contact::list_messages,
        handlers::contact::message_stats,
        handlers::contact::get_message,
        handlers::contact::mark_message_read,
        handlers::contact::mark_message_spam,
        handlers::contact::mark_message_not_spam,
        handlers::contact::delete_message,

        // --- Configurações ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::AdminUser,
            models::auth::AdminProfile,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Categorias ---
            models::category::Category,
            models::category::CategoryAdminRow,
            models::category::CategoryTree,
            models::category::CategoryDetail,
            handlers::categories::CreateCategoryPayload,
            handlers::categories::UpdateCategoryPayload,

            // --- Produtos ---
            models::product::Product,
            models::product::ProductView,
            models::product::CreateProductPayload,
            models::product::UpdateProductPayload,

            // --- Catálogo ---
            models::catalog::Size,
            models::catalog::Color,
            models::catalog::CreateSizePayload,
            models::catalog::UpdateSizePayload,
            models::catalog::CreateColorPayload,
            models::catalog::UpdateColorPayload,

            // --- Pedidos ---
            models::order::OrderStatus,
            models::order::Order,
            models::order::OrderItem,
            models::order::OrderResponse,
            models::order::CustomerInfo,
            models::order::CreateOrderPayload,
            models::order::OrderItemRequest,
            models::order::UpdateStatusPayload,
            models::order::OrderStats,

            // --- Contato ---
            models::contact::ContactMessage,
            models::contact::ContactPayload,
            models::contact::MessagePage,
            models::contact::MessageStats,

            // --- Configurações ---
            models::settings::StoreSettings,
            models::settings::ContactInfo,
            models::settings::BannerSettings,
            models::settings::SpecialOffer,
            models::settings::UpdateSettingsPayload,
            models::settings::UpdateContactInfo,
            models::settings::UpdateBannerSettings,
            models::settings::UpdateSpecialOffer,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação do painel administrativo"),
        (name = "Categorias", description = "Taxonomia de categorias e subcategorias"),
        (name = "Produtos", description = "Catálogo de produtos da vitrine"),
        (name = "Catálogo", description = "Tamanhos e cores disponíveis"),
        (name = "Pedidos", description = "Checkout e gestão de pedidos"),
        (name = "Contato", description = "Formulário de contato e moderação"),
        (name = "Configurações", description = "Configurações da loja")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
