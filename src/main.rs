// src/main.rs

use std::net::SocketAddr;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_middleware;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é aceitável aqui: sem configuração válida o servidor não sobe.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas: vitrine, checkout, formulário de contato e login.
    let public_routes = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/auth/admin/login", post(handlers::auth::login))
        .route("/api/categories", get(handlers::categories::list_categories))
        .route("/api/categories/{id}", get(handlers::categories::get_category))
        .route("/api/products", get(handlers::products::list_products))
        .route("/api/products/{id}", get(handlers::products::get_product))
        .route("/api/sizes", get(handlers::catalog::list_sizes))
        .route("/api/sizes/{id}", get(handlers::catalog::get_size))
        .route("/api/colors", get(handlers::catalog::list_colors))
        .route("/api/colors/{id}", get(handlers::catalog::get_color))
        .route("/api/orders", post(handlers::orders::create_order))
        .route("/api/settings", get(handlers::settings::get_settings))
        .route("/api/settings/contact", post(handlers::contact::submit_contact));

    // Rotas do painel: tudo atrás do bearer token.
    let admin_routes = Router::new()
        .route("/api/auth/admin/me", get(handlers::auth::me))
        .route("/api/categories", post(handlers::categories::create_category))
        .route(
            "/api/categories/{id}",
            put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        .route("/api/products", post(handlers::products::create_product))
        .route(
            "/api/products/{id}",
            put(handlers::products::update_product).delete(handlers::products::delete_product),
        )
        .route("/api/sizes", post(handlers::catalog::create_size))
        .route(
            "/api/sizes/{id}",
            put(handlers::catalog::update_size).delete(handlers::catalog::delete_size),
        )
        .route("/api/colors", post(handlers::catalog::create_color))
        .route(
            "/api/colors/{id}",
            put(handlers::catalog::update_color).delete(handlers::catalog::delete_color),
        )
        .route("/api/orders", get(handlers::orders::list_orders))
        .route("/api/orders/stats", get(handlers::orders::order_stats))
        .route("/api/orders/{id}", get(handlers::orders::get_order))
        .route(
            "/api/orders/{id}/status",
            put(handlers::orders::update_order_status),
        )
        .route("/api/contact-messages", get(handlers::contact::list_messages))
        .route(
            "/api/contact-messages/stats",
            get(handlers::contact::message_stats),
        )
        .route(
            "/api/contact-messages/{id}",
            get(handlers::contact::get_message).delete(handlers::contact::delete_message),
        )
        .route(
            "/api/contact-messages/{id}/read",
            put(handlers::contact::mark_message_read),
        )
        .route(
            "/api/contact-messages/{id}/spam",
            put(handlers::contact::mark_message_spam),
        )
        .route(
            "/api/contact-messages/{id}/not-spam",
            put(handlers::contact::mark_message_not_spam),
        )
        .route("/api/settings", put(handlers::settings::update_settings))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let app = Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .nest_service("/uploads", ServeDir::new(&app_state.upload_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state.clone());

    let addr = format!("0.0.0.0:{}", app_state.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);

    // with_connect_info expõe o SocketAddr para o rate limiting do contato
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Erro no servidor Axum");
}
