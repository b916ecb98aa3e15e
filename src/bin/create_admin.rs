// src/bin/create_admin.rs
//
// Cria (ou confirma) o usuário administrador do painel. Roda uma vez na
// implantação: `cargo run --bin create_admin`. As credenciais vêm de
// ADMIN_USERNAME / ADMIN_EMAIL / ADMIN_PASSWORD, com padrões de
// desenvolvimento.

use sqlx::postgres::PgPoolOptions;
use std::{env, time::Duration};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).compact().init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
    let username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let email = env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@sjclothing.com".to_string());
    let password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "Admin@123".to_string());

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    let existing: Option<(String,)> = sqlx::query_as(
        "SELECT username FROM admin_users WHERE username = $1 OR email = $2",
    )
    .bind(&username)
    .bind(&email)
    .fetch_optional(&pool)
    .await?;

    if let Some((existing_username,)) = existing {
        tracing::info!("✅ Administrador '{}' já existe, nada a fazer.", existing_username);
        return Ok(());
    }

    let password_hash =
        tokio::task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
            .await??;

    sqlx::query("INSERT INTO admin_users (username, email, password_hash) VALUES ($1, $2, $3)")
        .bind(&username)
        .bind(&email)
        .bind(&password_hash)
        .execute(&pool)
        .await?;

    tracing::info!("✅ Administrador criado com sucesso!");
    println!("Usuário: {username}");
    println!("E-mail:  {email}");
    println!("Troque a senha padrão após o primeiro login.");

    Ok(())
}
