// src/services/auth.rs

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AdminRepository,
    models::auth::{AdminUser, AuthResponse, Claims},
};

#[derive(Clone)]
pub struct AuthService {
    admin_repo: AdminRepository,
    jwt_secret: String,
    expire_days: i64,
}

impl AuthService {
    pub fn new(admin_repo: AdminRepository, jwt_secret: String, expire_days: i64) -> Self {
        Self {
            admin_repo,
            jwt_secret,
            expire_days,
        }
    }

    pub async fn login(&self, login: &str, password: &str) -> Result<AuthResponse, AppError> {
        let admin = self
            .admin_repo
            .find_by_username_or_email(login.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password = password.to_owned();
        let password_hash = admin.password_hash.clone();

        // bcrypt é pesado, roda fora do executor async
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password, &password_hash))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(AuthResponse {
            token: self.create_token(admin.id)?,
            admin: (&admin).into(),
        })
    }

    pub async fn validate_token(&self, token: &str) -> Result<AdminUser, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.admin_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    fn create_token(&self, admin_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(self.expire_days);

        let claims = Claims {
            sub: admin_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
