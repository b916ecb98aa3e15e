// src/services/contact_service.rs

use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{contact_repo::MessageFilter, ContactRepository, SettingsRepository},
    models::contact::{ContactMessage, ContactPayload, MessagePage, MessageStats},
    services::mailer::Mailer,
};

const PAGE_SIZE: i64 = 20;

// Padrões de spam: termos clássicos, URLs, chamadas de ação e TLDs. Casam
// por substring, sem âncoras: "specialist" contém "cialis" e conta.
static SPAM_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)viagra|cialis|casino|poker|loan|credit|debt|free money|make money fast",
        r"(?i)https?://|www\.",
        r"(?i)click here|buy now|limited time|act now",
        r"(?i)\.com|\.net|\.org",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

// Heurística de spam sobre nome + e-mail + mensagem. Nada aqui bloqueia a
// gravação: mensagem suspeita é persistida já marcada como spam.
pub fn is_spam(name: &str, email: &str, message: &str) -> bool {
    let text = format!("{name} {email} {message}");

    if SPAM_PATTERNS.iter().any(|re| re.is_match(&text)) {
        return true;
    }

    // Palavra com mais de 3 letras repetida mais de 5 vezes.
    let mut counts: HashMap<String, u32> = HashMap::new();
    for word in text.split_whitespace() {
        let word = word.to_lowercase();
        if word.len() > 3 {
            let count = counts.entry(word).or_insert(0);
            *count += 1;
            if *count > 5 {
                return true;
            }
        }
    }

    // Mais de um '+' no e-mail (sub-endereçamento abusado por bots).
    email.matches('+').count() > 1
}

// Veredito do rate limiting a partir das contagens: qualquer mensagem do
// mesmo remetente (e-mail ou IP) nos últimos 5 minutos bloqueia; a partir
// da quinta mensagem do IP na última hora também.
pub fn check_rate_limit(recent_from_sender: i64, hourly_from_ip: i64) -> Result<(), AppError> {
    if recent_from_sender > 0 {
        return Err(AppError::TooManyRequests(
            "Você enviou uma mensagem recentemente. Aguarde alguns minutos.".to_string(),
        ));
    }
    if hourly_from_ip >= 5 {
        return Err(AppError::TooManyRequests(
            "Limite de mensagens atingido. Tente novamente mais tarde.".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ContactService {
    contact_repo: ContactRepository,
    settings_repo: SettingsRepository,
    mailer: Mailer,
}

impl ContactService {
    pub fn new(
        contact_repo: ContactRepository,
        settings_repo: SettingsRepository,
        mailer: Mailer,
    ) -> Self {
        Self {
            contact_repo,
            settings_repo,
            mailer,
        }
    }

    /// Recebe uma mensagem do formulário público. Honeypot preenchido recebe
    /// sucesso falso sem persistir nada; os demais passam pelo rate limiting
    /// e pela heurística de spam antes de gravar.
    pub async fn submit(
        &self,
        payload: ContactPayload,
        ip_address: Option<String>,
    ) -> Result<(), AppError> {
        if payload.honeypot.as_deref().is_some_and(|h| !h.is_empty()) {
            tracing::info!("🕷️ Honeypot acionado, mensagem descartada");
            return Ok(());
        }

        let email = payload.email.trim().to_lowercase();
        let ip = ip_address.as_deref().unwrap_or("");

        let five_min_ago = Utc::now() - Duration::minutes(5);
        let hour_ago = Utc::now() - Duration::hours(1);
        let recent = self.contact_repo.count_recent(&email, ip, five_min_ago).await?;
        let hourly = if ip.is_empty() {
            0
        } else {
            self.contact_repo.count_by_ip_since(ip, hour_ago).await?
        };
        check_rate_limit(recent, hourly)?;

        let spam = is_spam(&payload.name, &email, &payload.message);

        let saved = self
            .contact_repo
            .insert(
                payload.name.trim(),
                &email,
                payload.phone.as_deref().map(str::trim),
                payload.message.trim(),
                ip_address.as_deref(),
                spam,
            )
            .await?;

        if spam {
            tracing::info!("🚩 Mensagem {} marcada como spam", saved.id);
        }

        // Notificação em segundo plano: a resposta da API não espera o SMTP.
        // Mensagem marcada como spam também notifica, com o assunto rotulado.
        let mailer = self.mailer.clone();
        let settings_repo = self.settings_repo.clone();
        tokio::spawn(async move {
            let fallback = match settings_repo.get_or_create().await {
                Ok(settings) => settings.contact_email,
                Err(e) => {
                    tracing::warn!("⚠️ Falha ao carregar configurações para notificação: {e}");
                    String::new()
                }
            };
            mailer
                .notify_contact(
                    &saved.name,
                    &saved.email,
                    &saved.message,
                    saved.spam,
                    &fallback,
                )
                .await;
        });

        Ok(())
    }

    pub async fn list(
        &self,
        filter: MessageFilter,
        page: i64,
    ) -> Result<MessagePage, AppError> {
        let page = page.max(1);
        let total = self.contact_repo.count(&filter).await?;
        let messages = self
            .contact_repo
            .page(&filter, PAGE_SIZE, (page - 1) * PAGE_SIZE)
            .await?;

        Ok(MessagePage {
            messages,
            total,
            page,
            pages: (total + PAGE_SIZE - 1) / PAGE_SIZE,
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<ContactMessage, AppError> {
        self.contact_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mensagem não encontrada.".to_string()))
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<ContactMessage, AppError> {
        self.contact_repo
            .mark_read(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mensagem não encontrada.".to_string()))
    }

    pub async fn set_spam(&self, id: Uuid, spam: bool) -> Result<ContactMessage, AppError> {
        self.contact_repo
            .set_spam(id, spam)
            .await?
            .ok_or_else(|| AppError::NotFound("Mensagem não encontrada.".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.contact_repo.delete(id).await? {
            return Err(AppError::NotFound("Mensagem não encontrada.".to_string()));
        }
        Ok(())
    }

    pub async fn stats(&self) -> Result<MessageStats, AppError> {
        self.contact_repo.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_spam_terms_are_flagged() {
        assert!(is_spam("João", "a@b.io", "Compre viagra barato"));
        assert!(is_spam("Maria", "a@b.io", "best CASINO in town"));
    }

    #[test]
    fn terms_match_inside_larger_words() {
        // "specialist" contém "cialis"; o casamento é por substring
        assert!(is_spam("Ana", "a@b.io", "I am a specialist in textiles"));
    }

    #[test]
    fn urls_and_ctas_are_flagged() {
        assert!(is_spam("João", "a@b.io", "veja https://promo.example"));
        assert!(is_spam("João", "a@b.io", "visite www.promo.example"));
        assert!(is_spam("João", "a@b.io", "Click here para ganhar"));
        assert!(is_spam("João", "a@b.io", "acesse promo.com agora"));
    }

    #[test]
    fn email_is_part_of_the_matched_text() {
        // domínio .com no e-mail já conta como padrão de spam
        assert!(is_spam(
            "John",
            "john@gmail.com",
            "Do you have this jacket in size M?"
        ));
    }

    #[test]
    fn repeated_words_are_flagged() {
        let message = "ofertas ofertas ofertas ofertas ofertas ofertas imperdíveis";
        assert!(is_spam("João", "a@b.io", message));
    }

    #[test]
    fn short_word_repetition_is_not_flagged() {
        // "sim" tem 3 letras, fora da regra de repetição
        let message = "sim sim sim sim sim sim sim, quero saber do tamanho GG";
        assert!(!is_spam("João", "a@b.io", message));
    }

    #[test]
    fn multiple_plus_signs_in_email_are_flagged() {
        assert!(is_spam("João", "a+b+c@mail.example", "Qual o prazo de entrega?"));
        assert!(!is_spam("João", "a+loja@mail.example", "Qual o prazo de entrega?"));
    }

    #[test]
    fn ordinary_message_passes() {
        assert!(!is_spam(
            "Ana Souza",
            "ana@mail.example",
            "Olá, gostaria de saber se a jaqueta jeans tem no tamanho M."
        ));
    }

    #[test]
    fn spam_term_in_name_is_flagged() {
        assert!(is_spam("Casino Royale", "a@b.io", "Mensagem qualquer válida"));
    }

    #[test]
    fn honeypot_keeps_the_form_field_name() {
        let payload: ContactPayload = serde_json::from_value(serde_json::json!({
            "name": "Bot",
            "email": "bot@b.io",
            "message": "mensagem longa o suficiente",
            "honeypot": "http://spam.example"
        }))
        .unwrap();
        assert_eq!(payload.honeypot.as_deref(), Some("http://spam.example"));
    }

    #[test]
    fn any_recent_message_from_sender_blocks() {
        assert!(check_rate_limit(1, 0).is_err());
        assert!(check_rate_limit(0, 0).is_ok());
    }

    #[test]
    fn fifth_hourly_message_from_ip_blocks() {
        assert!(check_rate_limit(0, 4).is_ok());
        assert!(check_rate_limit(0, 5).is_err());
    }

    #[test]
    fn rate_limit_errors_are_429() {
        assert!(matches!(
            check_rate_limit(1, 0),
            Err(AppError::TooManyRequests(_))
        ));
        assert!(matches!(
            check_rate_limit(0, 9),
            Err(AppError::TooManyRequests(_))
        ));
    }
}
