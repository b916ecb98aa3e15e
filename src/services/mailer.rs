// src/services/mailer.rs

use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

// Mensagem suspeita também notifica; o rótulo no assunto é o que muda.
pub fn subject_for(name: &str, spam: bool) -> String {
    if spam {
        format!("[SPAM] Nova mensagem de contato de {name}")
    } else {
        format!("Nova mensagem de contato de {name}")
    }
}

// Notificação por e-mail das mensagens de contato. O SMTP é opcional:
// sem SMTP_HOST o mailer vira no-op e só registra no log.
#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    admin_email: Option<String>,
}

impl Mailer {
    pub fn from_env() -> Self {
        let admin_email = std::env::var("ADMIN_EMAIL").ok();

        let Ok(host) = std::env::var("SMTP_HOST") else {
            tracing::warn!("⚠️ SMTP_HOST não definido, notificações por e-mail desativadas");
            return Self {
                transport: None,
                from: String::new(),
                admin_email,
            };
        };

        let port: u16 = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587);
        let user = std::env::var("SMTP_USER").unwrap_or_default();
        let pass = std::env::var("SMTP_PASS").unwrap_or_default();

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
            .unwrap_or_else(|_| AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&host))
            .port(port);
        if !user.is_empty() {
            builder = builder.credentials(Credentials::new(user.clone(), pass));
        }

        Self {
            transport: Some(builder.build()),
            from: if user.is_empty() {
                format!("no-reply@{host}")
            } else {
                user
            },
            admin_email,
        }
    }

    /// Envia a notificação de nova mensagem de contato. `fallback_to` é o
    /// e-mail de contato das configurações da loja, usado quando ADMIN_EMAIL
    /// não está definido. Falha de envio não é erro da API.
    pub async fn notify_contact(
        &self,
        name: &str,
        email: &str,
        message: &str,
        spam: bool,
        fallback_to: &str,
    ) {
        let Some(transport) = &self.transport else {
            return;
        };

        let to = self.admin_email.as_deref().unwrap_or(fallback_to);
        if to.is_empty() {
            tracing::warn!("⚠️ Nenhum destinatário configurado para notificações de contato");
            return;
        }

        let body = format!(
            "Nova mensagem de contato\n\nNome: {name}\nE-mail: {email}\n\n{message}\n"
        );

        let mail = match Message::builder()
            .from(match self.from.parse() {
                Ok(from) => from,
                Err(e) => {
                    tracing::warn!("⚠️ Remetente SMTP inválido: {e}");
                    return;
                }
            })
            .to(match to.parse() {
                Ok(to) => to,
                Err(e) => {
                    tracing::warn!("⚠️ Destinatário SMTP inválido: {e}");
                    return;
                }
            })
            .subject(subject_for(name, spam))
            .header(ContentType::TEXT_PLAIN)
            .body(body)
        {
            Ok(mail) => mail,
            Err(e) => {
                tracing::warn!("⚠️ Falha ao montar e-mail de notificação: {e}");
                return;
            }
        };

        if let Err(e) = transport.send(mail).await {
            tracing::warn!("⚠️ Falha ao enviar notificação de contato: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spam_notification_is_tagged_in_the_subject() {
        assert_eq!(
            subject_for("Ana", true),
            "[SPAM] Nova mensagem de contato de Ana"
        );
        assert_eq!(subject_for("Ana", false), "Nova mensagem de contato de Ana");
    }
}
