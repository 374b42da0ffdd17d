//! Outbound SMTP mail

use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Double-opt-in mail carrying the newsletter confirmation link
    pub async fn send_newsletter_confirmation(&self, to: &str, confirm_link: &str) -> AppResult<()> {
        let text = format!(
            "Thanks for signing up for the Terratrek newsletter!\n\n\
             Confirm your subscription by opening this link:\n\n{confirm_link}\n\n\
             If you didn't request this, you can safely ignore this email."
        );
        let html = format!(
            "<html><body>\
             <p>Thanks for signing up for the Terratrek newsletter!</p>\
             <p><a href=\"{confirm_link}\">Confirm my subscription</a></p>\
             <p>If you didn't request this, you can safely ignore this email.</p>\
             </body></html>"
        );

        let message = self.compose(
            to,
            "Confirm your Terratrek newsletter subscription",
            text,
            html,
        )?;
        self.deliver(message).await
    }

    fn sender(&self) -> AppResult<Mailbox> {
        let name = self.config.smtp_from_name.as_deref().unwrap_or("Terratrek");
        Mailbox::from_str(&format!("{} <{}>", name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid sender address: {}", e)))
    }

    fn compose(&self, to: &str, subject: &str, text: String, html: String) -> AppResult<Message> {
        let recipient = Mailbox::from_str(to)
            .map_err(|e| AppError::BadRequest(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(self.sender()?)
            .to(recipient)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )
            .map_err(|e| AppError::Internal(format!("Could not build message: {}", e)))
    }

    fn transport(&self) -> AppResult<SmtpTransport> {
        let builder = if self.config.smtp_use_tls {
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("SMTP transport setup failed: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let builder = match (&self.config.smtp_username, &self.config.smtp_password) {
            (Some(user), Some(pass)) => {
                builder.credentials(Credentials::new(user.clone(), pass.clone()))
            }
            _ => builder,
        };

        Ok(builder.build())
    }

    async fn deliver(&self, message: Message) -> AppResult<()> {
        let mailer = self.transport()?;

        // SmtpTransport::send blocks; keep it off the async workers
        tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .map_err(|e| AppError::Internal(format!("Mail task panicked: {}", e)))?
            .map_err(|e| AppError::Internal(format!("SMTP delivery failed: {}", e)))?;

        Ok(())
    }
}
