//! Newsletter subscription service

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{
    config::NewsletterConfig,
    error::{AppError, AppResult},
    models::newsletter::{ConfirmResponse, SubscribeResponse},
    repository::Repository,
};

use super::email::EmailService;

#[derive(Clone)]
pub struct NewsletterService {
    repository: Repository,
    config: NewsletterConfig,
    email: EmailService,
}

impl NewsletterService {
    pub fn new(repository: Repository, config: NewsletterConfig, email: EmailService) -> Self {
        Self {
            repository,
            config,
            email,
        }
    }

    /// Register an email and send the confirmation link in the background.
    ///
    /// The response does not wait on SMTP; a failed send is only logged, the
    /// subscriber can re-subscribe to get a fresh token.
    pub async fn subscribe(&self, address: &str) -> AppResult<SubscribeResponse> {
        let address = address.trim().to_lowercase();
        let token = Uuid::new_v4().to_string();
        let subscriber = self
            .repository
            .newsletter
            .upsert_subscription(&address, &hash_token(&token))
            .await?;

        let link = format!("{}?token={}", self.config.confirm_url, token);
        let email = self.email.clone();
        let to = subscriber.email.clone();
        tokio::spawn(async move {
            if let Err(e) = email.send_newsletter_confirmation(&to, &link).await {
                tracing::warn!("Newsletter confirmation email to {} failed: {}", to, e);
            }
        });

        tracing::info!("Newsletter subscription registered for {}", subscriber.email);
        Ok(SubscribeResponse {
            message: "Confirmation email sent. Please check your inbox.".to_string(),
        })
    }

    /// Consume a confirmation token
    pub async fn confirm(&self, token: &str) -> AppResult<ConfirmResponse> {
        let subscriber = self
            .repository
            .newsletter
            .confirm_by_token_hash(&hash_token(token.trim()))
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Invalid or already used confirmation token".to_string())
            })?;

        tracing::info!("Newsletter subscription confirmed for {}", subscriber.email);
        Ok(ConfirmResponse {
            message: "Subscription confirmed".to_string(),
            email: subscriber.email,
        })
    }
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::hash_token;

    #[test]
    fn test_hash_token_is_stable_hex() {
        let hash = hash_token("abc");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_token("abc"));
        assert_ne!(hash, hash_token("abd"));
        // sha256("abc")
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
