//! Newsletter repository

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::newsletter::NewsletterSubscriber};

#[derive(Clone)]
pub struct NewsletterRepository {
    pool: Pool<Postgres>,
}

impl NewsletterRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Register an email, refreshing the token when it is already on file
    pub async fn upsert_subscription(
        &self,
        email: &str,
        token_hash: &str,
    ) -> AppResult<NewsletterSubscriber> {
        let subscriber = sqlx::query_as::<_, NewsletterSubscriber>(
            r#"
            INSERT INTO newsletter_subscribers (email, token_hash)
            VALUES ($1, $2)
            ON CONFLICT (email) DO UPDATE SET token_hash = EXCLUDED.token_hash
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(token_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(subscriber)
    }

    /// Consume a confirmation token. Returns None when the token is unknown
    /// or was already used.
    pub async fn confirm_by_token_hash(
        &self,
        token_hash: &str,
    ) -> AppResult<Option<NewsletterSubscriber>> {
        let subscriber = sqlx::query_as::<_, NewsletterSubscriber>(
            r#"
            UPDATE newsletter_subscribers
            SET confirmed = TRUE, confirmed_at = NOW()
            WHERE token_hash = $1 AND confirmed = FALSE
            RETURNING *
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;
        Ok(subscriber)
    }
}
