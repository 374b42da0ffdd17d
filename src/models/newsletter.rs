//! Newsletter subscription models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A newsletter subscriber. Only the hash of the confirmation token is
/// stored; the token itself leaves the server once, inside the email.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscriber {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub confirmed: bool,
    pub subscribed_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// Request body for subscribing
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubscribeRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

/// Response after registering a subscription
#[derive(Debug, Serialize, ToSchema)]
pub struct SubscribeResponse {
    pub message: String,
}

/// Request body for confirming a subscription
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ConfirmRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

/// Response after a successful confirmation
#[derive(Debug, Serialize, ToSchema)]
pub struct ConfirmResponse {
    pub message: String,
    pub email: String,
}
