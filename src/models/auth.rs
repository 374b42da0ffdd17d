//! Admin authentication models

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JWT claims for back-office sessions
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminClaims {
    /// Username the token was issued to
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl AdminClaims {
    pub fn new(username: &str, validity_hours: u64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: username.to_string(),
            role: "admin".to_string(),
            iat: now,
            exp: now + (validity_hours * 3600) as i64,
        }
    }

    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<AdminClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.role == "admin" {
            Ok(())
        } else {
            Err(AppError::Authorization("Admin role required".to_string()))
        }
    }
}

/// Request body for the admin login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Issued session token
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    /// Expiry as a Unix timestamp
    pub expires_at: i64,
}

/// The authenticated identity behind a token
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    pub username: String,
    pub role: String,
    pub expires_at: i64,
}

impl From<AdminClaims> for AdminIdentity {
    fn from(claims: AdminClaims) -> Self {
        AdminIdentity {
            username: claims.sub,
            role: claims.role,
            expires_at: claims.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let claims = AdminClaims::new("admin", 24);
        let token = claims.create_token("secret").expect("encode");
        let decoded = AdminClaims::from_token(&token, "secret").expect("decode");
        assert_eq!(decoded.sub, "admin");
        assert_eq!(decoded.role, "admin");
        assert_eq!(decoded.exp, claims.iat + 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = AdminClaims::new("admin", 1)
            .create_token("secret")
            .expect("encode");
        assert!(AdminClaims::from_token(&token, "other").is_err());
    }

    #[test]
    fn test_require_admin() {
        let mut claims = AdminClaims::new("admin", 1);
        assert!(claims.require_admin().is_ok());
        claims.role = "viewer".to_string();
        assert!(claims.require_admin().is_err());
    }
}
