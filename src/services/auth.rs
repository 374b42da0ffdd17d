//! Admin authentication service

use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::auth::{AdminClaims, LoginResponse},
};

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Authenticate the back-office admin and return a JWT token
    pub fn login(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        if username != self.config.admin_username || !self.verify_password(password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let claims = AdminClaims::new(username, self.config.jwt_expiration_hours);
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!("Admin {} logged in", username);

        Ok(LoginResponse {
            token,
            username: username.to_string(),
            expires_at: claims.exp,
        })
    }

    /// Decode a bearer token and check the admin role
    pub fn authenticate(&self, token: &str) -> AppResult<AdminClaims> {
        let claims = AdminClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|_| AppError::Authentication("Invalid or expired token".to_string()))?;
        if claims.exp < Utc::now().timestamp() {
            return Err(AppError::Authentication("Token expired".to_string()));
        }
        claims.require_admin()?;
        Ok(claims)
    }

    /// Verify the admin password, against the configured hash when one is
    /// set and the plain-text fallback otherwise
    fn verify_password(&self, password: &str) -> AppResult<bool> {
        if let Some(ref hash) = self.config.admin_password_hash {
            let parsed_hash = PasswordHash::new(hash)
                .map_err(|_| AppError::Internal("Invalid admin password hash".to_string()))?;
            return Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok());
        }

        Ok(password == self.config.admin_password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_expiration_hours: 1,
            admin_username: "admin".to_string(),
            admin_password: "hunter2".to_string(),
            admin_password_hash: None,
        })
    }

    #[test]
    fn test_login_issues_verifiable_token() {
        let service = service();
        let response = service.login("admin", "hunter2").expect("login");
        assert_eq!(response.username, "admin");

        let claims = service.authenticate(&response.token).expect("authenticate");
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let service = service();
        assert!(service.login("admin", "wrong").is_err());
        assert!(service.login("root", "hunter2").is_err());
    }

    #[test]
    fn test_hashed_password_takes_precedence() {
        use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"s3cret", &salt)
            .expect("hash")
            .to_string();

        let mut config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_expiration_hours: 1,
            admin_username: "admin".to_string(),
            admin_password: "hunter2".to_string(),
            admin_password_hash: Some(hash),
        };
        let service = AuthService::new(config.clone());
        assert!(service.login("admin", "s3cret").is_ok());
        // The plain-text fallback is ignored once a hash is configured
        assert!(service.login("admin", "hunter2").is_err());

        config.admin_password_hash = None;
        let service = AuthService::new(config);
        assert!(service.login("admin", "hunter2").is_ok());
    }
}
