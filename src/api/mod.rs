//! API handlers for Terratrek REST endpoints

pub mod admin;
pub mod bookings;
pub mod consultation_codes;
pub mod experts;
pub mod health;
pub mod newsletter;
pub mod openapi;
pub mod tours;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppError, models::auth::AdminClaims, AppState};

/// Extractor for an authenticated back-office session.
///
/// Pulls the bearer token from the Authorization header and validates it
/// against the configured JWT secret; rejects with 401 before the handler
/// body runs.
pub struct AdminUser(pub AdminClaims);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Authentication("Missing bearer token".to_string()))?;

        let claims = state.services.auth.authenticate(bearer.token())?;
        Ok(AdminUser(claims))
    }
}

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// One page of results
    pub items: Vec<T>,
    /// Total number of matching rows
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Rows per page
    pub per_page: i64,
}
