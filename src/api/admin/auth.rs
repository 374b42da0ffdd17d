//! Admin authentication endpoints

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    api::AdminUser,
    error::AppResult,
    models::auth::{AdminIdentity, LoginRequest, LoginResponse},
};

/// Authenticate with the configured admin credentials
#[utoipa::path(
    post,
    path = "/admin/auth/login",
    tag = "admin-auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    request.validate()?;

    let response = state
        .services
        .auth
        .login(&request.username, &request.password)?;
    Ok(Json(response))
}

/// Identity behind the presented token
#[utoipa::path(
    get,
    path = "/admin/auth/me",
    tag = "admin-auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated identity", body = AdminIdentity),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(AdminUser(claims): AdminUser) -> Json<AdminIdentity> {
    Json(AdminIdentity::from(claims))
}
