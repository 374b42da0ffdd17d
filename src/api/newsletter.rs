//! Public newsletter endpoints

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::newsletter::{ConfirmRequest, ConfirmResponse, SubscribeRequest, SubscribeResponse},
};

/// Register a newsletter subscription and send the confirmation email
#[utoipa::path(
    post,
    path = "/newsletter/subscribe",
    tag = "newsletter",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Confirmation email on its way", body = SubscribeResponse),
        (status = 400, description = "Invalid email address")
    )
)]
pub async fn subscribe(
    State(state): State<crate::AppState>,
    Json(request): Json<SubscribeRequest>,
) -> AppResult<Json<SubscribeResponse>> {
    request.validate()?;

    let response = state.services.newsletter.subscribe(&request.email).await?;
    Ok(Json(response))
}

/// Confirm a subscription with the emailed token
#[utoipa::path(
    post,
    path = "/newsletter/confirm",
    tag = "newsletter",
    request_body = ConfirmRequest,
    responses(
        (status = 200, description = "Subscription confirmed", body = ConfirmResponse),
        (status = 404, description = "Invalid or already used token")
    )
)]
pub async fn confirm(
    State(state): State<crate::AppState>,
    Json(request): Json<ConfirmRequest>,
) -> AppResult<Json<ConfirmResponse>> {
    request.validate()?;

    let response = state.services.newsletter.confirm(&request.token).await?;
    Ok(Json(response))
}
