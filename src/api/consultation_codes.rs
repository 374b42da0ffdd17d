//! Public consultation-code redemption endpoint

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::consultation_code::{RedeemRequest, RedeemResponse},
};

/// Validate a consultation code and consume one use.
///
/// The increment is atomic; a code at its usage cap, expired or inactive is
/// rejected with the specific reason.
#[utoipa::path(
    post,
    path = "/consultation-codes/redeem",
    tag = "consultation-codes",
    request_body = RedeemRequest,
    responses(
        (status = 200, description = "Code accepted", body = RedeemResponse),
        (status = 404, description = "No such code"),
        (status = 422, description = "Code inactive, expired or exhausted")
    )
)]
pub async fn redeem_code(
    State(state): State<crate::AppState>,
    Json(request): Json<RedeemRequest>,
) -> AppResult<Json<RedeemResponse>> {
    request.validate()?;

    let response = state
        .services
        .consultation_codes
        .redeem(&request.code)
        .await?;
    Ok(Json(response))
}
