//! Public expert endpoints

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::expert::{ExpertProfile, ExpertQuery},
};

/// Fetch the expert listing, or a single expert when `id` is given
#[utoipa::path(
    get,
    path = "/experts",
    tag = "experts",
    params(ExpertQuery),
    responses(
        (status = 200, description = "Expert, or an array of them without `id`"),
        (status = 404, description = "Expert not found")
    )
)]
pub async fn get_experts(
    State(state): State<crate::AppState>,
    Query(query): Query<ExpertQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        let expert = state.services.experts.get(id).await?;
        return Ok(Json(expert).into_response());
    }

    let experts = if query.active.unwrap_or(false) {
        state.services.experts.list_active().await?
    } else {
        state.services.experts.list().await?
    };
    Ok(Json(experts).into_response())
}

#[derive(Deserialize, IntoParams)]
pub struct ProfileQuery {
    /// Expert ID
    pub id: i32,
}

/// Fetch the expert profile page aggregate.
///
/// The related-experts and featured-tours side fetches degrade to empty
/// lists when they fail; only a missing expert is an error.
#[utoipa::path(
    get,
    path = "/experts/profile",
    tag = "experts",
    params(ProfileQuery),
    responses(
        (status = 200, description = "Profile aggregate", body = ExpertProfile),
        (status = 404, description = "Expert not found")
    )
)]
pub async fn get_expert_profile(
    State(state): State<crate::AppState>,
    Query(query): Query<ProfileQuery>,
) -> AppResult<Json<ExpertProfile>> {
    let profile = state.services.experts.profile(query.id).await?;
    Ok(Json(profile))
}
