//! Public tour catalog endpoint

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::AppResult,
    models::tour::{TourDetail, TourQuery},
};

/// Fetch the active-tour listing, or a single tour when `id` is given
#[utoipa::path(
    get,
    path = "/tours",
    tag = "tours",
    params(TourQuery),
    responses(
        (status = 200, description = "Tour with its date slots, or an array of them without `id`", body = TourDetail),
        (status = 404, description = "Tour not found")
    )
)]
pub async fn get_tours(
    State(state): State<crate::AppState>,
    Query(query): Query<TourQuery>,
) -> AppResult<Response> {
    match query.id {
        Some(id) => {
            let tour = state.services.tours.get_detail(id).await?;
            Ok(Json(tour).into_response())
        }
        None => {
            let tours = state.services.tours.list_public().await?;
            Ok(Json(tours).into_response())
        }
    }
}
