//! Admin tour-leader endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    api::AdminUser,
    error::AppResult,
    models::tour_leader::{CreateTourLeader, TourLeader, UpdateTourLeader},
};

/// List tour leaders
#[utoipa::path(
    get,
    path = "/admin/tour-leaders",
    tag = "admin-tour-leaders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All tour leaders", body = Vec<TourLeader>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_tour_leaders(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
) -> AppResult<Json<Vec<TourLeader>>> {
    let leaders = state.services.tour_leaders.list().await?;
    Ok(Json(leaders))
}

/// Get a tour leader
#[utoipa::path(
    get,
    path = "/admin/tour-leaders/{id}",
    tag = "admin-tour-leaders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tour leader ID")),
    responses(
        (status = 200, description = "Tour leader details", body = TourLeader),
        (status = 404, description = "Tour leader not found")
    )
)]
pub async fn get_tour_leader(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<Json<TourLeader>> {
    let leader = state.services.tour_leaders.get(id).await?;
    Ok(Json(leader))
}

/// Create a tour leader
#[utoipa::path(
    post,
    path = "/admin/tour-leaders",
    tag = "admin-tour-leaders",
    security(("bearer_auth" = [])),
    request_body = CreateTourLeader,
    responses(
        (status = 201, description = "Tour leader created", body = TourLeader),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_tour_leader(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Json(data): Json<CreateTourLeader>,
) -> AppResult<(StatusCode, Json<TourLeader>)> {
    data.validate()?;

    let created = state.services.tour_leaders.create(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a tour leader
#[utoipa::path(
    put,
    path = "/admin/tour-leaders/{id}",
    tag = "admin-tour-leaders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tour leader ID")),
    request_body = UpdateTourLeader,
    responses(
        (status = 200, description = "Tour leader updated", body = TourLeader),
        (status = 404, description = "Tour leader not found")
    )
)]
pub async fn update_tour_leader(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateTourLeader>,
) -> AppResult<Json<TourLeader>> {
    let updated = state.services.tour_leaders.update(id, &data).await?;
    Ok(Json(updated))
}

/// Delete a tour leader
#[utoipa::path(
    delete,
    path = "/admin/tour-leaders/{id}",
    tag = "admin-tour-leaders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tour leader ID")),
    responses(
        (status = 204, description = "Tour leader deleted"),
        (status = 404, description = "Tour leader not found")
    )
)]
pub async fn delete_tour_leader(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.tour_leaders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
