//! Admin tour endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    api::{AdminUser, PaginatedResponse},
    error::AppResult,
    models::tour::{AdminTourQuery, CreateTour, Tour, TourDetail, UpdateTour},
};

/// List tours with filters and pagination
#[utoipa::path(
    get,
    path = "/admin/tours",
    tag = "admin-tours",
    security(("bearer_auth" = [])),
    params(AdminTourQuery),
    responses(
        (status = 200, description = "One page of tours", body = PaginatedResponse<Tour>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_tours(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Query(query): Query<AdminTourQuery>,
) -> AppResult<Json<PaginatedResponse<Tour>>> {
    let (items, total) = state.services.tours.list_admin(&query).await?;

    // Echo the same clamped window the repository queried with
    let (page, per_page) = crate::repository::page_window(query.page, query.per_page);
    Ok(Json(PaginatedResponse { items, total, page, per_page }))
}

/// Get a tour with its date slots
#[utoipa::path(
    get,
    path = "/admin/tours/{id}",
    tag = "admin-tours",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tour ID")),
    responses(
        (status = 200, description = "Tour details", body = TourDetail),
        (status = 404, description = "Tour not found")
    )
)]
pub async fn get_tour(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<Json<TourDetail>> {
    let tour = state.services.tours.get_detail(id).await?;
    Ok(Json(tour))
}

/// Create a tour
#[utoipa::path(
    post,
    path = "/admin/tours",
    tag = "admin-tours",
    security(("bearer_auth" = [])),
    request_body = CreateTour,
    responses(
        (status = 201, description = "Tour created", body = TourDetail),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_tour(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Json(data): Json<CreateTour>,
) -> AppResult<(StatusCode, Json<TourDetail>)> {
    data.validate()?;

    let created = state.services.tours.create(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a tour; a provided `dates` array replaces the whole slot list
#[utoipa::path(
    put,
    path = "/admin/tours/{id}",
    tag = "admin-tours",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tour ID")),
    request_body = UpdateTour,
    responses(
        (status = 200, description = "Tour updated", body = TourDetail),
        (status = 404, description = "Tour not found")
    )
)]
pub async fn update_tour(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateTour>,
) -> AppResult<Json<TourDetail>> {
    let updated = state.services.tours.update(id, &data).await?;
    Ok(Json(updated))
}

/// Delete a tour
#[utoipa::path(
    delete,
    path = "/admin/tours/{id}",
    tag = "admin-tours",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tour ID")),
    responses(
        (status = 204, description = "Tour deleted"),
        (status = 404, description = "Tour not found")
    )
)]
pub async fn delete_tour(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.tours.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
