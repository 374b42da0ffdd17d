//! Admin expert endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    api::AdminUser,
    error::AppResult,
    models::expert::{
        CreateExpert, Expert, FeaturedToursResponse, SetFeaturedTours, UpdateExpert,
    },
};

/// List all experts, including inactive ones
#[utoipa::path(
    get,
    path = "/admin/experts",
    tag = "admin-experts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All experts", body = Vec<Expert>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_experts(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
) -> AppResult<Json<Vec<Expert>>> {
    let experts = state.services.experts.list().await?;
    Ok(Json(experts))
}

/// Get an expert
#[utoipa::path(
    get,
    path = "/admin/experts/{id}",
    tag = "admin-experts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Expert ID")),
    responses(
        (status = 200, description = "Expert details", body = Expert),
        (status = 404, description = "Expert not found")
    )
)]
pub async fn get_expert(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Expert>> {
    let expert = state.services.experts.get(id).await?;
    Ok(Json(expert))
}

/// Create an expert
#[utoipa::path(
    post,
    path = "/admin/experts",
    tag = "admin-experts",
    security(("bearer_auth" = [])),
    request_body = CreateExpert,
    responses(
        (status = 201, description = "Expert created", body = Expert),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_expert(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Json(data): Json<CreateExpert>,
) -> AppResult<(StatusCode, Json<Expert>)> {
    data.validate()?;

    let created = state.services.experts.create(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an expert
#[utoipa::path(
    put,
    path = "/admin/experts/{id}",
    tag = "admin-experts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Expert ID")),
    request_body = UpdateExpert,
    responses(
        (status = 200, description = "Expert updated", body = Expert),
        (status = 404, description = "Expert not found")
    )
)]
pub async fn update_expert(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateExpert>,
) -> AppResult<Json<Expert>> {
    let updated = state.services.experts.update(id, &data).await?;
    Ok(Json(updated))
}

/// Delete an expert
#[utoipa::path(
    delete,
    path = "/admin/experts/{id}",
    tag = "admin-experts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Expert ID")),
    responses(
        (status = 204, description = "Expert deleted"),
        (status = 404, description = "Expert not found")
    )
)]
pub async fn delete_expert(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.experts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get an expert's ordered featured tours
#[utoipa::path(
    get,
    path = "/admin/experts/{id}/featured-tours",
    tag = "admin-experts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Expert ID")),
    responses(
        (status = 200, description = "Featured tours in display order", body = FeaturedToursResponse),
        (status = 404, description = "Expert not found")
    )
)]
pub async fn get_featured_tours(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<Json<FeaturedToursResponse>> {
    let featured_tours = state.services.experts.featured_tours(id).await?;
    Ok(Json(FeaturedToursResponse { featured_tours }))
}

/// Replace an expert's ordered featured-tour list
#[utoipa::path(
    put,
    path = "/admin/experts/{id}/featured-tours",
    tag = "admin-experts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Expert ID")),
    request_body = SetFeaturedTours,
    responses(
        (status = 200, description = "Relation replaced", body = FeaturedToursResponse),
        (status = 404, description = "Expert not found")
    )
)]
pub async fn set_featured_tours(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
    Json(data): Json<SetFeaturedTours>,
) -> AppResult<Json<FeaturedToursResponse>> {
    let featured_tours = state.services.experts.set_featured_tours(id, &data).await?;
    Ok(Json(FeaturedToursResponse { featured_tours }))
}
