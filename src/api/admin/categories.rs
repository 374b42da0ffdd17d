//! Admin category endpoints
//!
//! PUT and PATCH share the partial-update semantics: each supplied field
//! changes, the rest keep their value. A PUT carrying the full object is
//! therefore a full replace.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    api::AdminUser,
    error::AppResult,
    models::category::{Category, CreateCategory, UpdateCategory},
};

/// List categories in display order
#[utoipa::path(
    get,
    path = "/admin/categories",
    tag = "admin-categories",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All categories", body = Vec<Category>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.categories.list().await?;
    Ok(Json(categories))
}

/// Get a category
#[utoipa::path(
    get,
    path = "/admin/categories/{id}",
    tag = "admin-categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Category>> {
    let category = state.services.categories.get(id).await?;
    Ok(Json(category))
}

/// Create a category; the slug is derived from the name when omitted
#[utoipa::path(
    post,
    path = "/admin/categories",
    tag = "admin-categories",
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Slug already exists")
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Json(data): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    data.validate()?;

    let created = state.services.categories.create(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/admin/categories/{id}",
    tag = "admin-categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Slug already exists")
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    let updated = state.services.categories.update(id, &data).await?;
    Ok(Json(updated))
}

/// Patch single category fields
#[utoipa::path(
    patch,
    path = "/admin/categories/{id}",
    tag = "admin-categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn patch_category(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    let updated = state.services.categories.update(id, &data).await?;
    Ok(Json(updated))
}

/// Delete a category; refused while tours still reference it
#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    tag = "admin-categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still referenced by tours")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
