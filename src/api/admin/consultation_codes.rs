//! Admin consultation-code endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    api::{AdminUser, PaginatedResponse},
    error::{AppError, AppResult},
    models::consultation_code::{
        BulkCreateCodes, BulkUpdateCodes, CodeQuery, CodeStats, ConsultationCode,
        CreateConsultationCode, ExportQuery, UpdateConsultationCode,
    },
    services::export::render_codes_pdf,
};

/// List codes with effective status, search and pagination
#[utoipa::path(
    get,
    path = "/admin/consultation-codes",
    tag = "admin-consultation-codes",
    security(("bearer_auth" = [])),
    params(CodeQuery),
    responses(
        (status = 200, description = "One page of codes", body = PaginatedResponse<ConsultationCode>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_codes(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Query(query): Query<CodeQuery>,
) -> AppResult<Json<PaginatedResponse<ConsultationCode>>> {
    let (items, total) = state.services.consultation_codes.list(&query).await?;

    // Echo the same clamped window the repository queried with
    let (page, per_page) = crate::repository::page_window(query.page, query.per_page);
    Ok(Json(PaginatedResponse { items, total, page, per_page }))
}

/// Get a code
#[utoipa::path(
    get,
    path = "/admin/consultation-codes/{id}",
    tag = "admin-consultation-codes",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Code ID")),
    responses(
        (status = 200, description = "Code details", body = ConsultationCode),
        (status = 404, description = "Code not found")
    )
)]
pub async fn get_code(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ConsultationCode>> {
    let code = state.services.consultation_codes.get(id).await?;
    Ok(Json(code))
}

/// Create a single code; one is generated when the body carries none
#[utoipa::path(
    post,
    path = "/admin/consultation-codes",
    tag = "admin-consultation-codes",
    security(("bearer_auth" = [])),
    request_body = CreateConsultationCode,
    responses(
        (status = 201, description = "Code created", body = ConsultationCode),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Code already exists")
    )
)]
pub async fn create_code(
    State(state): State<crate::AppState>,
    AdminUser(claims): AdminUser,
    Json(data): Json<CreateConsultationCode>,
) -> AppResult<(StatusCode, Json<ConsultationCode>)> {
    data.validate()?;

    let created = state
        .services
        .consultation_codes
        .create(&data, &claims.sub)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Create a numbered batch of codes sharing one prefix
#[utoipa::path(
    post,
    path = "/admin/consultation-codes/bulk",
    tag = "admin-consultation-codes",
    security(("bearer_auth" = [])),
    request_body = BulkCreateCodes,
    responses(
        (status = 201, description = "Batch created", body = Vec<ConsultationCode>),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn bulk_create_codes(
    State(state): State<crate::AppState>,
    AdminUser(claims): AdminUser,
    Json(data): Json<BulkCreateCodes>,
) -> AppResult<(StatusCode, Json<Vec<ConsultationCode>>)> {
    data.validate()?;

    let created = state
        .services
        .consultation_codes
        .bulk_create(&data, &claims.sub)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a code
#[utoipa::path(
    put,
    path = "/admin/consultation-codes/{id}",
    tag = "admin-consultation-codes",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Code ID")),
    request_body = UpdateConsultationCode,
    responses(
        (status = 200, description = "Code updated", body = ConsultationCode),
        (status = 404, description = "Code not found")
    )
)]
pub async fn update_code(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateConsultationCode>,
) -> AppResult<Json<ConsultationCode>> {
    let updated = state.services.consultation_codes.update(id, &data).await?;
    Ok(Json(updated))
}

/// Delete a code
#[utoipa::path(
    delete,
    path = "/admin/consultation-codes/{id}",
    tag = "admin-consultation-codes",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Code ID")),
    responses(
        (status = 204, description = "Code deleted"),
        (status = 404, description = "Code not found")
    )
)]
pub async fn delete_code(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.consultation_codes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Outcome of a bulk update
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateResponse {
    pub updated: u64,
}

/// Apply one change across a selected set of codes
#[utoipa::path(
    post,
    path = "/admin/consultation-codes/bulk-update",
    tag = "admin-consultation-codes",
    security(("bearer_auth" = [])),
    request_body = BulkUpdateCodes,
    responses(
        (status = 200, description = "Codes updated", body = BulkUpdateResponse),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn bulk_update_codes(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Json(data): Json<BulkUpdateCodes>,
) -> AppResult<Json<BulkUpdateResponse>> {
    data.validate()?;

    let updated = state.services.consultation_codes.bulk_update(&data).await?;
    Ok(Json(BulkUpdateResponse { updated }))
}

/// Aggregate counters for the dashboard
#[utoipa::path(
    get,
    path = "/admin/consultation-codes/stats",
    tag = "admin-consultation-codes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Code counters", body = CodeStats),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn code_stats(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
) -> AppResult<Json<CodeStats>> {
    let stats = state.services.consultation_codes.stats().await?;
    Ok(Json(stats))
}

/// Export codes as a PDF attachment.
///
/// `ids` narrows the export to a comma-separated selection; `new=true`
/// marks a freshly created batch, which drops the Created By column and
/// switches the filename.
#[utoipa::path(
    get,
    path = "/admin/consultation-codes/export",
    tag = "admin-consultation-codes",
    security(("bearer_auth" = [])),
    params(ExportQuery),
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf"),
        (status = 400, description = "Malformed id list"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn export_codes(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let ids = match query.ids.as_deref() {
        Some(raw) => Some(parse_id_list(raw)?),
        None => None,
    };

    let codes = state
        .services
        .consultation_codes
        .export_set(ids.as_deref())
        .await?;

    let new_batch = query.new.unwrap_or(false);
    let bytes = render_codes_pdf(&codes, new_batch)?;

    let prefix = if new_batch { "new-" } else { "" };
    let filename = format!(
        "{}consultation-codes-{}.pdf",
        prefix,
        Utc::now().format("%Y-%m-%d")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    ))
}

fn parse_id_list(raw: &str) -> AppResult<Vec<i32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>()
                .map_err(|_| AppError::BadRequest(format!("Invalid code id: {}", part)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_id_list;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("1,2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_id_list(" 4 , 5 ,").unwrap(), vec![4, 5]);
        assert!(parse_id_list("1,x").is_err());
    }
}
