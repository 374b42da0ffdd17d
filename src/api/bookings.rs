//! Public booking endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::booking::{Booking, BookingQuery, BookingResponse, CreateBookingRequest},
};

/// Run the booking wizard server-side and confirm the reservation.
///
/// The whole wizard form arrives in one payload; the response reports
/// success as long as the input passes the wizard's own guards, even when
/// persistence fails behind the scenes.
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking confirmed", body = BookingResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Tour not found")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    request.validate()?;

    let booking = state.services.bookings.create(&request).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            success: true,
            booking,
        }),
    ))
}

/// Fetch a booking by its reference
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(BookingQuery),
    responses(
        (status = 200, description = "Booking details", body = Booking),
        (status = 404, description = "No booking with that reference")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Booking>> {
    let booking = state
        .services
        .bookings
        .get_by_reference(&query.reference)
        .await?;
    Ok(Json(booking))
}
