//! Bookings repository

use sqlx::types::Json;
use sqlx::{Pool, Postgres};

use crate::{
    booking::flow::BookingDraft,
    error::{AppError, AppResult},
    models::booking::{Booking, TravelerName},
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Persist a confirmed booking. Bookings are never mutated afterwards.
    pub async fn create(&self, draft: &BookingDraft) -> AppResult<Booking> {
        let travelers: Vec<TravelerName> = draft
            .travelers
            .iter()
            .cloned()
            .map(TravelerName::from)
            .collect();

        let row = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                reference, tour_id, tour_title, location, date_start, date_end,
                participants, price_per_person, service_fee, total_price,
                lead_first_name, lead_last_name, lead_phone,
                travelers, special_requests
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(&draft.reference)
        .bind(draft.tour_id)
        .bind(&draft.tour_title)
        .bind(&draft.location)
        .bind(&draft.date_start)
        .bind(&draft.date_end)
        .bind(draft.participants as i32)
        .bind(draft.price_per_person)
        .bind(draft.service_fee)
        .bind(draft.total_price)
        .bind(&draft.lead.first_name)
        .bind(&draft.lead.last_name)
        .bind(&draft.lead.phone)
        .bind(Json(travelers))
        .bind(&draft.special_requests)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Get a booking by its reference
    pub async fn get_by_reference(&self, reference: &str) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE reference = $1")
            .bind(reference)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", reference)))
    }
}
