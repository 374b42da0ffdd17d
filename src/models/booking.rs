//! Booking models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::booking::flow::{BookingDraft, ExtraTraveler, LeadTraveler};

/// A persisted booking
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    #[serde(rename = "bookingReference")]
    pub reference: String,
    pub tour_id: Option<i32>,
    pub tour_title: String,
    pub location: String,
    pub date_start: String,
    pub date_end: String,
    pub participants: i32,
    pub price_per_person: f64,
    pub service_fee: f64,
    pub total_price: f64,
    pub lead_first_name: String,
    pub lead_last_name: String,
    pub lead_phone: String,
    #[schema(value_type = Vec<TravelerName>)]
    pub travelers: Json<Vec<TravelerName>>,
    pub special_requests: String,
    /// Always "confirmed"; kept for forward compatibility
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Additional party member as carried on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TravelerName {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl From<TravelerName> for ExtraTraveler {
    fn from(t: TravelerName) -> Self {
        ExtraTraveler {
            first_name: t.first_name,
            last_name: t.last_name,
        }
    }
}

impl From<ExtraTraveler> for TravelerName {
    fn from(t: ExtraTraveler) -> Self {
        TravelerName {
            first_name: t.first_name,
            last_name: t.last_name,
        }
    }
}

/// Lead traveler fields; only the first name is gated
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadTravelerInput {
    #[validate(length(min = 1, message = "Lead traveler first name is required"))]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
}

impl From<LeadTravelerInput> for LeadTraveler {
    fn from(t: LeadTravelerInput) -> Self {
        LeadTraveler {
            first_name: t.first_name,
            last_name: t.last_name,
            phone: t.phone,
        }
    }
}

/// The whole wizard form in one payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub tour_id: i32,
    /// Chosen date slot; defaults to the first available slot
    pub date_id: Option<i32>,
    #[validate(range(min = 1, max = 10, message = "Participants must be between 1 and 10"))]
    pub participants: u32,
    #[validate(nested)]
    pub lead_traveler: LeadTravelerInput,
    #[serde(default)]
    pub travelers: Vec<TravelerName>,
    #[serde(default)]
    pub special_requests: String,
}

/// Confirmed booking as returned to the storefront, whether or not the
/// persistence attempt succeeded
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_reference: String,
    pub tour_id: i32,
    pub tour_title: String,
    pub location: String,
    pub date_start: String,
    pub date_end: String,
    pub participants: u32,
    pub price_per_person: f64,
    pub service_fee: f64,
    pub total_price: f64,
    pub lead_traveler: LeadTravelerInput,
    pub travelers: Vec<TravelerName>,
    pub special_requests: String,
    pub status: String,
}

impl From<BookingDraft> for BookingConfirmation {
    fn from(draft: BookingDraft) -> Self {
        BookingConfirmation {
            booking_reference: draft.reference,
            tour_id: draft.tour_id,
            tour_title: draft.tour_title,
            location: draft.location,
            date_start: draft.date_start,
            date_end: draft.date_end,
            participants: draft.participants,
            price_per_person: draft.price_per_person,
            service_fee: draft.service_fee,
            total_price: draft.total_price,
            lead_traveler: LeadTravelerInput {
                first_name: draft.lead.first_name,
                last_name: draft.lead.last_name,
                phone: draft.lead.phone,
            },
            travelers: draft.travelers.into_iter().map(TravelerName::from).collect(),
            special_requests: draft.special_requests,
            status: "confirmed".to_string(),
        }
    }
}

/// POST /api/bookings response envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub success: bool,
    pub booking: BookingConfirmation,
}

/// Query parameters for looking a booking up
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct BookingQuery {
    /// Booking reference, e.g. BOOKING-LX2C41A7F
    pub reference: String,
}
