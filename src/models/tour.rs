//! Tour models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::booking::dates::{RawPrice, RawTourDate, TourDate, TourDateStatus};

/// A day in a tour itinerary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A tour as stored and served
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: i32,
    pub title: String,
    pub location: String,
    /// Default per-person price; date slots may override it
    pub price: f64,
    /// Display label such as "7 days"
    pub duration: Option<String>,
    pub hero_image: Option<String>,
    /// Name of the guide leading the tour
    pub guide: Option<String>,
    pub summary: Option<String>,
    pub category_id: Option<i32>,
    #[schema(value_type = Vec<ItineraryDay>)]
    pub itinerary: Json<Vec<ItineraryDay>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tour with its date slots, the shape the storefront consumes
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TourDetail {
    #[serde(flatten)]
    pub tour: Tour,
    pub dates: Vec<TourDate>,
}

/// Date slot row; the API serves the canonical record instead
#[derive(Debug, Clone, FromRow)]
pub struct TourDateRow {
    pub id: i32,
    pub tour_id: i32,
    pub start_date: String,
    pub end_date: String,
    pub spots_left: i32,
    pub status: String,
    pub price: f64,
    pub position: i32,
}

impl TourDateRow {
    pub fn into_record(self) -> TourDate {
        let status = self
            .status
            .parse()
            .unwrap_or_else(|_| TourDateStatus::for_spots(self.spots_left));
        TourDate {
            id: self.id,
            start: self.start_date,
            end: self.end_date,
            spots_left: self.spots_left,
            status,
            price: self.price,
        }
    }
}

/// Request body for creating a tour
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTour {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub location: String,
    /// Accepts a number or a currency-formatted string
    #[schema(value_type = Option<f64>)]
    pub price: Option<RawPrice>,
    pub duration: Option<String>,
    pub hero_image: Option<String>,
    pub guide: Option<String>,
    pub summary: Option<String>,
    pub category_id: Option<i32>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    /// Date slots in any upstream shape; normalized at ingestion
    #[serde(default)]
    pub dates: Vec<RawTourDate>,
    pub is_active: Option<bool>,
}

/// Request body for updating a tour. Only provided fields change;
/// a provided `dates` array replaces the whole slot list.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTour {
    pub title: Option<String>,
    pub location: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<RawPrice>,
    pub duration: Option<String>,
    pub hero_image: Option<String>,
    pub guide: Option<String>,
    pub summary: Option<String>,
    pub category_id: Option<i32>,
    pub itinerary: Option<Vec<ItineraryDay>>,
    pub dates: Option<Vec<RawTourDate>>,
    pub is_active: Option<bool>,
}

/// Query parameters for the public tour endpoint
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct TourQuery {
    /// Fetch a single tour instead of the listing
    pub id: Option<i32>,
}

/// Query parameters for the admin tour listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AdminTourQuery {
    pub category_id: Option<i32>,
    pub active: Option<bool>,
    /// Case-insensitive match against title and location
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
