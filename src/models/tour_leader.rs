//! Tour leader models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A field story shown on a leader profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TravelStory {
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub excerpt: String,
}

/// A tour leader
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourLeader {
    pub id: i32,
    pub name: String,
    /// Display role such as "Senior Mountain Guide"
    pub role: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
    #[schema(value_type = Vec<String>)]
    pub certifications: Json<Vec<String>>,
    #[schema(value_type = Vec<TravelStory>)]
    pub travel_stories: Json<Vec<TravelStory>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a tour leader
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTourLeader {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub travel_stories: Vec<TravelStory>,
    pub is_active: Option<bool>,
}

/// Request body for updating a tour leader; only provided fields change
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTourLeader {
    pub name: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub certifications: Option<Vec<String>>,
    pub travel_stories: Option<Vec<TravelStory>>,
    pub is_active: Option<bool>,
}
