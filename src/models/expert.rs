//! Travel expert models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::tour::Tour;

/// Social media handles shown on an expert profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialMedia {
    pub instagram: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
}

/// A video embedded on an expert profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpertVideo {
    pub title: String,
    pub url: String,
    pub thumbnail: Option<String>,
    /// Display duration such as "12:40"
    pub duration: Option<String>,
}

/// A travel expert offering consultations
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expert {
    pub id: i32,
    pub name: String,
    /// Short strapline such as "Andes specialist"
    pub title: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[schema(value_type = Vec<String>)]
    pub expertise: Json<Vec<String>>,
    pub review_count: i32,
    pub rating: f64,
    pub years_experience: Option<i32>,
    #[schema(value_type = SocialMedia)]
    pub social_media: Json<SocialMedia>,
    #[schema(value_type = Vec<ExpertVideo>)]
    pub latest_videos: Json<Vec<ExpertVideo>>,
    pub hero_image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating an expert
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpert {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub title: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub expertise: Vec<String>,
    pub review_count: Option<i32>,
    pub rating: Option<f64>,
    pub years_experience: Option<i32>,
    #[serde(default)]
    pub social_media: SocialMedia,
    #[serde(default)]
    pub latest_videos: Vec<ExpertVideo>,
    pub hero_image: Option<String>,
    pub is_active: Option<bool>,
}

/// Request body for updating an expert; only provided fields change
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpert {
    pub name: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub expertise: Option<Vec<String>>,
    pub review_count: Option<i32>,
    pub rating: Option<f64>,
    pub years_experience: Option<i32>,
    pub social_media: Option<SocialMedia>,
    pub latest_videos: Option<Vec<ExpertVideo>>,
    pub hero_image: Option<String>,
    pub is_active: Option<bool>,
}

/// Query parameters for the public expert endpoint
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ExpertQuery {
    /// Fetch a single expert instead of the listing
    pub id: Option<i32>,
    /// Restrict the listing to active experts
    pub active: Option<bool>,
}

/// Expert page aggregate: the profile plus the two independent side fetches
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpertProfile {
    pub expert: Expert,
    /// Other active experts; empty when that fetch failed
    pub related_experts: Vec<Expert>,
    /// Tours featured on the profile; empty when that fetch failed
    pub featured_tours: Vec<Tour>,
}

/// Featured-tours envelope for the admin endpoint
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedToursResponse {
    pub featured_tours: Vec<Tour>,
}

/// Request body replacing an expert's ordered featured-tour list
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetFeaturedTours {
    pub tour_ids: Vec<i32>,
}
