//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, bookings, consultation_codes, experts, health, newsletter, tours};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Terratrek API",
        version = "1.0.0",
        description = "Travel Booking Platform REST API",
        license(name = "MIT"),
        contact(name = "Terratrek Team", email = "contact@terratrek.io")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    modifiers(&SecurityAddon),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Public catalog
        tours::get_tours,
        experts::get_experts,
        experts::get_expert_profile,
        // Bookings
        bookings::create_booking,
        bookings::get_booking,
        // Consultation codes
        consultation_codes::redeem_code,
        // Newsletter
        newsletter::subscribe,
        newsletter::confirm,
        // Admin auth
        admin::auth::login,
        admin::auth::me,
        // Admin tours
        admin::tours::list_tours,
        admin::tours::get_tour,
        admin::tours::create_tour,
        admin::tours::update_tour,
        admin::tours::delete_tour,
        // Admin experts
        admin::experts::list_experts,
        admin::experts::get_expert,
        admin::experts::create_expert,
        admin::experts::update_expert,
        admin::experts::delete_expert,
        admin::experts::get_featured_tours,
        admin::experts::set_featured_tours,
        // Admin categories
        admin::categories::list_categories,
        admin::categories::get_category,
        admin::categories::create_category,
        admin::categories::update_category,
        admin::categories::patch_category,
        admin::categories::delete_category,
        // Admin consultation codes
        admin::consultation_codes::list_codes,
        admin::consultation_codes::get_code,
        admin::consultation_codes::create_code,
        admin::consultation_codes::bulk_create_codes,
        admin::consultation_codes::update_code,
        admin::consultation_codes::delete_code,
        admin::consultation_codes::bulk_update_codes,
        admin::consultation_codes::code_stats,
        admin::consultation_codes::export_codes,
        // Admin tour leaders
        admin::tour_leaders::list_tour_leaders,
        admin::tour_leaders::get_tour_leader,
        admin::tour_leaders::create_tour_leader,
        admin::tour_leaders::update_tour_leader,
        admin::tour_leaders::delete_tour_leader,
    ),
    components(
        schemas(
            // Tours
            crate::models::tour::Tour,
            crate::models::tour::TourDetail,
            crate::models::tour::ItineraryDay,
            crate::models::tour::CreateTour,
            crate::models::tour::UpdateTour,
            crate::booking::dates::TourDate,
            crate::booking::dates::TourDateStatus,
            crate::booking::dates::RawTourDate,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::TravelerName,
            crate::models::booking::LeadTravelerInput,
            crate::models::booking::CreateBookingRequest,
            crate::models::booking::BookingConfirmation,
            crate::models::booking::BookingResponse,
            // Consultation codes
            crate::models::consultation_code::ConsultationCode,
            crate::models::consultation_code::CodeStatus,
            crate::models::consultation_code::CreateConsultationCode,
            crate::models::consultation_code::BulkCreateCodes,
            crate::models::consultation_code::UpdateConsultationCode,
            crate::models::consultation_code::BulkUpdateAction,
            crate::models::consultation_code::BulkUpdateCodes,
            crate::models::consultation_code::CodeStats,
            crate::models::consultation_code::RedeemRequest,
            crate::models::consultation_code::RedeemResponse,
            admin::consultation_codes::BulkUpdateResponse,
            // Experts
            crate::models::expert::Expert,
            crate::models::expert::SocialMedia,
            crate::models::expert::ExpertVideo,
            crate::models::expert::CreateExpert,
            crate::models::expert::UpdateExpert,
            crate::models::expert::ExpertProfile,
            crate::models::expert::FeaturedToursResponse,
            crate::models::expert::SetFeaturedTours,
            // Categories
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            // Tour leaders
            crate::models::tour_leader::TourLeader,
            crate::models::tour_leader::TravelStory,
            crate::models::tour_leader::CreateTourLeader,
            crate::models::tour_leader::UpdateTourLeader,
            // Newsletter
            crate::models::newsletter::SubscribeRequest,
            crate::models::newsletter::SubscribeResponse,
            crate::models::newsletter::ConfirmRequest,
            crate::models::newsletter::ConfirmResponse,
            // Auth
            crate::models::auth::LoginRequest,
            crate::models::auth::LoginResponse,
            crate::models::auth::AdminIdentity,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "tours", description = "Public tour catalog"),
        (name = "bookings", description = "Booking wizard and lookup"),
        (name = "experts", description = "Public expert profiles"),
        (name = "consultation-codes", description = "Consultation code redemption"),
        (name = "newsletter", description = "Newsletter subscription"),
        (name = "admin-auth", description = "Back-office authentication"),
        (name = "admin-tours", description = "Tour management"),
        (name = "admin-experts", description = "Expert management"),
        (name = "admin-categories", description = "Category management"),
        (name = "admin-consultation-codes", description = "Consultation code management"),
        (name = "admin-tour-leaders", description = "Tour leader management")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
