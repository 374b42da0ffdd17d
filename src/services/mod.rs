//! Business logic services

pub mod auth;
pub mod bookings;
pub mod categories;
pub mod consultation_codes;
pub mod email;
pub mod experts;
pub mod export;
pub mod newsletter;
pub mod tour_leaders;
pub mod tours;

use sqlx::{Pool, Postgres};

use crate::{
    config::{AuthConfig, BookingConfig, EmailConfig, NewsletterConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pool: Pool<Postgres>,
    pub auth: auth::AuthService,
    pub tours: tours::ToursService,
    pub bookings: bookings::BookingsService,
    pub consultation_codes: consultation_codes::ConsultationCodesService,
    pub experts: experts::ExpertsService,
    pub categories: categories::CategoriesService,
    pub tour_leaders: tour_leaders::TourLeadersService,
    pub newsletter: newsletter::NewsletterService,
    pub email: email::EmailService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        email_config: EmailConfig,
        booking_config: BookingConfig,
        newsletter_config: NewsletterConfig,
    ) -> Self {
        let email = email::EmailService::new(email_config);
        Self {
            pool: repository.pool.clone(),
            auth: auth::AuthService::new(auth_config),
            tours: tours::ToursService::new(repository.clone()),
            bookings: bookings::BookingsService::new(repository.clone(), booking_config),
            consultation_codes: consultation_codes::ConsultationCodesService::new(
                repository.clone(),
            ),
            experts: experts::ExpertsService::new(repository.clone()),
            categories: categories::CategoriesService::new(repository.clone()),
            tour_leaders: tour_leaders::TourLeadersService::new(repository.clone()),
            newsletter: newsletter::NewsletterService::new(
                repository,
                newsletter_config,
                email.clone(),
            ),
            email,
        }
    }

    /// Whether the database answers a trivial query. Used by the readiness
    /// probe.
    pub async fn db_ready(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}
