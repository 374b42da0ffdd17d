//! Repository layer for database operations

pub mod bookings;
pub mod categories;
pub mod consultation_codes;
pub mod experts;
pub mod newsletter;
pub mod tour_leaders;
pub mod tours;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub tours: tours::ToursRepository,
    pub bookings: bookings::BookingsRepository,
    pub consultation_codes: consultation_codes::ConsultationCodesRepository,
    pub experts: experts::ExpertsRepository,
    pub categories: categories::CategoriesRepository,
    pub tour_leaders: tour_leaders::TourLeadersRepository,
    pub newsletter: newsletter::NewsletterRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            tours: tours::ToursRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            consultation_codes: consultation_codes::ConsultationCodesRepository::new(pool.clone()),
            experts: experts::ExpertsRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            tour_leaders: tour_leaders::TourLeadersRepository::new(pool.clone()),
            newsletter: newsletter::NewsletterRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Clamped `(page, per_page)` pair for list queries. Zero or negative
/// values fall back to the first page so they never reach Postgres as a
/// negative LIMIT/OFFSET; out-of-range pages simply come back empty.
pub fn page_window(page: Option<i64>, per_page: Option<i64>) -> (i64, i64) {
    (page.unwrap_or(1).max(1), per_page.unwrap_or(20).max(1))
}

#[cfg(test)]
mod tests {
    use super::page_window;

    #[test]
    fn test_page_window_defaults() {
        assert_eq!(page_window(None, None), (1, 20));
        assert_eq!(page_window(Some(3), Some(50)), (3, 50));
    }

    #[test]
    fn test_page_window_clamps_zero_and_negative() {
        assert_eq!(page_window(Some(0), Some(20)), (1, 20));
        assert_eq!(page_window(Some(-4), Some(-1)), (1, 1));
    }
}
