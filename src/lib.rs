//! Terratrek Travel Booking Platform
//!
//! REST JSON API server for the Terratrek travel platform: public tour and
//! expert catalogs, the booking flow, consultation codes, newsletter
//! confirmation, and the admin back-office.

use std::sync::Arc;

pub mod api;
pub mod booking;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
