//! Data models for Terratrek entities

pub mod auth;
pub mod booking;
pub mod category;
pub mod consultation_code;
pub mod expert;
pub mod newsletter;
pub mod tour;
pub mod tour_leader;
