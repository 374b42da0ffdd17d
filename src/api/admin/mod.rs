//! Back-office endpoints, all gated by the bearer-token extractor

pub mod auth;
pub mod categories;
pub mod consultation_codes;
pub mod experts;
pub mod tour_leaders;
pub mod tours;
