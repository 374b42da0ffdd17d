//! Tour date-slot normalization
//!
//! Upstream tour payloads carry date slots in three loosely-typed shapes:
//! a combined `{date: "Jun 15 - 17, 2024"}` label, an explicit
//! `{start, end}` pair, or neither. Each raw record is resolved exactly once
//! at ingestion through [`DateShape`] into the canonical [`TourDate`] the
//! rest of the system works with.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::pricing::parse_price;

/// Slots with at most this many seats left are labeled `limited`
pub const LIMITED_SPOTS_THRESHOLD: i32 = 2;

/// Display status of a date slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TourDateStatus {
    Available,
    Limited,
}

impl TourDateStatus {
    /// Derive the label from remaining capacity
    pub fn for_spots(spots_left: i32) -> Self {
        if spots_left <= LIMITED_SPOTS_THRESHOLD {
            TourDateStatus::Limited
        } else {
            TourDateStatus::Available
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TourDateStatus::Available => "available",
            TourDateStatus::Limited => "limited",
        }
    }
}

impl FromStr for TourDateStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(TourDateStatus::Available),
            "limited" => Ok(TourDateStatus::Limited),
            _ => Err(()),
        }
    }
}

/// Canonical date slot record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourDate {
    pub id: i32,
    pub start: String,
    pub end: String,
    pub spots_left: i32,
    pub status: TourDateStatus,
    pub price: f64,
}

impl TourDate {
    /// A slot can be selected in the wizard while seats remain.
    /// The status label does not participate in this check.
    pub fn is_bookable(&self) -> bool {
        self.spots_left > 0
    }
}

/// Price values arrive either as numbers or currency-formatted strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl RawPrice {
    pub fn amount(&self) -> f64 {
        match self {
            RawPrice::Number(n) => *n,
            RawPrice::Text(s) => parse_price(s),
        }
    }
}

/// A date slot as admins submit it, before normalization
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawTourDate {
    pub id: Option<i32>,
    /// Combined "start - end" label
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub spots_left: Option<i32>,
    pub status: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<RawPrice>,
}

/// The three shapes a raw slot can take
#[derive(Debug, Clone, PartialEq)]
pub enum DateShape {
    Combined(String),
    Split { start: String, end: Option<String> },
    Unknown,
}

impl RawTourDate {
    pub fn shape(&self) -> DateShape {
        if let Some(date) = &self.date {
            DateShape::Combined(date.clone())
        } else if let Some(start) = &self.start {
            DateShape::Split {
                start: start.clone(),
                end: self.end.clone(),
            }
        } else {
            DateShape::Unknown
        }
    }
}

/// Split a combined "A - B" label on the first hyphen only, trimming both
/// halves. A label without a hyphen covers a single day: both halves are the
/// whole label.
fn split_range(label: &str) -> (String, String) {
    match label.split_once('-') {
        Some((start, end)) => (start.trim().to_string(), end.trim().to_string()),
        None => {
            let day = label.trim().to_string();
            (day.clone(), day)
        }
    }
}

/// Resolve a raw slot into the canonical record.
///
/// `fallback_id` is used when the slot carries no id (its position in the
/// submitted list); `fallback_price` is the tour's own per-person price.
pub fn normalize(fallback_id: i32, raw: &RawTourDate, fallback_price: f64) -> TourDate {
    let (start, end) = match raw.shape() {
        DateShape::Combined(label) => split_range(&label),
        DateShape::Split { start, end } => {
            let start = start.trim().to_string();
            let end = end
                .as_deref()
                .map(|e| e.trim().to_string())
                .unwrap_or_else(|| start.clone());
            (start, end)
        }
        DateShape::Unknown => (String::new(), String::new()),
    };

    let spots_left = raw.spots_left.unwrap_or(0).max(0);
    let status = raw
        .status
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| TourDateStatus::for_spots(spots_left));
    let price = raw
        .price
        .as_ref()
        .map(|p| p.amount())
        .unwrap_or(fallback_price);

    TourDate {
        id: raw.id.unwrap_or(fallback_id),
        start,
        end,
        spots_left,
        status,
        price,
    }
}
