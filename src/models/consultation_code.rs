//! Consultation code models
//!
//! Invitation codes gating expert-consultation bookings. The stored status is
//! only ever `active` or `inactive` (plus legacy `expired` rows); passing
//! `expires_at` overlays `expired` at read time.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Generated code length when no explicit code is supplied
const GENERATED_CODE_LEN: usize = 8;

const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CodeStatus {
    Active,
    Inactive,
    Expired,
}

impl CodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeStatus::Active => "active",
            CodeStatus::Inactive => "inactive",
            CodeStatus::Expired => "expired",
        }
    }
}

impl FromStr for CodeStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CodeStatus::Active),
            "inactive" => Ok(CodeStatus::Inactive),
            "expired" => Ok(CodeStatus::Expired),
            _ => Err(()),
        }
    }
}

/// A consultation code
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationCode {
    pub id: i32,
    pub code: String,
    /// `active`, `inactive` or `expired`
    pub status: String,
    pub description: Option<String>,
    /// Usage cap; unlimited when absent
    pub max_uses: Option<i32>,
    pub used_count: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConsultationCode {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status == CodeStatus::Expired.as_str()
            || self.expires_at.map(|e| e <= now).unwrap_or(false)
    }

    pub fn effective_status(&self, now: DateTime<Utc>) -> CodeStatus {
        if self.is_expired_at(now) {
            CodeStatus::Expired
        } else {
            self.status.parse().unwrap_or(CodeStatus::Inactive)
        }
    }

    /// Overlay the computed expiry onto the stored status for serving
    pub fn resolved(mut self, now: DateTime<Utc>) -> Self {
        self.status = self.effective_status(now).as_str().to_string();
        self
    }

    pub fn remaining_uses(&self) -> Option<i32> {
        self.max_uses.map(|cap| (cap - self.used_count).max(0))
    }
}

/// Canonical storage form of a code string
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Random 8-character code for single creates without an explicit code
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..GENERATED_CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Fields shared by single and bulk creation, ready for insertion
#[derive(Debug, Clone)]
pub struct NewCode {
    pub code: String,
    pub status: CodeStatus,
    pub description: Option<String>,
    pub max_uses: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: String,
}

/// Request body for creating a single code
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsultationCode {
    /// Explicit code; generated when omitted
    pub code: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Usage cap must be at least 1"))]
    pub max_uses: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
    pub status: Option<CodeStatus>,
}

/// Request body for bulk code creation
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateCodes {
    #[validate(range(min = 1, max = 100, message = "Quantity must be between 1 and 100"))]
    pub quantity: u32,
    #[validate(length(min = 1, max = 20, message = "Prefix must be 1-20 characters"))]
    pub prefix: String,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Usage cap must be at least 1"))]
    pub max_uses: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl BulkCreateCodes {
    /// Build the batch: `<PREFIX>-<NNNN>` with a zero-padded sequence
    /// starting at `start`, shared fields across every code.
    pub fn build(&self, start: i64, created_by: &str) -> Vec<NewCode> {
        let prefix = normalize_code(&self.prefix);
        (0..self.quantity as i64)
            .map(|i| NewCode {
                code: format!("{}-{:04}", prefix, start + i),
                status: CodeStatus::Active,
                description: self.description.clone(),
                max_uses: self.max_uses,
                expires_at: self.expires_at,
                created_by: created_by.to_string(),
            })
            .collect()
    }
}

/// Request body for updating a code
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConsultationCode {
    pub status: Option<CodeStatus>,
    pub description: Option<String>,
    pub max_uses: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// One of the three mutually exclusive bulk updates
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum BulkUpdateAction {
    Status(CodeStatus),
    Expiry(DateTime<Utc>),
    Description(String),
}

/// Request body for bulk updates
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateCodes {
    #[validate(length(min = 1, message = "At least one code must be selected"))]
    pub ids: Vec<i32>,
    pub action: BulkUpdateAction,
}

/// Query parameters for the code listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CodeQuery {
    /// Filter on effective status
    pub status: Option<CodeStatus>,
    /// Case-insensitive match against code and description
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Query parameters for the PDF export
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ExportQuery {
    /// Comma-separated code ids; exports everything when absent
    pub ids: Option<String>,
    /// Freshly bulk-created batch: switches filename and drops Created By
    pub new: Option<bool>,
}

/// Aggregate counters for the admin dashboard
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub expired: i64,
    pub total_uses: i64,
}

/// Request body for redeeming a code
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RedeemRequest {
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
}

/// Successful redemption
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedeemResponse {
    pub valid: bool,
    pub code: ConsultationCode,
    pub remaining_uses: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code_uppercases_and_trims() {
        assert_eq!(normalize_code("  summit24 "), "SUMMIT24");
    }

    #[test]
    fn test_generated_code_shape() {
        let code = generate_code();
        assert_eq!(code.len(), 8);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_bulk_build_shares_fields_with_distinct_codes() {
        let expiry = Utc::now();
        let request = BulkCreateCodes {
            quantity: 10,
            prefix: "OT".to_string(),
            description: Some("Spring campaign".to_string()),
            max_uses: Some(5),
            expires_at: Some(expiry),
        };

        let batch = request.build(1, "admin");
        assert_eq!(batch.len(), 10);
        assert_eq!(batch[0].code, "OT-0001");
        assert_eq!(batch[9].code, "OT-0010");

        let mut codes: Vec<_> = batch.iter().map(|c| c.code.clone()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 10, "codes must be distinct");

        for code in &batch {
            assert_eq!(code.description.as_deref(), Some("Spring campaign"));
            assert_eq!(code.max_uses, Some(5));
            assert_eq!(code.expires_at, Some(expiry));
            assert_eq!(code.created_by, "admin");
        }
    }

    #[test]
    fn test_bulk_build_continues_sequence() {
        let request = BulkCreateCodes {
            quantity: 2,
            prefix: "ot".to_string(),
            description: None,
            max_uses: None,
            expires_at: None,
        };
        let batch = request.build(12, "admin");
        assert_eq!(batch[0].code, "OT-0012");
        assert_eq!(batch[1].code, "OT-0013");
    }

    fn sample_code(status: &str, expires_at: Option<DateTime<Utc>>) -> ConsultationCode {
        ConsultationCode {
            id: 1,
            code: "OT-0001".to_string(),
            status: status.to_string(),
            description: None,
            max_uses: Some(3),
            used_count: 1,
            expires_at,
            created_by: "admin".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_status_overlays_expiry() {
        let now = Utc::now();
        let past = now - chrono::Duration::hours(1);
        let future = now + chrono::Duration::hours(1);

        assert_eq!(
            sample_code("active", Some(past)).effective_status(now),
            CodeStatus::Expired
        );
        assert_eq!(
            sample_code("inactive", Some(past)).effective_status(now),
            CodeStatus::Expired
        );
        assert_eq!(
            sample_code("active", Some(future)).effective_status(now),
            CodeStatus::Active
        );
        assert_eq!(
            sample_code("active", None).effective_status(now),
            CodeStatus::Active
        );
        assert_eq!(
            sample_code("expired", None).effective_status(now),
            CodeStatus::Expired
        );
    }

    #[test]
    fn test_remaining_uses() {
        let mut code = sample_code("active", None);
        assert_eq!(code.remaining_uses(), Some(2));

        code.used_count = 3;
        assert_eq!(code.remaining_uses(), Some(0));

        code.max_uses = None;
        assert_eq!(code.remaining_uses(), None);
    }
}
