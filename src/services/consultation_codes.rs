//! Consultation code lifecycle service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::consultation_code::{
        generate_code, normalize_code, BulkCreateCodes, BulkUpdateCodes, CodeQuery, CodeStats,
        CodeStatus, ConsultationCode, CreateConsultationCode, NewCode, RedeemResponse,
        UpdateConsultationCode,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ConsultationCodesService {
    repository: Repository,
}

impl ConsultationCodesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List codes with the computed expiry overlaid on each row
    pub async fn list(&self, query: &CodeQuery) -> AppResult<(Vec<ConsultationCode>, i64)> {
        let (codes, total) = self.repository.consultation_codes.list(query).await?;
        let now = Utc::now();
        Ok((codes.into_iter().map(|c| c.resolved(now)).collect(), total))
    }

    pub async fn get(&self, id: i32) -> AppResult<ConsultationCode> {
        let code = self.repository.consultation_codes.get_by_id(id).await?;
        Ok(code.resolved(Utc::now()))
    }

    /// Create a single code, generating one when none was supplied
    pub async fn create(
        &self,
        data: &CreateConsultationCode,
        created_by: &str,
    ) -> AppResult<ConsultationCode> {
        let code = match data.code.as_deref() {
            Some(raw) if !raw.trim().is_empty() => normalize_code(raw),
            _ => generate_code(),
        };

        let new = NewCode {
            code,
            status: data.status.unwrap_or(CodeStatus::Active),
            description: data.description.clone(),
            max_uses: data.max_uses,
            expires_at: data.expires_at,
            created_by: created_by.to_string(),
        };

        let created = self.repository.consultation_codes.create(&new).await?;
        tracing::info!("Created consultation code {}", created.code);
        Ok(created)
    }

    /// Create a numbered batch, continuing the sequence where the prefix
    /// left off
    pub async fn bulk_create(
        &self,
        data: &BulkCreateCodes,
        created_by: &str,
    ) -> AppResult<Vec<ConsultationCode>> {
        let prefix = normalize_code(&data.prefix);
        let existing = self
            .repository
            .consultation_codes
            .count_with_prefix(&prefix)
            .await?;

        let batch = data.build(existing + 1, created_by);
        let created = self.repository.consultation_codes.create_many(&batch).await?;

        tracing::info!(
            "Bulk-created {} consultation codes with prefix {}",
            created.len(),
            prefix
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        id: i32,
        data: &UpdateConsultationCode,
    ) -> AppResult<ConsultationCode> {
        let updated = self.repository.consultation_codes.update(id, data).await?;
        Ok(updated.resolved(Utc::now()))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.consultation_codes.delete(id).await?;
        tracing::info!("Deleted consultation code {}", id);
        Ok(())
    }

    /// Apply one update kind across a selected set; returns the number of
    /// codes touched
    pub async fn bulk_update(&self, data: &BulkUpdateCodes) -> AppResult<u64> {
        let touched = self
            .repository
            .consultation_codes
            .bulk_update(&data.ids, &data.action)
            .await?;
        tracing::info!("Bulk update touched {} consultation codes", touched);
        Ok(touched)
    }

    pub async fn stats(&self) -> AppResult<CodeStats> {
        self.repository.consultation_codes.stats().await
    }

    /// Validate and consume one use of a code.
    ///
    /// The increment is a single guarded UPDATE; when it matches no row the
    /// code is re-fetched only to name the rejection reason.
    pub async fn redeem(&self, raw_code: &str) -> AppResult<RedeemResponse> {
        let code = normalize_code(raw_code);

        if let Some(redeemed) = self.repository.consultation_codes.redeem(&code).await? {
            tracing::info!("Consultation code {} redeemed", redeemed.code);
            return Ok(RedeemResponse {
                valid: true,
                remaining_uses: redeemed.remaining_uses(),
                code: redeemed,
            });
        }

        match self.repository.consultation_codes.get_by_code(&code).await? {
            None => Err(AppError::NotFound(format!("Code {} not found", code))),
            Some(existing) => Err(rejection_reason(&existing)),
        }
    }

    /// The code set behind an export selection: the given ids, or everything
    pub async fn export_set(&self, ids: Option<&[i32]>) -> AppResult<Vec<ConsultationCode>> {
        let codes = match ids {
            Some(ids) => self.repository.consultation_codes.get_by_ids(ids).await?,
            None => self.repository.consultation_codes.list_all().await?,
        };
        let now = Utc::now();
        Ok(codes.into_iter().map(|c| c.resolved(now)).collect())
    }
}

/// Why a code failed the redemption guard
fn rejection_reason(code: &ConsultationCode) -> AppError {
    let now = Utc::now();
    if code.is_expired_at(now) {
        return AppError::CodeRejected(
            ErrorCode::CodeExpired,
            format!("Code {} has expired", code.code),
        );
    }
    if code.status != CodeStatus::Active.as_str() {
        return AppError::CodeRejected(
            ErrorCode::CodeInactive,
            format!("Code {} is not active", code.code),
        );
    }
    AppError::CodeRejected(
        ErrorCode::CodeExhausted,
        format!("Code {} has no uses left", code.code),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(status: &str, expires_at: Option<chrono::DateTime<Utc>>, max_uses: Option<i32>, used: i32) -> ConsultationCode {
        ConsultationCode {
            id: 1,
            code: "SUMMIT24".to_string(),
            status: status.to_string(),
            description: None,
            max_uses,
            used_count: used,
            expires_at,
            created_by: "admin".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_rejection_prefers_expiry_over_status() {
        let past = Utc::now() - chrono::Duration::hours(1);
        let rejected = rejection_reason(&code("inactive", Some(past), None, 0));
        match rejected {
            AppError::CodeRejected(reason, _) => assert_eq!(reason, ErrorCode::CodeExpired),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rejection_names_inactive_then_exhausted() {
        let rejected = rejection_reason(&code("inactive", None, None, 0));
        match rejected {
            AppError::CodeRejected(reason, _) => assert_eq!(reason, ErrorCode::CodeInactive),
            other => panic!("unexpected error: {:?}", other),
        }

        let rejected = rejection_reason(&code("active", None, Some(3), 3));
        match rejected {
            AppError::CodeRejected(reason, _) => assert_eq!(reason, ErrorCode::CodeExhausted),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
