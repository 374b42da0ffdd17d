//! Consultation codes repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::consultation_code::{
        BulkUpdateAction, CodeQuery, CodeStats, CodeStatus, ConsultationCode, NewCode,
        UpdateConsultationCode,
    },
};

#[derive(Clone)]
pub struct ConsultationCodesRepository {
    pool: Pool<Postgres>,
}

/// WHERE fragment matching a code's effective status, with expiry overlaid
fn effective_status_condition(status: CodeStatus) -> &'static str {
    match status {
        CodeStatus::Active => {
            "(status = 'active' AND (expires_at IS NULL OR expires_at > NOW()))"
        }
        CodeStatus::Inactive => {
            "(status = 'inactive' AND (expires_at IS NULL OR expires_at > NOW()))"
        }
        CodeStatus::Expired => {
            "(status = 'expired' OR (expires_at IS NOT NULL AND expires_at <= NOW()))"
        }
    }
}

impl ConsultationCodesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List codes with optional filters and pagination
    pub async fn list(&self, query: &CodeQuery) -> AppResult<(Vec<ConsultationCode>, i64)> {
        let (page, per_page) = super::page_window(query.page, query.per_page);
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();

        if let Some(status) = query.status {
            conditions.push(effective_status_condition(status).to_string());
        }
        if query.search.is_some() {
            conditions.push("(code ILIKE $1 OR description ILIKE $1)".to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let pattern = query.search.as_ref().map(|s| format!("%{}%", s));

        // Count total
        let count_q = format!("SELECT COUNT(*) FROM consultation_codes {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        if let Some(ref p) = pattern { count_builder = count_builder.bind(p); }
        let total = count_builder.fetch_one(&self.pool).await?;

        // Fetch rows
        let select_q = format!(
            "SELECT * FROM consultation_codes {} ORDER BY created_at DESC LIMIT {} OFFSET {}",
            where_clause, per_page, offset
        );
        let mut builder = sqlx::query_as::<_, ConsultationCode>(&select_q);
        if let Some(ref p) = pattern { builder = builder.bind(p); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok((rows, total))
    }

    /// Get code by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<ConsultationCode> {
        sqlx::query_as::<_, ConsultationCode>("SELECT * FROM consultation_codes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Consultation code {} not found", id)))
    }

    /// Get code by its code string
    pub async fn get_by_code(&self, code: &str) -> AppResult<Option<ConsultationCode>> {
        let row = sqlx::query_as::<_, ConsultationCode>(
            "SELECT * FROM consultation_codes WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Codes by id set, for exports
    pub async fn get_by_ids(&self, ids: &[i32]) -> AppResult<Vec<ConsultationCode>> {
        let rows = sqlx::query_as::<_, ConsultationCode>(
            "SELECT * FROM consultation_codes WHERE id = ANY($1) ORDER BY code",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every code, for the full export
    pub async fn list_all(&self) -> AppResult<Vec<ConsultationCode>> {
        let rows = sqlx::query_as::<_, ConsultationCode>(
            "SELECT * FROM consultation_codes ORDER BY code",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a single code
    pub async fn create(&self, new: &NewCode) -> AppResult<ConsultationCode> {
        sqlx::query_as::<_, ConsultationCode>(
            r#"
            INSERT INTO consultation_codes (code, status, description, max_uses, expires_at, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&new.code)
        .bind(new.status.as_str())
        .bind(&new.description)
        .bind(new.max_uses)
        .bind(new.expires_at)
        .bind(&new.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db) = e {
                if db.is_unique_violation() {
                    return AppError::Conflict(format!("Code {} already exists", new.code));
                }
            }
            AppError::Database(e)
        })
    }

    /// Create a batch of codes; all-or-nothing
    pub async fn create_many(&self, batch: &[NewCode]) -> AppResult<Vec<ConsultationCode>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(batch.len());

        for new in batch {
            let row = sqlx::query_as::<_, ConsultationCode>(
                r#"
                INSERT INTO consultation_codes (code, status, description, max_uses, expires_at, created_by)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(&new.code)
            .bind(new.status.as_str())
            .bind(&new.description)
            .bind(new.max_uses)
            .bind(new.expires_at)
            .bind(&new.created_by)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db) = e {
                    if db.is_unique_violation() {
                        return AppError::Conflict(format!("Code {} already exists", new.code));
                    }
                }
                AppError::Database(e)
            })?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// How many codes already use a bulk prefix
    pub async fn count_with_prefix(&self, prefix: &str) -> AppResult<i64> {
        let pattern = format!("{}-%", prefix);
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM consultation_codes WHERE code LIKE $1")
                .bind(pattern)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Update a code
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateConsultationCode,
    ) -> AppResult<ConsultationCode> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_f {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_f!(data.status, "status");
        add_f!(data.description, "description");
        add_f!(data.max_uses, "max_uses");
        add_f!(data.expires_at, "expires_at");

        let query = format!(
            "UPDATE consultation_codes SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, ConsultationCode>(&query).bind(now);

        if let Some(status) = data.status { builder = builder.bind(status.as_str()); }
        if let Some(ref d) = data.description { builder = builder.bind(d); }
        if let Some(m) = data.max_uses { builder = builder.bind(m); }
        if let Some(e) = data.expires_at { builder = builder.bind(e); }

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Consultation code {} not found", id)))
    }

    /// Delete a code
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM consultation_codes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Consultation code {} not found", id)));
        }
        Ok(())
    }

    /// Apply one bulk action to a selected id set in a single statement
    pub async fn bulk_update(&self, ids: &[i32], action: &BulkUpdateAction) -> AppResult<u64> {
        let now = Utc::now();
        let result = match action {
            BulkUpdateAction::Status(status) => {
                sqlx::query(
                    "UPDATE consultation_codes SET status = $1, updated_at = $2 WHERE id = ANY($3)",
                )
                .bind(status.as_str())
                .bind(now)
                .bind(ids)
                .execute(&self.pool)
                .await?
            }
            BulkUpdateAction::Expiry(expires_at) => {
                sqlx::query(
                    "UPDATE consultation_codes SET expires_at = $1, updated_at = $2 WHERE id = ANY($3)",
                )
                .bind(expires_at)
                .bind(now)
                .bind(ids)
                .execute(&self.pool)
                .await?
            }
            BulkUpdateAction::Description(description) => {
                sqlx::query(
                    "UPDATE consultation_codes SET description = $1, updated_at = $2 WHERE id = ANY($3)",
                )
                .bind(description)
                .bind(now)
                .bind(ids)
                .execute(&self.pool)
                .await?
            }
        };
        Ok(result.rows_affected())
    }

    /// Aggregate counters with expiry overlaid
    pub async fn stats(&self) -> AppResult<CodeStats> {
        let stats = sqlx::query_as::<_, CodeStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'active'
                    AND (expires_at IS NULL OR expires_at > NOW())) AS active,
                COUNT(*) FILTER (WHERE status = 'inactive'
                    AND (expires_at IS NULL OR expires_at > NOW())) AS inactive,
                COUNT(*) FILTER (WHERE status = 'expired'
                    OR (expires_at IS NOT NULL AND expires_at <= NOW())) AS expired,
                COALESCE(SUM(used_count), 0)::bigint AS total_uses
            FROM consultation_codes
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    /// Consume one use of an active, unexpired, uncapped-or-below-cap code.
    /// Returns the updated row, or None when no such code qualified.
    pub async fn redeem(&self, code: &str) -> AppResult<Option<ConsultationCode>> {
        let row = sqlx::query_as::<_, ConsultationCode>(
            r#"
            UPDATE consultation_codes
            SET used_count = used_count + 1, updated_at = NOW()
            WHERE code = $1
              AND status = 'active'
              AND (expires_at IS NULL OR expires_at > NOW())
              AND (max_uses IS NULL OR used_count < max_uses)
            RETURNING *
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
