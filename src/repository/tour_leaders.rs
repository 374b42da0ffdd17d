//! Tour leaders repository

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::tour_leader::{CreateTourLeader, TourLeader, UpdateTourLeader},
};

#[derive(Clone)]
pub struct TourLeadersRepository {
    pool: Pool<Postgres>,
}

impl TourLeadersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<TourLeader>> {
        let leaders =
            sqlx::query_as::<_, TourLeader>("SELECT * FROM tour_leaders ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(leaders)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<TourLeader> {
        sqlx::query_as::<_, TourLeader>("SELECT * FROM tour_leaders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tour leader {} not found", id)))
    }

    pub async fn create(&self, data: &CreateTourLeader) -> AppResult<TourLeader> {
        let leader = sqlx::query_as::<_, TourLeader>(
            r#"
            INSERT INTO tour_leaders (name, role, bio, photo, certifications, travel_stories, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.role)
        .bind(&data.bio)
        .bind(&data.photo)
        .bind(Json(data.certifications.clone()))
        .bind(Json(data.travel_stories.clone()))
        .bind(data.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;
        Ok(leader)
    }

    pub async fn update(&self, id: i32, data: &UpdateTourLeader) -> AppResult<TourLeader> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_f {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_f!(data.name, "name");
        add_f!(data.role, "role");
        add_f!(data.bio, "bio");
        add_f!(data.photo, "photo");
        add_f!(data.certifications, "certifications");
        add_f!(data.travel_stories, "travel_stories");
        add_f!(data.is_active, "is_active");

        let query = format!(
            "UPDATE tour_leaders SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, TourLeader>(&query).bind(now);

        if let Some(ref v) = data.name { builder = builder.bind(v); }
        if let Some(ref v) = data.role { builder = builder.bind(v); }
        if let Some(ref v) = data.bio { builder = builder.bind(v); }
        if let Some(ref v) = data.photo { builder = builder.bind(v); }
        if let Some(ref v) = data.certifications { builder = builder.bind(Json(v.clone())); }
        if let Some(ref v) = data.travel_stories { builder = builder.bind(Json(v.clone())); }
        if let Some(v) = data.is_active { builder = builder.bind(v); }

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tour leader {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tour_leaders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Tour leader {} not found", id)));
        }
        Ok(())
    }
}
