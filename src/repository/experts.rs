//! Experts repository

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        expert::{CreateExpert, Expert, UpdateExpert},
        tour::Tour,
    },
};

#[derive(Clone)]
pub struct ExpertsRepository {
    pool: Pool<Postgres>,
}

impl ExpertsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List every expert, newest first
    pub async fn list(&self) -> AppResult<Vec<Expert>> {
        let experts = sqlx::query_as::<_, Expert>("SELECT * FROM experts ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(experts)
    }

    /// List active experts for the public site
    pub async fn list_active(&self) -> AppResult<Vec<Expert>> {
        let experts = sqlx::query_as::<_, Expert>(
            "SELECT * FROM experts WHERE is_active = true ORDER BY rating DESC, review_count DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(experts)
    }

    /// Active experts other than the one being viewed
    pub async fn list_related(&self, exclude_id: i32, limit: i64) -> AppResult<Vec<Expert>> {
        let experts = sqlx::query_as::<_, Expert>(
            r#"
            SELECT * FROM experts
            WHERE is_active = true AND id != $1
            ORDER BY rating DESC, review_count DESC
            LIMIT $2
            "#,
        )
        .bind(exclude_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(experts)
    }

    /// Get expert by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Expert> {
        sqlx::query_as::<_, Expert>("SELECT * FROM experts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Expert {} not found", id)))
    }

    /// Create a new expert
    pub async fn create(&self, data: &CreateExpert) -> AppResult<Expert> {
        let expert = sqlx::query_as::<_, Expert>(
            r#"
            INSERT INTO experts (
                name, title, location, bio, expertise, review_count, rating,
                years_experience, social_media, latest_videos, hero_image, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.title)
        .bind(&data.location)
        .bind(&data.bio)
        .bind(Json(data.expertise.clone()))
        .bind(data.review_count.unwrap_or(0))
        .bind(data.rating.unwrap_or(0.0))
        .bind(data.years_experience)
        .bind(Json(data.social_media.clone()))
        .bind(Json(data.latest_videos.clone()))
        .bind(&data.hero_image)
        .bind(data.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;
        Ok(expert)
    }

    /// Update an expert
    pub async fn update(&self, id: i32, data: &UpdateExpert) -> AppResult<Expert> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_f {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_f!(data.name, "name");
        add_f!(data.title, "title");
        add_f!(data.location, "location");
        add_f!(data.bio, "bio");
        add_f!(data.expertise, "expertise");
        add_f!(data.review_count, "review_count");
        add_f!(data.rating, "rating");
        add_f!(data.years_experience, "years_experience");
        add_f!(data.social_media, "social_media");
        add_f!(data.latest_videos, "latest_videos");
        add_f!(data.hero_image, "hero_image");
        add_f!(data.is_active, "is_active");

        let query = format!(
            "UPDATE experts SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Expert>(&query).bind(now);

        if let Some(ref v) = data.name { builder = builder.bind(v); }
        if let Some(ref v) = data.title { builder = builder.bind(v); }
        if let Some(ref v) = data.location { builder = builder.bind(v); }
        if let Some(ref v) = data.bio { builder = builder.bind(v); }
        if let Some(ref v) = data.expertise { builder = builder.bind(Json(v.clone())); }
        if let Some(v) = data.review_count { builder = builder.bind(v); }
        if let Some(v) = data.rating { builder = builder.bind(v); }
        if let Some(v) = data.years_experience { builder = builder.bind(v); }
        if let Some(ref v) = data.social_media { builder = builder.bind(Json(v.clone())); }
        if let Some(ref v) = data.latest_videos { builder = builder.bind(Json(v.clone())); }
        if let Some(ref v) = data.hero_image { builder = builder.bind(v); }
        if let Some(v) = data.is_active { builder = builder.bind(v); }

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Expert {} not found", id)))
    }

    /// Delete an expert
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM experts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Expert {} not found", id)));
        }
        Ok(())
    }

    /// Tours featured on an expert profile, in curated order
    pub async fn featured_tours(&self, expert_id: i32) -> AppResult<Vec<Tour>> {
        let tours = sqlx::query_as::<_, Tour>(
            r#"
            SELECT t.* FROM tours t
            JOIN expert_featured_tours eft ON eft.tour_id = t.id
            WHERE eft.expert_id = $1
            ORDER BY eft.position, t.id
            "#,
        )
        .bind(expert_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tours)
    }

    /// Replace an expert's featured-tour list wholesale, keeping order
    pub async fn set_featured_tours(&self, expert_id: i32, tour_ids: &[i32]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM expert_featured_tours WHERE expert_id = $1")
            .bind(expert_id)
            .execute(&mut *tx)
            .await?;

        for (position, tour_id) in tour_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO expert_featured_tours (expert_id, tour_id, position) VALUES ($1, $2, $3)",
            )
            .bind(expert_id)
            .bind(tour_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
