//! Tours repository

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};

use crate::{
    booking::dates::TourDate,
    error::{AppError, AppResult},
    models::tour::{AdminTourQuery, CreateTour, Tour, TourDateRow, UpdateTour},
};

#[derive(Clone)]
pub struct ToursRepository {
    pool: Pool<Postgres>,
}

impl ToursRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List active tours for the storefront
    pub async fn list_active(&self) -> AppResult<Vec<Tour>> {
        let rows = sqlx::query_as::<_, Tour>(
            "SELECT * FROM tours WHERE is_active = TRUE ORDER BY title",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List tours with optional filters and pagination (admin)
    pub async fn list(&self, query: &AdminTourQuery) -> AppResult<(Vec<Tour>, i64)> {
        let (page, per_page) = super::page_window(query.page, query.per_page);
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.category_id.is_some() {
            conditions.push(format!("category_id = ${}", idx));
            idx += 1;
        }
        if query.active.is_some() {
            conditions.push(format!("is_active = ${}", idx));
            idx += 1;
        }
        if query.search.is_some() {
            conditions.push(format!("(title ILIKE ${} OR location ILIKE ${})", idx, idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let pattern = query.search.as_ref().map(|s| format!("%{}%", s));

        // Count total
        let count_q = format!("SELECT COUNT(*) FROM tours {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        if let Some(c) = query.category_id { count_builder = count_builder.bind(c); }
        if let Some(a) = query.active { count_builder = count_builder.bind(a); }
        if let Some(ref p) = pattern { count_builder = count_builder.bind(p); }
        let total = count_builder.fetch_one(&self.pool).await?;

        // Fetch rows
        let select_q = format!(
            "SELECT * FROM tours {} ORDER BY title LIMIT {} OFFSET {}",
            where_clause, per_page, offset
        );
        let mut builder = sqlx::query_as::<_, Tour>(&select_q);
        if let Some(c) = query.category_id { builder = builder.bind(c); }
        if let Some(a) = query.active { builder = builder.bind(a); }
        if let Some(ref p) = pattern { builder = builder.bind(p); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok((rows, total))
    }

    /// Get tour by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Tour> {
        sqlx::query_as::<_, Tour>("SELECT * FROM tours WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tour {} not found", id)))
    }

    /// Date slots for one tour, in display order
    pub async fn dates_for_tour(&self, tour_id: i32) -> AppResult<Vec<TourDateRow>> {
        let rows = sqlx::query_as::<_, TourDateRow>(
            "SELECT * FROM tour_dates WHERE tour_id = $1 ORDER BY position, id",
        )
        .bind(tour_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Date slots for a set of tours; callers group by tour_id
    pub async fn dates_for_tours(&self, tour_ids: &[i32]) -> AppResult<Vec<TourDateRow>> {
        let rows = sqlx::query_as::<_, TourDateRow>(
            "SELECT * FROM tour_dates WHERE tour_id = ANY($1) ORDER BY tour_id, position, id",
        )
        .bind(tour_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a tour. Date slots are written separately via `replace_dates`.
    pub async fn create(&self, data: &CreateTour, price: f64) -> AppResult<Tour> {
        let row = sqlx::query_as::<_, Tour>(
            r#"
            INSERT INTO tours (
                title, location, price, duration, hero_image, guide,
                summary, category_id, itinerary, is_active
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.location)
        .bind(price)
        .bind(&data.duration)
        .bind(&data.hero_image)
        .bind(&data.guide)
        .bind(&data.summary)
        .bind(data.category_id)
        .bind(Json(data.itinerary.clone()))
        .bind(data.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a tour. A provided price overrides; dates are handled by
    /// `replace_dates`.
    pub async fn update(&self, id: i32, data: &UpdateTour, price: Option<f64>) -> AppResult<Tour> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_f {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_f!(data.title, "title");
        add_f!(data.location, "location");
        add_f!(price, "price");
        add_f!(data.duration, "duration");
        add_f!(data.hero_image, "hero_image");
        add_f!(data.guide, "guide");
        add_f!(data.summary, "summary");
        add_f!(data.category_id, "category_id");
        add_f!(data.itinerary, "itinerary");
        add_f!(data.is_active, "is_active");

        let query = format!("UPDATE tours SET {} WHERE id = {} RETURNING *", sets.join(", "), id);

        let mut builder = sqlx::query_as::<_, Tour>(&query).bind(now);

        macro_rules! bind_f {
            ($field:expr) => {
                if let Some(ref val) = $field { builder = builder.bind(val); }
            };
        }

        bind_f!(data.title);
        bind_f!(data.location);
        if let Some(p) = price { builder = builder.bind(p); }
        bind_f!(data.duration);
        bind_f!(data.hero_image);
        bind_f!(data.guide);
        bind_f!(data.summary);
        if let Some(c) = data.category_id { builder = builder.bind(c); }
        if let Some(ref it) = data.itinerary { builder = builder.bind(Json(it.clone())); }
        if let Some(a) = data.is_active { builder = builder.bind(a); }

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tour {} not found", id)))
    }

    /// Replace a tour's date slots with the given canonical records
    pub async fn replace_dates(&self, tour_id: i32, dates: &[TourDate]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM tour_dates WHERE tour_id = $1")
            .bind(tour_id)
            .execute(&mut *tx)
            .await?;

        for (position, date) in dates.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO tour_dates (tour_id, start_date, end_date, spots_left, status, price, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(tour_id)
            .bind(&date.start)
            .bind(&date.end)
            .bind(date.spots_left)
            .bind(date.status.as_str())
            .bind(date.price)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete a tour and its date slots
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Tour {} not found", id)));
        }
        Ok(())
    }

    /// Count tours still attached to a category
    pub async fn count_in_category(&self, category_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tours WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
