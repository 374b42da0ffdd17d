//! Categories repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory, UpdateCategory},
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List categories in display order
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY sort_order, name")
                .fetch_all(&self.pool)
                .await?;
        Ok(categories)
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Category> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn get_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    /// Create a new category with its resolved slug
    pub async fn create(&self, data: &CreateCategory, slug: &str) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, slug, description, image, sort_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(slug)
        .bind(&data.description)
        .bind(&data.image)
        .bind(data.sort_order.unwrap_or(0))
        .bind(data.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db) = e {
                if db.is_unique_violation() {
                    return AppError::Conflict(format!("Slug {} already exists", slug));
                }
            }
            AppError::Database(e)
        })
    }

    /// Update a category; only supplied fields change
    pub async fn update(&self, id: i32, data: &UpdateCategory) -> AppResult<Category> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_f {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_f!(data.name, "name");
        add_f!(data.slug, "slug");
        add_f!(data.description, "description");
        add_f!(data.image, "image");
        add_f!(data.sort_order, "sort_order");
        add_f!(data.is_active, "is_active");

        let query = format!(
            "UPDATE categories SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Category>(&query).bind(now);

        if let Some(ref v) = data.name { builder = builder.bind(v); }
        if let Some(ref v) = data.slug { builder = builder.bind(v); }
        if let Some(ref v) = data.description { builder = builder.bind(v); }
        if let Some(ref v) = data.image { builder = builder.bind(v); }
        if let Some(v) = data.sort_order { builder = builder.bind(v); }
        if let Some(v) = data.is_active { builder = builder.bind(v); }

        builder
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db) = e {
                    if db.is_unique_violation() {
                        return AppError::Conflict("Slug already exists".to_string());
                    }
                }
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Delete a category
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }
        Ok(())
    }
}
