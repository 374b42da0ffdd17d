//! Category service

use crate::{
    error::{AppError, AppResult},
    models::category::{slugify, Category, CreateCategory, UpdateCategory},
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Category> {
        self.repository.categories.get_by_id(id).await
    }

    /// Create a category, deriving the slug from the name when absent
    pub async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        let slug = match data.slug.as_deref() {
            Some(s) if !s.trim().is_empty() => slugify(s),
            _ => slugify(&data.name),
        };
        if slug.is_empty() {
            return Err(AppError::Validation(
                "Category name does not produce a usable slug".to_string(),
            ));
        }

        if self.repository.categories.get_by_slug(&slug).await?.is_some() {
            return Err(AppError::Conflict(format!("Slug {} already exists", slug)));
        }

        let category = self.repository.categories.create(data, &slug).await?;
        tracing::info!("Created category {} ({})", category.id, category.slug);
        Ok(category)
    }

    pub async fn update(&self, id: i32, data: &UpdateCategory) -> AppResult<Category> {
        self.repository.categories.update(id, data).await
    }

    /// Delete a category; refused while tours still reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let in_use = self.repository.tours.count_in_category(id).await?;
        if in_use > 0 {
            return Err(AppError::Conflict(format!(
                "Category is still referenced by {} tour(s)",
                in_use
            )));
        }

        self.repository.categories.delete(id).await?;
        tracing::info!("Deleted category {}", id);
        Ok(())
    }
}
