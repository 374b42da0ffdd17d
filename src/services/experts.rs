//! Expert profile service

use crate::{
    error::AppResult,
    models::expert::{CreateExpert, Expert, ExpertProfile, SetFeaturedTours, UpdateExpert},
    models::tour::Tour,
    repository::Repository,
};

/// How many other experts a profile page suggests
const RELATED_EXPERTS_LIMIT: i64 = 3;

#[derive(Clone)]
pub struct ExpertsService {
    repository: Repository,
}

impl ExpertsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Expert>> {
        self.repository.experts.list().await
    }

    pub async fn list_active(&self) -> AppResult<Vec<Expert>> {
        self.repository.experts.list_active().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Expert> {
        self.repository.experts.get_by_id(id).await
    }

    /// The profile-page aggregate.
    ///
    /// The two side fetches run concurrently with no ordering between them
    /// and are allowed to fail independently: a failure is logged and served
    /// as an empty list rather than failing the page.
    pub async fn profile(&self, id: i32) -> AppResult<ExpertProfile> {
        let expert = self.repository.experts.get_by_id(id).await?;

        let (related, featured) = tokio::join!(
            self.repository.experts.list_related(id, RELATED_EXPERTS_LIMIT),
            self.repository.experts.featured_tours(id),
        );

        let related_experts = related.unwrap_or_else(|e| {
            tracing::warn!("Related-experts fetch failed for expert {}: {}", id, e);
            Vec::new()
        });
        let featured_tours = featured.unwrap_or_else(|e| {
            tracing::warn!("Featured-tours fetch failed for expert {}: {}", id, e);
            Vec::new()
        });

        Ok(ExpertProfile {
            expert,
            related_experts,
            featured_tours,
        })
    }

    pub async fn create(&self, data: &CreateExpert) -> AppResult<Expert> {
        let expert = self.repository.experts.create(data).await?;
        tracing::info!("Created expert {} ({})", expert.id, expert.name);
        Ok(expert)
    }

    pub async fn update(&self, id: i32, data: &UpdateExpert) -> AppResult<Expert> {
        self.repository.experts.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.experts.delete(id).await?;
        tracing::info!("Deleted expert {}", id);
        Ok(())
    }

    pub async fn featured_tours(&self, expert_id: i32) -> AppResult<Vec<Tour>> {
        self.repository.experts.get_by_id(expert_id).await?;
        self.repository.experts.featured_tours(expert_id).await
    }

    /// Replace the ordered featured-tour relation
    pub async fn set_featured_tours(
        &self,
        expert_id: i32,
        data: &SetFeaturedTours,
    ) -> AppResult<Vec<Tour>> {
        self.repository.experts.get_by_id(expert_id).await?;
        self.repository
            .experts
            .set_featured_tours(expert_id, &data.tour_ids)
            .await?;
        self.repository.experts.featured_tours(expert_id).await
    }
}
