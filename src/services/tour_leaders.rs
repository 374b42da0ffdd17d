//! Tour leader service

use crate::{
    error::AppResult,
    models::tour_leader::{CreateTourLeader, TourLeader, UpdateTourLeader},
    repository::Repository,
};

#[derive(Clone)]
pub struct TourLeadersService {
    repository: Repository,
}

impl TourLeadersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<TourLeader>> {
        self.repository.tour_leaders.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<TourLeader> {
        self.repository.tour_leaders.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateTourLeader) -> AppResult<TourLeader> {
        let leader = self.repository.tour_leaders.create(data).await?;
        tracing::info!("Created tour leader {} ({})", leader.id, leader.name);
        Ok(leader)
    }

    pub async fn update(&self, id: i32, data: &UpdateTourLeader) -> AppResult<TourLeader> {
        self.repository.tour_leaders.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.tour_leaders.delete(id).await?;
        tracing::info!("Deleted tour leader {}", id);
        Ok(())
    }
}
