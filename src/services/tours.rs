//! Tour catalog service

use std::collections::HashMap;

use crate::{
    booking::dates::{self, TourDate},
    error::AppResult,
    models::tour::{AdminTourQuery, CreateTour, Tour, TourDetail, UpdateTour},
    repository::Repository,
};

#[derive(Clone)]
pub struct ToursService {
    repository: Repository,
}

impl ToursService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Active tours with their date slots, for the storefront listing
    pub async fn list_public(&self) -> AppResult<Vec<TourDetail>> {
        let tours = self.repository.tours.list_active().await?;
        let ids: Vec<i32> = tours.iter().map(|t| t.id).collect();

        let mut by_tour: HashMap<i32, Vec<TourDate>> = HashMap::new();
        for row in self.repository.tours.dates_for_tours(&ids).await? {
            let tour_id = row.tour_id;
            by_tour.entry(tour_id).or_default().push(row.into_record());
        }

        Ok(tours
            .into_iter()
            .map(|tour| {
                let dates = by_tour.remove(&tour.id).unwrap_or_default();
                TourDetail { tour, dates }
            })
            .collect())
    }

    /// A single tour with its date slots
    pub async fn get_detail(&self, id: i32) -> AppResult<TourDetail> {
        let tour = self.repository.tours.get_by_id(id).await?;
        let dates = self.dates_for(id).await?;
        Ok(TourDetail { tour, dates })
    }

    pub async fn dates_for(&self, tour_id: i32) -> AppResult<Vec<TourDate>> {
        let rows = self.repository.tours.dates_for_tour(tour_id).await?;
        Ok(rows.into_iter().map(|r| r.into_record()).collect())
    }

    /// Admin listing with filters and pagination
    pub async fn list_admin(&self, query: &AdminTourQuery) -> AppResult<(Vec<Tour>, i64)> {
        self.repository.tours.list(query).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Tour> {
        self.repository.tours.get_by_id(id).await
    }

    /// Create a tour, normalizing the incoming date slots
    pub async fn create(&self, data: &CreateTour) -> AppResult<TourDetail> {
        let price = data.price.as_ref().map(|p| p.amount()).unwrap_or(0.0);
        let tour = self.repository.tours.create(data, price).await?;

        let dates = normalize_dates(&data.dates, price);
        self.repository.tours.replace_dates(tour.id, &dates).await?;

        tracing::info!("Created tour {} ({})", tour.id, tour.title);
        Ok(TourDetail { tour, dates })
    }

    /// Update a tour. A provided `dates` array replaces the whole slot list.
    pub async fn update(&self, id: i32, data: &UpdateTour) -> AppResult<TourDetail> {
        let price = data.price.as_ref().map(|p| p.amount());
        let tour = self.repository.tours.update(id, data, price).await?;

        let dates = match &data.dates {
            Some(raw) => {
                let dates = normalize_dates(raw, tour.price);
                self.repository.tours.replace_dates(id, &dates).await?;
                dates
            }
            None => self.dates_for(id).await?,
        };

        Ok(TourDetail { tour, dates })
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.tours.delete(id).await?;
        tracing::info!("Deleted tour {}", id);
        Ok(())
    }
}

/// Normalize an upstream date array, numbering slots from 1 where
/// they carry no id of their own
fn normalize_dates(raw: &[dates::RawTourDate], fallback_price: f64) -> Vec<TourDate> {
    raw.iter()
        .enumerate()
        .map(|(i, r)| dates::normalize(i as i32 + 1, r, fallback_price))
        .collect()
}
