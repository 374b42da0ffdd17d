//! Booking service driving the wizard state machine

use std::time::Duration;

use async_trait::async_trait;

use crate::{
    booking::flow::{BookingDraft, BookingFlow, BookingSubmitter, FlowError, TourContext},
    config::BookingConfig,
    error::{AppError, AppResult},
    models::booking::{Booking, BookingConfirmation, CreateBookingRequest},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    config: BookingConfig,
}

/// Persists confirmed bookings through the repository
struct RepoSubmitter {
    repository: Repository,
}

#[async_trait]
impl BookingSubmitter for RepoSubmitter {
    async fn submit(&self, draft: &BookingDraft) -> anyhow::Result<()> {
        self.repository.bookings.create(draft).await?;
        Ok(())
    }
}

impl BookingsService {
    pub fn new(repository: Repository, config: BookingConfig) -> Self {
        Self { repository, config }
    }

    /// Replay a submitted wizard form through the state machine and confirm.
    ///
    /// The confirmation always carries a reference once the guards pass;
    /// persistence failure degrades to a warning inside the flow.
    pub async fn create(&self, request: &CreateBookingRequest) -> AppResult<BookingConfirmation> {
        let tour = self.repository.tours.get_by_id(request.tour_id).await?;
        let dates: Vec<_> = self
            .repository
            .tours
            .dates_for_tour(tour.id)
            .await?
            .into_iter()
            .map(|r| r.into_record())
            .collect();

        let context = TourContext {
            tour_id: tour.id,
            title: tour.title.clone(),
            location: tour.location.clone(),
            price_per_person: tour.price,
        };

        let mut flow = BookingFlow::new(context, dates);
        if let Some(date_id) = request.date_id {
            flow.select_date(date_id).map_err(flow_error)?;
        }
        flow.set_participants(request.participants).map_err(flow_error)?;
        flow.next().map_err(flow_error)?;

        flow.set_lead(request.lead_traveler.clone().into());
        flow.set_travelers(request.travelers.iter().cloned().map(Into::into).collect());
        flow.set_special_requests(request.special_requests.clone());
        flow.next().map_err(flow_error)?;

        if self.config.confirmation_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.confirmation_delay_ms)).await;
        }

        let submitter = RepoSubmitter {
            repository: self.repository.clone(),
        };
        let draft = flow.confirm(&submitter).await.map_err(flow_error)?;

        tracing::info!(
            "Booking {} confirmed for tour {} ({} participants)",
            draft.reference,
            draft.tour_id,
            draft.participants
        );
        Ok(BookingConfirmation::from(draft))
    }

    /// Look a booking up by its reference
    pub async fn get_by_reference(&self, reference: &str) -> AppResult<Booking> {
        self.repository.bookings.get_by_reference(reference).await
    }
}

fn flow_error(e: FlowError) -> AppError {
    match e {
        FlowError::ParticipantsOutOfRange
        | FlowError::UnknownDate(_)
        | FlowError::LeadTravelerRequired => AppError::Validation(e.to_string()),
        FlowError::NotAtReview | FlowError::NoForwardTransition(_) => {
            AppError::Internal(e.to_string())
        }
    }
}
