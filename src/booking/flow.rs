//! Booking wizard state machine
//!
//! Walks a traveler party from trip-detail selection through confirmation:
//! `1 trip details → 2 traveler info → 3 review → 4 confirmation`. The
//! machine is transport-agnostic; the bookings service replays a submitted
//! form through it and plugs persistence in via [`BookingSubmitter`].

use async_trait::async_trait;
use thiserror::Error;

use super::dates::TourDate;
use super::pricing::{self, PriceBreakdown};
use super::reference::generate_reference;

pub const MIN_PARTICIPANTS: u32 = 1;
pub const MAX_PARTICIPANTS: u32 = 10;

/// Wizard steps in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    TripDetails,
    TravelerInfo,
    Review,
    Confirmation,
}

impl BookingStep {
    pub fn number(self) -> u8 {
        match self {
            BookingStep::TripDetails => 1,
            BookingStep::TravelerInfo => 2,
            BookingStep::Review => 3,
            BookingStep::Confirmation => 4,
        }
    }
}

/// The tour a wizard session operates on
#[derive(Debug, Clone)]
pub struct TourContext {
    pub tour_id: i32,
    pub title: String,
    pub location: String,
    pub price_per_person: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadTraveler {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Additional party member; both names are optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraTraveler {
    pub first_name: String,
    pub last_name: String,
}

/// The completed booking the wizard hands to persistence
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub reference: String,
    pub tour_id: i32,
    pub tour_title: String,
    pub location: String,
    pub date_start: String,
    pub date_end: String,
    pub participants: u32,
    pub price_per_person: f64,
    pub service_fee: f64,
    pub total_price: f64,
    pub lead: LeadTraveler,
    pub travelers: Vec<ExtraTraveler>,
    pub special_requests: String,
}

/// Persistence seam for confirmed bookings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingSubmitter: Send + Sync {
    async fn submit(&self, draft: &BookingDraft) -> anyhow::Result<()>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("participant count must be between 1 and 10")]
    ParticipantsOutOfRange,

    #[error("no date slot with id {0}")]
    UnknownDate(i32),

    #[error("lead traveler first name is required")]
    LeadTravelerRequired,

    #[error("booking can only be submitted from the review step")]
    NotAtReview,

    #[error("step {0} has no forward transition")]
    NoForwardTransition(u8),
}

/// One booking session
pub struct BookingFlow {
    step: BookingStep,
    tour: TourContext,
    dates: Vec<TourDate>,
    selected_date: Option<i32>,
    participants: u32,
    lead: LeadTraveler,
    travelers: Vec<ExtraTraveler>,
    special_requests: String,
    reference: Option<String>,
}

impl BookingFlow {
    pub fn new(tour: TourContext, dates: Vec<TourDate>) -> Self {
        Self {
            step: BookingStep::TripDetails,
            tour,
            dates,
            selected_date: None,
            participants: MIN_PARTICIPANTS,
            lead: LeadTraveler::default(),
            travelers: Vec::new(),
            special_requests: String::new(),
            reference: None,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn selected_date(&self) -> Option<&TourDate> {
        self.selected_date
            .and_then(|id| self.dates.iter().find(|d| d.id == id))
    }

    pub fn travelers(&self) -> &[ExtraTraveler] {
        &self.travelers
    }

    /// Reference assigned at confirmation
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn select_date(&mut self, id: i32) -> Result<(), FlowError> {
        if self.dates.iter().any(|d| d.id == id) {
            self.selected_date = Some(id);
            Ok(())
        } else {
            Err(FlowError::UnknownDate(id))
        }
    }

    /// Set the party size, resizing the additional-traveler list to
    /// `participants - 1` and keeping already-entered names.
    pub fn set_participants(&mut self, count: u32) -> Result<(), FlowError> {
        if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&count) {
            return Err(FlowError::ParticipantsOutOfRange);
        }
        self.participants = count;
        self.travelers
            .resize_with(count as usize - 1, ExtraTraveler::default);
        Ok(())
    }

    pub fn set_lead(&mut self, lead: LeadTraveler) {
        self.lead = lead;
    }

    pub fn set_travelers(&mut self, travelers: Vec<ExtraTraveler>) {
        self.travelers = travelers;
        self.travelers
            .resize_with(self.participants as usize - 1, ExtraTraveler::default);
    }

    pub fn set_special_requests(&mut self, text: String) {
        self.special_requests = text;
    }

    /// Advance one step.
    ///
    /// Leaving trip details always succeeds and falls back to a default date
    /// slot when none was chosen. Leaving traveler info requires a non-empty
    /// lead first name; last name and phone are collected but not gated.
    /// Review advances through [`confirm`](Self::confirm) only.
    pub fn next(&mut self) -> Result<BookingStep, FlowError> {
        match self.step {
            BookingStep::TripDetails => {
                if self.selected_date.is_none() {
                    self.selected_date = self.default_date();
                }
                self.step = BookingStep::TravelerInfo;
                Ok(self.step)
            }
            BookingStep::TravelerInfo => {
                if self.lead.first_name.trim().is_empty() {
                    return Err(FlowError::LeadTravelerRequired);
                }
                self.step = BookingStep::Review;
                Ok(self.step)
            }
            step => Err(FlowError::NoForwardTransition(step.number())),
        }
    }

    /// Step back from traveler info or review; a no-op elsewhere.
    pub fn back(&mut self) -> BookingStep {
        self.step = match self.step {
            BookingStep::TravelerInfo => BookingStep::TripDetails,
            BookingStep::Review => BookingStep::TravelerInfo,
            other => other,
        };
        self.step
    }

    /// First slot with seats remaining, falling back to the first slot.
    fn default_date(&self) -> Option<i32> {
        self.dates
            .iter()
            .find(|d| d.is_bookable())
            .or_else(|| self.dates.first())
            .map(|d| d.id)
    }

    /// Per-person price: the selected slot's, or the tour's own
    fn price_per_person(&self) -> f64 {
        self.selected_date()
            .map(|d| d.price)
            .unwrap_or(self.tour.price_per_person)
    }

    pub fn price(&self) -> PriceBreakdown {
        pricing::quote(self.price_per_person(), self.participants)
    }

    /// Submit the booking and enter the confirmation step.
    ///
    /// The persistence attempt runs exactly once. A failed attempt is logged
    /// and swallowed: the flow confirms either way and the caller always gets
    /// a referenced booking back.
    pub async fn confirm(
        &mut self,
        submitter: &dyn BookingSubmitter,
    ) -> Result<BookingDraft, FlowError> {
        if self.step != BookingStep::Review {
            return Err(FlowError::NotAtReview);
        }

        let draft = self.draft();
        if let Err(e) = submitter.submit(&draft).await {
            tracing::warn!("Booking submission failed for {}: {:#}", draft.reference, e);
        }

        self.reference = Some(draft.reference.clone());
        self.step = BookingStep::Confirmation;
        Ok(draft)
    }

    fn draft(&self) -> BookingDraft {
        let price = self.price();
        let (date_start, date_end) = self
            .selected_date()
            .map(|d| (d.start.clone(), d.end.clone()))
            .unwrap_or_default();

        BookingDraft {
            reference: generate_reference(),
            tour_id: self.tour.tour_id,
            tour_title: self.tour.title.clone(),
            location: self.tour.location.clone(),
            date_start,
            date_end,
            participants: self.participants,
            price_per_person: self.price_per_person(),
            service_fee: price.service_fee,
            total_price: price.total,
            lead: self.lead.clone(),
            travelers: self.travelers.clone(),
            special_requests: self.special_requests.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::dates::TourDateStatus;

    fn tour() -> TourContext {
        TourContext {
            tour_id: 1,
            title: "Patagonia Trek".to_string(),
            location: "Chile".to_string(),
            price_per_person: 245.0,
        }
    }

    fn slot(id: i32, spots: i32) -> TourDate {
        TourDate {
            id,
            start: format!("Jun {}", 10 + id),
            end: format!("Jun {}", 14 + id),
            spots_left: spots,
            status: TourDateStatus::for_spots(spots),
            price: 245.0,
        }
    }

    fn ok_submitter() -> MockBookingSubmitter {
        let mut submitter = MockBookingSubmitter::new();
        submitter.expect_submit().returning(|_| Ok(()));
        submitter
    }

    #[test]
    fn test_starts_at_trip_details() {
        let flow = BookingFlow::new(tour(), vec![slot(1, 5)]);
        assert_eq!(flow.step(), BookingStep::TripDetails);
        assert_eq!(flow.step().number(), 1);
    }

    #[test]
    fn test_next_defaults_to_first_bookable_date() {
        let mut flow = BookingFlow::new(tour(), vec![slot(1, 0), slot(2, 4), slot(3, 8)]);
        flow.next().expect("1 -> 2");
        assert_eq!(flow.selected_date().map(|d| d.id), Some(2));
    }

    #[test]
    fn test_next_falls_back_to_first_slot_when_all_full() {
        let mut flow = BookingFlow::new(tour(), vec![slot(1, 0), slot(2, 0)]);
        flow.next().expect("1 -> 2");
        assert_eq!(flow.selected_date().map(|d| d.id), Some(1));
    }

    #[test]
    fn test_select_unknown_date_is_rejected() {
        let mut flow = BookingFlow::new(tour(), vec![slot(1, 5)]);
        assert_eq!(flow.select_date(99), Err(FlowError::UnknownDate(99)));
    }

    #[test]
    fn test_guard_blocks_empty_lead_first_name() {
        let mut flow = BookingFlow::new(tour(), vec![slot(1, 5)]);
        flow.next().expect("1 -> 2");

        assert_eq!(flow.next(), Err(FlowError::LeadTravelerRequired));
        assert_eq!(flow.step(), BookingStep::TravelerInfo);

        flow.set_lead(LeadTraveler {
            first_name: "   ".to_string(),
            ..Default::default()
        });
        assert_eq!(flow.next(), Err(FlowError::LeadTravelerRequired));
    }

    #[test]
    fn test_guard_ignores_last_name_and_phone() {
        let mut flow = BookingFlow::new(tour(), vec![slot(1, 5)]);
        flow.next().expect("1 -> 2");
        flow.set_lead(LeadTraveler {
            first_name: "Jane".to_string(),
            ..Default::default()
        });
        assert_eq!(flow.next(), Ok(BookingStep::Review));
    }

    #[test]
    fn test_back_only_from_traveler_info_and_review() {
        let mut flow = BookingFlow::new(tour(), vec![slot(1, 5)]);
        assert_eq!(flow.back(), BookingStep::TripDetails);

        flow.next().expect("1 -> 2");
        flow.set_lead(LeadTraveler {
            first_name: "Jane".to_string(),
            ..Default::default()
        });
        flow.next().expect("2 -> 3");
        assert_eq!(flow.back(), BookingStep::TravelerInfo);
        assert_eq!(flow.back(), BookingStep::TripDetails);
    }

    #[test]
    fn test_participants_bounds_and_traveler_resizing() {
        let mut flow = BookingFlow::new(tour(), vec![slot(1, 5)]);
        assert_eq!(flow.set_participants(0), Err(FlowError::ParticipantsOutOfRange));
        assert_eq!(flow.set_participants(11), Err(FlowError::ParticipantsOutOfRange));

        flow.set_participants(4).expect("within bounds");
        assert_eq!(flow.travelers().len(), 3);

        flow.set_travelers(vec![ExtraTraveler {
            first_name: "Ana".to_string(),
            last_name: String::new(),
        }]);
        assert_eq!(flow.travelers().len(), 3);
        assert_eq!(flow.travelers()[0].first_name, "Ana");

        flow.set_participants(2).expect("shrink");
        assert_eq!(flow.travelers().len(), 1);
        assert_eq!(flow.travelers()[0].first_name, "Ana");
    }

    #[tokio::test]
    async fn test_confirm_requires_review_step() {
        let mut flow = BookingFlow::new(tour(), vec![slot(1, 5)]);
        let submitter = MockBookingSubmitter::new();
        assert_eq!(
            flow.confirm(&submitter).await.err(),
            Some(FlowError::NotAtReview)
        );
    }

    #[tokio::test]
    async fn test_full_run_with_successful_submission() {
        let mut flow = BookingFlow::new(tour(), vec![slot(1, 5), slot(2, 3)]);
        flow.select_date(1).expect("slot exists");
        flow.set_participants(2).expect("within bounds");
        flow.next().expect("1 -> 2");
        flow.set_lead(LeadTraveler {
            first_name: "Jane".to_string(),
            ..Default::default()
        });
        flow.next().expect("2 -> 3");

        let price = flow.price();
        assert_eq!(price.base, 490.0);
        assert_eq!(price.service_fee, 49.0);
        assert_eq!(price.total, 539.0);

        let mut submitter = MockBookingSubmitter::new();
        submitter
            .expect_submit()
            .times(1)
            .withf(|draft| draft.participants == 2 && draft.total_price == 539.0)
            .returning(|_| Ok(()));

        let draft = flow.confirm(&submitter).await.expect("confirm");
        assert_eq!(flow.step(), BookingStep::Confirmation);
        assert!(draft.reference.starts_with("BOOKING-"));
        assert_eq!(flow.reference(), Some(draft.reference.as_str()));
        assert_eq!(draft.date_start, "Jun 11");
    }

    #[tokio::test]
    async fn test_confirm_swallows_submission_failure() {
        let mut flow = BookingFlow::new(tour(), vec![slot(1, 5)]);
        flow.next().expect("1 -> 2");
        flow.set_lead(LeadTraveler {
            first_name: "Jane".to_string(),
            ..Default::default()
        });
        flow.next().expect("2 -> 3");

        let mut submitter = MockBookingSubmitter::new();
        submitter
            .expect_submit()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("connection refused")));

        let draft = flow.confirm(&submitter).await.expect("confirms regardless");
        assert_eq!(flow.step(), BookingStep::Confirmation);
        assert!(draft.reference.starts_with("BOOKING-"));
    }

    #[tokio::test]
    async fn test_no_forward_transition_past_confirmation() {
        let mut flow = BookingFlow::new(tour(), vec![slot(1, 5)]);
        flow.next().expect("1 -> 2");
        flow.set_lead(LeadTraveler {
            first_name: "Jane".to_string(),
            ..Default::default()
        });
        flow.next().expect("2 -> 3");
        flow.confirm(&ok_submitter()).await.expect("confirm");

        assert_eq!(flow.next(), Err(FlowError::NoForwardTransition(4)));
        assert_eq!(flow.back(), BookingStep::Confirmation);
    }

    #[test]
    fn test_review_does_not_advance_with_next() {
        let mut flow = BookingFlow::new(tour(), vec![slot(1, 5)]);
        flow.next().expect("1 -> 2");
        flow.set_lead(LeadTraveler {
            first_name: "Jane".to_string(),
            ..Default::default()
        });
        flow.next().expect("2 -> 3");
        assert_eq!(flow.next(), Err(FlowError::NoForwardTransition(3)));
    }

    #[test]
    fn test_price_uses_selected_slot_price() {
        let mut dates = vec![slot(1, 5)];
        dates[0].price = 300.0;
        let mut flow = BookingFlow::new(tour(), dates);
        flow.select_date(1).expect("slot exists");
        assert_eq!(flow.price().base, 300.0);

        // No slot selected: the tour's own price applies
        let flow = BookingFlow::new(tour(), vec![]);
        assert_eq!(flow.price().base, 245.0);
    }
}
