//! Booking domain core
//!
//! Pure logic behind the four-step booking wizard: date-slot normalization,
//! price breakdown, reference generation, and the state machine itself.
//! Nothing here touches HTTP or the database; the services layer wires the
//! machine to both.

pub mod dates;
pub mod flow;
pub mod pricing;
pub mod reference;

pub use dates::{normalize, DateShape, RawTourDate, TourDate, TourDateStatus};
pub use flow::{
    BookingDraft, BookingFlow, BookingStep, BookingSubmitter, ExtraTraveler, FlowError,
    LeadTraveler, TourContext,
};
pub use pricing::{parse_price, quote, PriceBreakdown};
pub use reference::generate_reference;
