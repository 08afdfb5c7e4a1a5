//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod card_state;
pub mod entities;
pub mod errors;
pub mod rating;

pub use card_state::{
    CardEvent, CardState, CycleOutcome, CyclePhase, CycleToken, LookupStatus, TutorLookup,
};
pub use entities::{CardIdentity, Review, TutorProfile, TutoringId, TutoringSummary, UserId};
pub use errors::{DomainError, LookupFailure, LookupTarget};
pub use rating::AggregatedRating;
