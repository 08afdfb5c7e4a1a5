//! Application use cases. Orchestrate domain logic via ports.

pub mod aggregation_service;
pub mod card_controller;
pub mod tutoring_card;

pub use aggregation_service::AggregationService;
pub use card_controller::CardController;
pub use tutoring_card::TutoringCard;
