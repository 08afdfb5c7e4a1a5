//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, Review, TutorProfile, TutoringId, TutoringSummary, UserId};

/// User data access. Resolves a tutor profile by user identity.
#[async_trait::async_trait]
pub trait UserLookupPort: Send + Sync {
    /// Fetch one profile. Fails with `NotFound` for unknown users, or a transport error.
    async fn get_tutor_profile(&self, tutor_id: &UserId) -> Result<TutorProfile, DomainError>;
}

/// Tutoring data access: reviews of one offering.
#[async_trait::async_trait]
pub trait ReviewLookupPort: Send + Sync {
    /// Fetch zero or more reviews. Order is irrelevant to aggregation.
    async fn get_reviews(&self, tutoring_id: &TutoringId) -> Result<Vec<Review>, DomainError>;
}

/// Tutoring data access: the listing itself. Used by the front-end to fill the grid.
#[async_trait::async_trait]
pub trait TutoringCatalogPort: Send + Sync {
    async fn list_tutorings(&self) -> Result<Vec<TutoringSummary>, DomainError>;
}
