//! Navigation port. Fired when the user activates a card.

use crate::domain::{DomainError, TutoringId};

/// Routing collaborator. Opens the detail view of a tutoring offering.
pub trait NavigationPort: Send + Sync {
    fn navigate_to_detail(&self, tutoring_id: &TutoringId) -> Result<(), DomainError>;
}

/// Route of the detail view for a tutoring offering.
pub fn detail_route(tutoring_id: &TutoringId) -> String {
    format!("/tutoring/{}", tutoring_id)
}
