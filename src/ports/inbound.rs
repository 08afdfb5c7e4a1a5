//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI drives the tutoring listing.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Show the listing and handle card activation until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
