//! Tutoring card: a summary, its controller, its presenter and an optional activation callback.

use crate::domain::{CardState, DomainError, TutoringSummary};
use crate::ports::{NavigationPort, detail_route};
use crate::presentation::{CardPresenter, CardView};
use crate::usecases::{AggregationService, CardController};
use std::sync::Arc;
use tracing::{info, warn};

pub struct TutoringCard {
    summary: TutoringSummary,
    controller: CardController,
    presenter: Arc<CardPresenter>,
    on_activate: Option<Arc<dyn NavigationPort>>,
}

impl TutoringCard {
    pub fn new(
        summary: TutoringSummary,
        aggregation: Arc<AggregationService>,
        presenter: Arc<CardPresenter>,
        on_activate: Option<Arc<dyn NavigationPort>>,
    ) -> Self {
        Self {
            summary,
            controller: CardController::new(aggregation),
            presenter,
            on_activate,
        }
    }

    /// Start observing the summary's identity. Must run inside a tokio runtime.
    pub fn mount(&self) {
        self.controller.set_identity(self.summary.identity());
    }

    /// Swap in a new summary. A new cycle starts only if its identity changed.
    pub fn update(&mut self, summary: TutoringSummary) {
        self.summary = summary;
        self.mount();
    }

    pub fn unmount(&self) {
        self.controller.unmount();
    }

    pub fn summary(&self) -> &TutoringSummary {
        &self.summary
    }

    pub fn state(&self) -> CardState {
        self.controller.snapshot()
    }

    /// Current view. Placeholders stand in for anything not yet loaded.
    pub fn view(&self) -> CardView {
        self.presenter.project(&self.summary, &self.controller.snapshot())
    }

    /// View once the current cycle has settled.
    pub async fn settled_view(&self) -> CardView {
        let state = self.controller.settled().await;
        self.presenter.project(&self.summary, &state)
    }

    /// User activated the card. Fires the navigation callback, if any, and
    /// returns the detail route.
    pub fn activate(&self) -> Result<String, DomainError> {
        let route = detail_route(&self.summary.id);
        match &self.on_activate {
            Some(nav) => {
                info!(tutoring_id = %self.summary.id, route = %route, "card activated");
                nav.navigate_to_detail(&self.summary.id)?;
            }
            None => warn!(tutoring_id = %self.summary.id, "card activated without navigation handler"),
        }
        Ok(route)
    }
}
