//! Implements InputPort. Listing grid in the terminal with inquire-based card activation.

use crate::adapters::ui::card_renderer::CardRenderer;
use crate::domain::{DomainError, TutoringSummary};
use crate::ports::{InputPort, NavigationPort, TutoringCatalogPort};
use crate::presentation::CardPresenter;
use crate::usecases::{AggregationService, TutoringCard};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::Select;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const EXIT_OPTION: &str = "Salir";

/// Red prompt prefix and highlight, like the card's rating stars.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("?").with_fg(Color::LightRed))
        .with_highlighted_option_prefix(Styled::new(">").with_fg(Color::LightRed));
    inquire::set_global_render_config(config);
}

fn option_label(summary: &TutoringSummary) -> String {
    format!("{} ({})", summary.title, summary.id)
}

/// Activate a card. Navigation errors are logged so the prompt loop, and the
/// unmount that follows it, keep running.
fn open_card(card: &TutoringCard) -> Option<String> {
    match card.activate() {
        Ok(route) => Some(route),
        Err(e) => {
            warn!(tutoring_id = %card.summary().id, error = %e, "navigation failed");
            None
        }
    }
}

/// TUI adapter. Mounts one card per listed tutoring and lets the user open one.
pub struct TuiInputPort {
    catalog: Arc<dyn TutoringCatalogPort>,
    aggregation: Arc<AggregationService>,
    presenter: Arc<CardPresenter>,
    navigator: Arc<dyn NavigationPort>,
    renderer: CardRenderer,
}

impl TuiInputPort {
    pub fn new(
        catalog: Arc<dyn TutoringCatalogPort>,
        aggregation: Arc<AggregationService>,
        presenter: Arc<CardPresenter>,
        navigator: Arc<dyn NavigationPort>,
        renderer: CardRenderer,
    ) -> Self {
        Self {
            catalog,
            aggregation,
            presenter,
            navigator,
            renderer,
        }
    }

    fn build_cards(&self, listing: Vec<TutoringSummary>) -> Vec<TutoringCard> {
        listing
            .into_iter()
            .map(|summary| {
                TutoringCard::new(
                    summary,
                    Arc::clone(&self.aggregation),
                    Arc::clone(&self.presenter),
                    Some(Arc::clone(&self.navigator)),
                )
            })
            .collect()
    }

    /// Mount every card, then wait for each to settle behind a spinner.
    async fn load_and_print(&self, cards: &[TutoringCard]) {
        for card in cards {
            card.mount();
        }

        let loading = self.presenter.labels().loading.clone();
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.red} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));

        let mut views = Vec::with_capacity(cards.len());
        for (i, card) in cards.iter().enumerate() {
            spinner.set_message(format!("{} {}/{}", loading, i + 1, cards.len()));
            views.push(card.settled_view().await);
            let failures = card.state().failures().len();
            if failures > 0 {
                warn!(tutoring_id = %card.summary().id, failures, "card loaded with missing data");
            }
        }
        spinner.finish_and_clear();

        for view in &views {
            self.renderer.print(view);
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let listing = self.catalog.list_tutorings().await?;
        if listing.is_empty() {
            info!("no tutorings listed");
            return Ok(());
        }
        info!(count = listing.len(), "listing loaded");

        let cards = self.build_cards(listing);
        self.load_and_print(&cards).await;

        loop {
            let mut options: Vec<String> =
                cards.iter().map(|c| option_label(c.summary())).collect();
            options.push(EXIT_OPTION.to_string());

            let choice = match Select::new("Abrir tutoría", options).raw_prompt() {
                Ok(choice) => choice,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(e) => return Err(DomainError::Ui(e.to_string())),
            };
            let Some(card) = cards.get(choice.index) else {
                break;
            };
            open_card(card);
        }

        for card in &cards {
            card.unmount();
        }
        Ok(())
    }
}
