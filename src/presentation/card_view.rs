//! Card view model and the presenter that projects state into it.

use crate::domain::{CardState, TutoringSummary};
use crate::ports::detail_route;
use crate::presentation::format::{
    DEFAULT_UTC_OFFSET_MINUTES, fixed_offset, format_date, format_price, format_rating,
    star_count, star_indicator,
};
use crate::presentation::CardLabels;
use chrono::FixedOffset;

/// Image shown when a summary carries no image reference.
pub const DEFAULT_FALLBACK_IMAGE: &str =
    "https://i0.wp.com/port2flavors.com/wp-content/uploads/2022/07/placeholder-614.png";

/// Everything the rendering layer needs to draw one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub image_url: String,
    pub title: String,
    pub tutor_line: String,
    pub rating_text: String,
    pub stars: u8,
    pub star_indicator: String,
    pub review_count: usize,
    pub review_count_text: String,
    /// Full text; truncation is up to the renderer.
    pub description: String,
    pub price_text: String,
    pub date_text: String,
    pub detail_route: String,
}

/// Presentation cell. Pure: same summary and state always yield the same view.
#[derive(Debug, Clone)]
pub struct CardPresenter {
    labels: CardLabels,
    fallback_image: String,
    offset: FixedOffset,
}

impl CardPresenter {
    pub fn new(labels: CardLabels, fallback_image: impl Into<String>, offset: FixedOffset) -> Self {
        Self {
            labels,
            fallback_image: fallback_image.into(),
            offset,
        }
    }

    pub fn labels(&self) -> &CardLabels {
        &self.labels
    }

    pub fn project(&self, summary: &TutoringSummary, state: &CardState) -> CardView {
        let rating = state.rating();
        let stars = star_count(rating.average_rating);

        CardView {
            image_url: self.image_for(summary),
            title: summary.title.clone(),
            tutor_line: self.tutor_line(state),
            rating_text: format_rating(rating.average_rating),
            stars,
            star_indicator: star_indicator(stars),
            review_count: rating.review_count,
            review_count_text: self.labels.reviews(rating.review_count),
            description: summary.description.clone(),
            price_text: format_price(&self.labels.currency_prefix, summary.price),
            date_text: summary
                .created_at
                .as_ref()
                .map(|ts| format_date(ts, &self.offset))
                .unwrap_or_else(|| self.labels.date_unavailable.clone()),
            detail_route: detail_route(&summary.id),
        }
    }

    fn image_for(&self, summary: &TutoringSummary) -> String {
        match summary.image_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self.fallback_image.clone(),
        }
    }

    fn tutor_line(&self, state: &CardState) -> String {
        if state.loading() {
            return self.labels.loading.clone();
        }
        match state.tutor() {
            Some(tutor) => tutor.display_name(),
            None => self.labels.unknown_tutor.clone(),
        }
    }
}

impl Default for CardPresenter {
    /// Spanish labels, default fallback image, Lima time (UTC-5).
    fn default() -> Self {
        Self::new(
            CardLabels::default(),
            DEFAULT_FALLBACK_IMAGE,
            fixed_offset(DEFAULT_UTC_OFFSET_MINUTES),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CardEvent, CycleOutcome, LookupFailure, LookupTarget, Review, TutorLookup, TutorProfile,
        TutoringId, UserId,
    };
    use chrono::{TimeZone, Utc};

    fn algebra() -> TutoringSummary {
        TutoringSummary {
            id: TutoringId::new("t1"),
            title: "Algebra".into(),
            description: "Ecuaciones lineales y cuadráticas".into(),
            price: 49.9,
            image_url: None,
            created_at: None,
            tutor_id: Some(UserId::new("u1")),
        }
    }

    fn ana() -> TutorProfile {
        TutorProfile {
            id: UserId::new("u1"),
            first_name: "Ana".into(),
            last_name: "Lima".into(),
        }
    }

    fn review(rating: f64) -> Review {
        Review {
            tutoring_id: TutoringId::new("t1"),
            rating,
            comment: None,
        }
    }

    fn english() -> CardPresenter {
        CardPresenter::new(
            CardLabels::english(),
            DEFAULT_FALLBACK_IMAGE,
            FixedOffset::west_opt(5 * 3600).unwrap(),
        )
    }

    fn settle(summary: &TutoringSummary, outcome: CycleOutcome) -> CardState {
        let state = CardState::default().reduce(CardEvent::IdentityChanged(summary.identity()));
        let cycle = state.cycle();
        state.reduce(CardEvent::CycleSettled { cycle, outcome })
    }

    #[test]
    fn test_loaded_scenario() {
        let summary = algebra();
        let state = settle(
            &summary,
            CycleOutcome {
                tutor: TutorLookup::Found(ana()),
                reviews: Ok(vec![review(4.0), review(5.0)]),
            },
        );

        let view = english().project(&summary, &state);
        assert_eq!(view.rating_text, "4.5");
        assert_eq!(view.review_count, 2);
        assert_eq!(view.review_count_text, "2 reviews");
        assert_eq!(view.tutor_line, "Ana Lima");
        assert_eq!(view.price_text, "S/. 49.90");
        assert_eq!(view.stars, 5);
        assert_eq!(view.title, "Algebra");
        assert_eq!(view.detail_route, "/tutoring/t1");
    }

    #[test]
    fn test_empty_scenario() {
        let summary = algebra();
        let state = settle(
            &summary,
            CycleOutcome {
                tutor: TutorLookup::Failed(LookupFailure {
                    target: LookupTarget::Tutor,
                    reason: "Not found: user u1".into(),
                }),
                reviews: Ok(vec![]),
            },
        );

        let view = english().project(&summary, &state);
        assert_eq!(view.rating_text, "0.0");
        assert_eq!(view.review_count, 0);
        assert_eq!(view.tutor_line, "unknown tutor");
        assert_eq!(view.star_indicator, "☆☆☆☆☆");
    }

    #[test]
    fn test_tutor_line_while_loading() {
        let summary = algebra();
        let state = CardState::default().reduce(CardEvent::IdentityChanged(summary.identity()));

        let view = english().project(&summary, &state);
        assert_eq!(view.tutor_line, "loading");
        assert_eq!(view.rating_text, "0.0");

        let view = CardPresenter::default().project(&summary, &state);
        assert_eq!(view.tutor_line, "Cargando...");
        assert_eq!(view.review_count_text, "0 reseñas");
    }

    #[test]
    fn test_missing_date_uses_placeholder() {
        let summary = algebra();
        let view = english().project(&summary, &CardState::default());
        assert_eq!(view.date_text, "date unavailable");

        let view = CardPresenter::default().project(&summary, &CardState::default());
        assert_eq!(view.date_text, "Fecha no disponible");
    }

    #[test]
    fn test_date_rendered_in_offset() {
        let summary = TutoringSummary {
            created_at: Some(Utc.with_ymd_and_hms(2024, 3, 5, 19, 7, 0).unwrap()),
            ..algebra()
        };
        let view = english().project(&summary, &CardState::default());
        assert_eq!(view.date_text, "05/03/2024, 14:07");
    }

    #[test]
    fn test_image_fallback() {
        let presenter = english();

        let view = presenter.project(&algebra(), &CardState::default());
        assert_eq!(view.image_url, DEFAULT_FALLBACK_IMAGE);

        let blank = TutoringSummary {
            image_url: Some("  ".into()),
            ..algebra()
        };
        assert_eq!(presenter.project(&blank, &CardState::default()).image_url, DEFAULT_FALLBACK_IMAGE);

        let with_image = TutoringSummary {
            image_url: Some("https://cdn.example/algebra.png".into()),
            ..algebra()
        };
        assert_eq!(
            presenter.project(&with_image, &CardState::default()).image_url,
            "https://cdn.example/algebra.png"
        );
    }

    #[test]
    fn test_projection_is_deterministic() {
        let summary = algebra();
        let state = settle(
            &summary,
            CycleOutcome {
                tutor: TutorLookup::Skipped,
                reviews: Ok(vec![review(3.0)]),
            },
        );
        let presenter = english();
        assert_eq!(presenter.project(&summary, &state), presenter.project(&summary, &state));
    }
}
