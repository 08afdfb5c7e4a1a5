//! Card state machine. Pure reducer over identity changes and cycle results.
//!
//! Every aggregation cycle carries a [`CycleToken`]. Results are applied only
//! when their token matches the current one, so a superseded cycle can never
//! write into the state of a newer identity.

use crate::domain::{AggregatedRating, CardIdentity, LookupFailure, Review, TutorProfile};

/// Monotonically increasing id of an aggregation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CycleToken(u64);

impl CycleToken {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Status of one lookup slot within the current cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupStatus {
    #[default]
    Pending,
    /// No tutor identity on the summary; nothing was requested.
    Skipped,
    Succeeded,
    Failed(LookupFailure),
}

/// Result of the tutor lookup step.
#[derive(Debug, Clone, PartialEq)]
pub enum TutorLookup {
    Skipped,
    Found(TutorProfile),
    Failed(LookupFailure),
}

/// Both lookups of one cycle, joined.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutcome {
    pub tutor: TutorLookup,
    pub reviews: Result<Vec<Review>, LookupFailure>,
}

/// Diagnostic classification of the card state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Loading,
    /// Tutor and reviews both resolved.
    Loaded,
    /// Exactly one of tutor/reviews failed or came back empty.
    LoadedPartial,
    /// Neither produced data.
    LoadedEmpty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardEvent {
    IdentityChanged(CardIdentity),
    CycleSettled {
        cycle: CycleToken,
        outcome: CycleOutcome,
    },
    Unmounted,
}

/// Derived state of one card. Written only through [`CardState::reduce`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardState {
    identity: Option<CardIdentity>,
    cycle: CycleToken,
    mounted: bool,
    loading: bool,
    tutor: Option<TutorProfile>,
    rating: AggregatedRating,
    tutor_status: LookupStatus,
    reviews_status: LookupStatus,
}

impl CardState {
    pub fn reduce(self, event: CardEvent) -> CardState {
        match event {
            CardEvent::IdentityChanged(identity) => {
                if self.mounted && self.identity.as_ref() == Some(&identity) {
                    return self;
                }
                CardState {
                    identity: Some(identity),
                    cycle: self.cycle.next(),
                    mounted: true,
                    loading: true,
                    ..CardState::default()
                }
            }
            CardEvent::CycleSettled { cycle, outcome } => {
                if cycle != self.cycle || !self.mounted || !self.loading {
                    return self;
                }
                let (tutor, tutor_status) = match outcome.tutor {
                    TutorLookup::Skipped => (None, LookupStatus::Skipped),
                    TutorLookup::Found(profile) => (Some(profile), LookupStatus::Succeeded),
                    TutorLookup::Failed(failure) => (None, LookupStatus::Failed(failure)),
                };
                let (rating, reviews_status) = match outcome.reviews {
                    Ok(reviews) => (
                        AggregatedRating::from_reviews(&reviews),
                        LookupStatus::Succeeded,
                    ),
                    Err(failure) => (AggregatedRating::default(), LookupStatus::Failed(failure)),
                };
                CardState {
                    loading: false,
                    tutor,
                    rating,
                    tutor_status,
                    reviews_status,
                    ..self
                }
            }
            CardEvent::Unmounted => CardState {
                cycle: self.cycle.next(),
                ..CardState::default()
            },
        }
    }

    pub fn identity(&self) -> Option<&CardIdentity> {
        self.identity.as_ref()
    }

    pub fn cycle(&self) -> CycleToken {
        self.cycle
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Resolved tutor. Not authoritative while loading.
    pub fn tutor(&self) -> Option<&TutorProfile> {
        self.tutor.as_ref()
    }

    pub fn rating(&self) -> AggregatedRating {
        self.rating
    }

    pub fn tutor_status(&self) -> &LookupStatus {
        &self.tutor_status
    }

    pub fn reviews_status(&self) -> &LookupStatus {
        &self.reviews_status
    }

    /// Lookup failures recorded for the current cycle.
    pub fn failures(&self) -> Vec<&LookupFailure> {
        [&self.tutor_status, &self.reviews_status]
            .into_iter()
            .filter_map(|status| match status {
                LookupStatus::Failed(failure) => Some(failure),
                _ => None,
            })
            .collect()
    }

    pub fn phase(&self) -> CyclePhase {
        if self.identity.is_none() {
            return CyclePhase::Idle;
        }
        if self.loading {
            return CyclePhase::Loading;
        }
        let tutor_ok = self.tutor.is_some();
        let reviews_ok = !self.rating.is_empty();
        match (tutor_ok, reviews_ok) {
            (true, true) => CyclePhase::Loaded,
            (false, false) => CyclePhase::LoadedEmpty,
            _ => CyclePhase::LoadedPartial,
        }
    }
}
