//! Card controller. Owns the derived state of one card and drives its cycles.
//!
//! State lives in a `watch` channel and is only written through
//! [`CardState::reduce`]. Each identity change spawns one aggregation task;
//! its result comes back as a `CycleSettled` event tagged with the cycle token
//! it was started for, so results of a superseded cycle are dropped.

use crate::domain::{CardEvent, CardIdentity, CardState, CycleToken};
use crate::usecases::AggregationService;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

pub struct CardController {
    aggregation: Arc<AggregationService>,
    state: Arc<watch::Sender<CardState>>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl CardController {
    pub fn new(aggregation: Arc<AggregationService>) -> Self {
        let (tx, _rx) = watch::channel(CardState::default());
        Self {
            aggregation,
            state: Arc::new(tx),
            in_flight: Mutex::new(None),
        }
    }

    /// Observe `identity`. Starts a new cycle unless it is already the current one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_identity(&self, identity: CardIdentity) {
        let before = self.state.borrow().cycle();
        dispatch(&self.state, CardEvent::IdentityChanged(identity.clone()));
        let cycle = self.state.borrow().cycle();
        if cycle == before {
            return;
        }

        debug!(
            cycle = cycle.value(),
            tutoring_id = %identity.tutoring_id,
            "aggregation cycle started"
        );
        let aggregation = Arc::clone(&self.aggregation);
        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            let outcome = aggregation.run_cycle(&identity).await;
            if !dispatch(&state, CardEvent::CycleSettled { cycle, outcome }) {
                debug!(cycle = cycle.value(), "discarding result of stale cycle");
            }
        });
        self.replace_in_flight(Some(handle));
    }

    /// Tear down: cancel the running cycle and discard all derived state.
    pub fn unmount(&self) {
        self.replace_in_flight(None);
        dispatch(&self.state, CardEvent::Unmounted);
    }

    pub fn snapshot(&self) -> CardState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CardState> {
        self.state.subscribe()
    }

    pub fn current_cycle(&self) -> CycleToken {
        self.state.borrow().cycle()
    }

    /// Wait until the current cycle has settled (loading is false).
    pub async fn settled(&self) -> CardState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|state| !state.loading()).await {
            Ok(state) => state.clone(),
            // Sender lives in self; unreachable while self is borrowed.
            Err(_) => self.snapshot(),
        }
    }

    fn replace_in_flight(&self, handle: Option<JoinHandle<()>>) {
        let mut slot = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = std::mem::replace(&mut *slot, handle) {
            previous.abort();
        }
    }
}

impl Drop for CardController {
    fn drop(&mut self) {
        self.replace_in_flight(None);
    }
}

/// Apply one event. Returns true if the state changed.
fn dispatch(state: &watch::Sender<CardState>, event: CardEvent) -> bool {
    state.send_if_modified(|current| {
        let next = current.clone().reduce(event);
        if next == *current {
            false
        } else {
            *current = next;
            true
        }
    })
}

#[cfg(test)]
pub(crate) mod testing {
    //! Collaborators whose lookups block until the test opens a gate.

    use crate::adapters::memory::InMemoryDirectory;
    use crate::domain::{DomainError, Review, TutorProfile, TutoringId, UserId};
    use crate::ports::{ReviewLookupPort, UserLookupPort};
    use std::sync::Arc;
    use tokio::sync::Semaphore;

    pub struct GatedDirectory {
        inner: InMemoryDirectory,
        pub tutor_gate: Arc<Semaphore>,
        pub review_gate: Arc<Semaphore>,
    }

    impl GatedDirectory {
        pub fn new(inner: InMemoryDirectory) -> Self {
            Self {
                inner,
                tutor_gate: Arc::new(Semaphore::new(0)),
                review_gate: Arc::new(Semaphore::new(0)),
            }
        }
    }

    async fn pass(gate: &Semaphore) {
        gate.acquire().await.expect("gate closed").forget();
    }

    #[async_trait::async_trait]
    impl UserLookupPort for GatedDirectory {
        async fn get_tutor_profile(&self, tutor_id: &UserId) -> Result<TutorProfile, DomainError> {
            pass(&self.tutor_gate).await;
            self.inner.get_tutor_profile(tutor_id).await
        }
    }

    #[async_trait::async_trait]
    impl ReviewLookupPort for GatedDirectory {
        async fn get_reviews(&self, tutoring_id: &TutoringId) -> Result<Vec<Review>, DomainError> {
            pass(&self.review_gate).await;
            self.inner.get_reviews(tutoring_id).await
        }
    }

    /// Let spawned tasks run until they block again.
    pub async fn settle_tasks() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{GatedDirectory, settle_tasks};
    use super::*;
    use crate::adapters::memory::InMemoryDirectory;
    use crate::domain::{CyclePhase, LookupStatus, TutoringId, UserId};

    fn identity(tutoring: &str, tutor: Option<&str>) -> CardIdentity {
        CardIdentity {
            tutoring_id: TutoringId::new(tutoring),
            tutor_id: tutor.map(UserId::new),
        }
    }

    fn gated_controller() -> (CardController, Arc<GatedDirectory>) {
        let dir = Arc::new(GatedDirectory::new(InMemoryDirectory::demo()));
        let aggregation = Arc::new(AggregationService::new(dir.clone(), dir.clone()));
        (CardController::new(aggregation), dir)
    }

    #[tokio::test]
    async fn test_loading_until_both_lookups_settle() {
        let (controller, dir) = gated_controller();

        controller.set_identity(identity("1", Some("10")));
        assert!(controller.snapshot().loading());

        settle_tasks().await;
        assert!(controller.snapshot().loading());

        dir.tutor_gate.add_permits(1);
        settle_tasks().await;
        assert!(controller.snapshot().loading(), "must wait for reviews too");
        assert!(controller.snapshot().tutor().is_none());

        dir.review_gate.add_permits(1);
        let state = controller.settled().await;
        assert!(!state.loading());
        assert_eq!(state.phase(), CyclePhase::Loaded);
        assert_eq!(state.rating().average_rating, 4.5);
        assert_eq!(state.rating().review_count, 2);
    }

    #[tokio::test]
    async fn test_loading_waits_for_tutor_when_reviews_settle_first() {
        let (controller, dir) = gated_controller();
        controller.set_identity(identity("2", Some("11")));

        dir.review_gate.add_permits(1);
        settle_tasks().await;
        assert!(controller.snapshot().loading());

        dir.tutor_gate.add_permits(1);
        let state = controller.settled().await;
        assert_eq!(state.tutor().map(|t| t.display_name()), Some("Jorge Quispe".into()));
    }

    #[tokio::test]
    async fn test_identity_change_mid_flight_discards_old_cycle() {
        let (controller, dir) = gated_controller();

        controller.set_identity(identity("1", Some("10")));
        settle_tasks().await;
        let first_cycle = controller.current_cycle();

        controller.set_identity(identity("2", Some("11")));
        assert_eq!(controller.current_cycle(), first_cycle.next());

        dir.tutor_gate.add_permits(2);
        dir.review_gate.add_permits(2);
        let state = controller.settled().await;

        assert_eq!(state.identity(), Some(&identity("2", Some("11"))));
        assert_eq!(state.tutor().map(|t| t.first_name.as_str()), Some("Jorge"));
        assert_eq!(state.rating().review_count, 3);
        assert_eq!(state.rating().average_rating, 4.3);

        settle_tasks().await;
        assert_eq!(controller.snapshot(), state);
    }

    #[tokio::test]
    async fn test_same_identity_does_not_refetch() {
        let dir = Arc::new(InMemoryDirectory::demo());
        let controller = CardController::new(Arc::new(AggregationService::new(dir.clone(), dir)));

        controller.set_identity(identity("1", Some("10")));
        let settled = controller.settled().await;
        controller.set_identity(identity("1", Some("10")));

        assert_eq!(controller.snapshot(), settled);
        assert!(!controller.snapshot().loading());
    }

    #[tokio::test]
    async fn test_failures_settle_loading() {
        let dir = Arc::new(
            InMemoryDirectory::demo()
                .failing_user(UserId::new("10"))
                .failing_reviews(TutoringId::new("1")),
        );
        let controller = CardController::new(Arc::new(AggregationService::new(dir.clone(), dir)));

        controller.set_identity(identity("1", Some("10")));
        let state = controller.settled().await;

        assert!(!state.loading());
        assert_eq!(state.phase(), CyclePhase::LoadedEmpty);
        assert!(matches!(state.tutor_status(), LookupStatus::Failed(_)));
        assert!(matches!(state.reviews_status(), LookupStatus::Failed(_)));
        assert_eq!(state.rating().average_rating, 0.0);
    }

    #[tokio::test]
    async fn test_unmount_discards_in_flight_cycle() {
        let (controller, dir) = gated_controller();

        controller.set_identity(identity("1", Some("10")));
        settle_tasks().await;
        controller.unmount();

        dir.tutor_gate.add_permits(1);
        dir.review_gate.add_permits(1);
        settle_tasks().await;

        let state = controller.snapshot();
        assert!(!state.is_mounted());
        assert!(state.tutor().is_none());
        assert_eq!(state.phase(), CyclePhase::Idle);
    }

    #[tokio::test]
    async fn test_subscribers_observe_settlement() {
        let dir = Arc::new(InMemoryDirectory::demo());
        let controller = CardController::new(Arc::new(AggregationService::new(dir.clone(), dir)));
        let mut rx = controller.subscribe();

        controller.set_identity(identity("4", None));
        let state = rx.wait_for(|s| s.identity().is_some() && !s.loading()).await.unwrap().clone();

        assert_eq!(state.tutor_status(), &LookupStatus::Skipped);
        assert_eq!(state.rating().review_count, 1);
    }
}
