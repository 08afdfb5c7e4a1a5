//! Aggregation workflow: tutor lookup and review lookup, joined.
//!
//! Both requests are issued concurrently and awaited together. Collaborator
//! errors never escape: each one becomes a [`LookupFailure`] in the outcome.

use crate::domain::{
    CardIdentity, CycleOutcome, LookupFailure, Review, TutorLookup, TutoringId, UserId,
};
use crate::ports::{ReviewLookupPort, UserLookupPort};
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs one aggregation cycle against the user and tutoring collaborators.
pub struct AggregationService {
    users: Arc<dyn UserLookupPort>,
    tutorings: Arc<dyn ReviewLookupPort>,
}

impl AggregationService {
    pub fn new(users: Arc<dyn UserLookupPort>, tutorings: Arc<dyn ReviewLookupPort>) -> Self {
        Self { users, tutorings }
    }

    /// Look up tutor and reviews for `identity`. Returns once both have settled.
    pub async fn run_cycle(&self, identity: &CardIdentity) -> CycleOutcome {
        let (tutor, reviews) = tokio::join!(
            self.lookup_tutor(identity.tutor_id.as_ref()),
            self.lookup_reviews(&identity.tutoring_id),
        );
        CycleOutcome { tutor, reviews }
    }

    async fn lookup_tutor(&self, tutor_id: Option<&UserId>) -> TutorLookup {
        let Some(tutor_id) = tutor_id else {
            return TutorLookup::Skipped;
        };
        match self.users.get_tutor_profile(tutor_id).await {
            Ok(profile) => TutorLookup::Found(profile),
            Err(e) => {
                warn!(tutor_id = %tutor_id, error = %e, "tutor lookup failed");
                TutorLookup::Failed(LookupFailure::tutor(&e))
            }
        }
    }

    async fn lookup_reviews(&self, tutoring_id: &TutoringId) -> Result<Vec<Review>, LookupFailure> {
        match self.tutorings.get_reviews(tutoring_id).await {
            Ok(reviews) => {
                debug!(tutoring_id = %tutoring_id, count = reviews.len(), "reviews fetched");
                Ok(reviews)
            }
            Err(e) => {
                warn!(tutoring_id = %tutoring_id, error = %e, "review lookup failed");
                Err(LookupFailure::reviews(&e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDirectory;
    use crate::domain::{LookupTarget, TutoringId};
    use std::time::{Duration, Instant};

    fn service(dir: InMemoryDirectory) -> AggregationService {
        let dir = Arc::new(dir);
        AggregationService::new(dir.clone(), dir)
    }

    fn identity(tutoring: &str, tutor: Option<&str>) -> CardIdentity {
        CardIdentity {
            tutoring_id: TutoringId::new(tutoring),
            tutor_id: tutor.map(UserId::new),
        }
    }

    #[tokio::test]
    async fn test_both_lookups_succeed() {
        let svc = service(InMemoryDirectory::demo());
        let outcome = svc.run_cycle(&identity("1", Some("10"))).await;

        match outcome.tutor {
            TutorLookup::Found(profile) => assert_eq!(profile.display_name(), "Ana Lima"),
            other => panic!("expected tutor, got {:?}", other),
        }
        assert_eq!(outcome.reviews.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_tutor_id_skips_lookup() {
        let svc = service(InMemoryDirectory::demo());
        let outcome = svc.run_cycle(&identity("4", None)).await;

        assert_eq!(outcome.tutor, TutorLookup::Skipped);
        assert_eq!(outcome.reviews.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_tutor_becomes_failure() {
        let svc = service(InMemoryDirectory::demo());
        let outcome = svc.run_cycle(&identity("3", Some("99"))).await;

        match outcome.tutor {
            TutorLookup::Failed(failure) => {
                assert_eq!(failure.target, LookupTarget::Tutor);
                assert!(failure.reason.contains("99"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(outcome.reviews.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_review_failure_is_absorbed() {
        let svc = service(InMemoryDirectory::demo().failing_reviews(TutoringId::new("1")));
        let outcome = svc.run_cycle(&identity("1", Some("10"))).await;

        assert!(matches!(outcome.tutor, TutorLookup::Found(_)));
        let failure = outcome.reviews.unwrap_err();
        assert_eq!(failure.target, LookupTarget::Reviews);
    }

    #[tokio::test]
    async fn test_lookups_run_concurrently() {
        let svc = service(InMemoryDirectory::demo().with_delay(Duration::from_millis(200)));

        let started = Instant::now();
        let outcome = svc.run_cycle(&identity("1", Some("10"))).await;
        let elapsed = started.elapsed();

        assert!(matches!(outcome.tutor, TutorLookup::Found(_)));
        assert!(elapsed < Duration::from_millis(390), "took {:?}", elapsed);
    }
}
