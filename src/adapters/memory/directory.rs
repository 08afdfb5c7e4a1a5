//! In-memory directory of tutorings, users and reviews.
//!
//! Serves the demo listing when no API is configured and stands in for the
//! HTTP adapters in tests. Simulates network latency with a configurable delay.

use crate::domain::{DomainError, Review, TutorProfile, TutoringId, TutoringSummary, UserId};
use crate::ports::{ReviewLookupPort, TutoringCatalogPort, UserLookupPort};
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::debug;

/// Seed file layout: `{ "tutorings": [...], "users": [...], "reviews": [...] }`.
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub tutorings: Vec<TutoringSummary>,
    #[serde(default)]
    pub users: Vec<TutorProfile>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    tutorings: Vec<TutoringSummary>,
    users: HashMap<UserId, TutorProfile>,
    reviews: HashMap<TutoringId, Vec<Review>>,
    failing_users: HashSet<UserId>,
    failing_reviews: HashSet<TutoringId>,
    delay: Duration,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedData) -> Self {
        let mut dir = Self::new();
        for t in seed.tutorings {
            dir = dir.with_tutoring(t);
        }
        for u in seed.users {
            dir = dir.with_user(u);
        }
        for r in seed.reviews {
            dir = dir.with_review(r);
        }
        dir
    }

    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let seed: SeedData = serde_json::from_str(json)
            .map_err(|e| DomainError::Config(format!("invalid seed data: {}", e)))?;
        Ok(Self::from_seed(seed))
    }

    pub fn with_tutoring(mut self, tutoring: TutoringSummary) -> Self {
        self.tutorings.push(tutoring);
        self
    }

    pub fn with_user(mut self, user: TutorProfile) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    pub fn with_review(mut self, review: Review) -> Self {
        self.reviews
            .entry(review.tutoring_id.clone())
            .or_default()
            .push(review);
        self
    }

    /// Simulated latency applied to every lookup.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make user lookups for `user_id` fail with a transport error.
    pub fn failing_user(mut self, user_id: UserId) -> Self {
        self.failing_users.insert(user_id);
        self
    }

    /// Make review lookups for `tutoring_id` fail with a transport error.
    pub fn failing_reviews(mut self, tutoring_id: TutoringId) -> Self {
        self.failing_reviews.insert(tutoring_id);
        self
    }

    /// Built-in listing used when neither an API nor a seed file is configured.
    pub fn demo() -> Self {
        let summary = |id: &str, title: &str, description: &str, price: f64, tutor: Option<&str>, day: u32| {
            TutoringSummary {
                id: TutoringId::new(id),
                title: title.to_string(),
                description: description.to_string(),
                price,
                image_url: None,
                created_at: Utc.with_ymd_and_hms(2024, 3, day, 15, 30, 0).single(),
                tutor_id: tutor.map(UserId::new),
            }
        };
        let user = |id: &str, first: &str, last: &str| TutorProfile {
            id: UserId::new(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
        };
        let review = |tutoring: &str, rating: f64| Review {
            tutoring_id: TutoringId::new(tutoring),
            rating,
            comment: None,
        };

        Self::new()
            .with_tutoring(summary(
                "1",
                "Álgebra para preuniversitarios",
                "Ecuaciones, inecuaciones y funciones con ejercicios tipo examen de admisión.",
                49.9,
                Some("10"),
                4,
            ))
            .with_tutoring(summary(
                "2",
                "Física I: cinemática y dinámica",
                "Movimiento rectilíneo, leyes de Newton y trabajo-energía, paso a paso.",
                60.0,
                Some("11"),
                11,
            ))
            .with_tutoring(TutoringSummary {
                image_url: Some("https://images.example.com/python.png".to_string()),
                created_at: None,
                ..summary(
                    "3",
                    "Programación en Python desde cero",
                    "Variables, estructuras de control, funciones y un proyecto final.",
                    75.5,
                    Some("99"),
                    1,
                )
            })
            .with_tutoring(summary(
                "4",
                "Redacción académica",
                "Estructura de ensayos, citas en APA y revisión de borradores.",
                35.0,
                None,
                20,
            ))
            .with_user(user("10", "Ana", "Lima"))
            .with_user(user("11", "Jorge", "Quispe"))
            .with_review(review("1", 4.0))
            .with_review(review("1", 5.0))
            .with_review(review("2", 5.0))
            .with_review(review("2", 4.0))
            .with_review(review("2", 4.0))
            .with_review(review("4", 3.0))
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait::async_trait]
impl UserLookupPort for InMemoryDirectory {
    async fn get_tutor_profile(&self, tutor_id: &UserId) -> Result<TutorProfile, DomainError> {
        self.simulate_latency().await;
        if self.failing_users.contains(tutor_id) {
            return Err(DomainError::UserLookup(format!(
                "simulated transport failure for user {}",
                tutor_id
            )));
        }
        self.users
            .get(tutor_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("user {}", tutor_id)))
    }
}

#[async_trait::async_trait]
impl ReviewLookupPort for InMemoryDirectory {
    async fn get_reviews(&self, tutoring_id: &TutoringId) -> Result<Vec<Review>, DomainError> {
        self.simulate_latency().await;
        if self.failing_reviews.contains(tutoring_id) {
            return Err(DomainError::TutoringLookup(format!(
                "simulated transport failure for tutoring {}",
                tutoring_id
            )));
        }
        let reviews = self.reviews.get(tutoring_id).cloned().unwrap_or_default();
        debug!(tutoring_id = %tutoring_id, count = reviews.len(), "reviews served from memory");
        Ok(reviews)
    }
}

#[async_trait::async_trait]
impl TutoringCatalogPort for InMemoryDirectory {
    async fn list_tutorings(&self) -> Result<Vec<TutoringSummary>, DomainError> {
        self.simulate_latency().await;
        Ok(self.tutorings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_directory() {
        let dir = InMemoryDirectory::demo();

        let listing = dir.list_tutorings().await.unwrap();
        assert_eq!(listing.len(), 4);

        let ana = dir.get_tutor_profile(&UserId::new("10")).await.unwrap();
        assert_eq!(ana.display_name(), "Ana Lima");

        let reviews = dir.get_reviews(&TutoringId::new("2")).await.unwrap();
        assert_eq!(reviews.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let dir = InMemoryDirectory::demo();
        let err = dir.get_tutor_profile(&UserId::new("99")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unknown_tutoring_has_no_reviews() {
        let dir = InMemoryDirectory::demo();
        let reviews = dir.get_reviews(&TutoringId::new("404")).await.unwrap();
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let dir = InMemoryDirectory::demo()
            .failing_user(UserId::new("10"))
            .failing_reviews(TutoringId::new("1"));

        assert!(matches!(
            dir.get_tutor_profile(&UserId::new("10")).await,
            Err(DomainError::UserLookup(_))
        ));
        assert!(matches!(
            dir.get_reviews(&TutoringId::new("1")).await,
            Err(DomainError::TutoringLookup(_))
        ));
    }

    #[tokio::test]
    async fn test_from_json_seed() {
        let json = r#"{
            "tutorings": [{"id": 5, "title": "Química", "price": 40, "tutorId": 8}],
            "users": [{"id": 8, "firstName": "Rosa", "lastName": "Huamán"}],
            "reviews": [{"tutoringId": 5, "rating": 5}, {"tutoringId": "5", "rating": 4}]
        }"#;
        let dir = InMemoryDirectory::from_json(json).unwrap();

        assert_eq!(dir.list_tutorings().await.unwrap()[0].id, TutoringId::new("5"));
        assert_eq!(dir.get_reviews(&TutoringId::new("5")).await.unwrap().len(), 2);
        assert_eq!(
            dir.get_tutor_profile(&UserId::new("8")).await.unwrap().first_name,
            "Rosa"
        );
    }

    #[test]
    fn test_invalid_seed_is_config_error() {
        let err = InMemoryDirectory::from_json("not json").unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }
}
