//! Aggregated rating: one-decimal average plus review count.

use crate::domain::Review;

/// Average of review ratings, rounded to one decimal, and the number of reviews.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregatedRating {
    pub average_rating: f64,
    pub review_count: usize,
}

impl AggregatedRating {
    /// Fold a review collection. Empty input yields `{ 0.0, 0 }`.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self::default();
        }
        let total: f64 = reviews.iter().map(|r| r.rating).sum();
        Self {
            average_rating: round1(total / reviews.len() as f64),
            review_count: reviews.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.review_count == 0
    }
}

/// Round to one fractional digit, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
