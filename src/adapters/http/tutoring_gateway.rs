//! Implements ReviewLookupPort and TutoringCatalogPort over the tutoring endpoints.
//!
//! - `GET {base}/tutoring` → listing
//! - `GET {base}/tutoring/{id}/reviews` → reviews of one offering

use crate::adapters::http::client::{ApiClient, ApiError};
use crate::domain::{DomainError, Review, TutoringId, TutoringSummary};
use crate::ports::{ReviewLookupPort, TutoringCatalogPort};

const TUTORING_PATH: &str = "tutoring";

pub struct HttpTutoringGateway {
    api: ApiClient,
}

impl HttpTutoringGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn reviews_path(tutoring_id: &TutoringId) -> String {
        format!("{}/{}/reviews", TUTORING_PATH, tutoring_id)
    }
}

fn to_domain(err: ApiError) -> DomainError {
    match err {
        ApiError::NotFound(path) => DomainError::NotFound(path),
        other => DomainError::TutoringLookup(other.to_string()),
    }
}

#[async_trait::async_trait]
impl ReviewLookupPort for HttpTutoringGateway {
    async fn get_reviews(&self, tutoring_id: &TutoringId) -> Result<Vec<Review>, DomainError> {
        // Some backends answer `null` for offerings without reviews.
        let reviews: Option<Vec<Review>> = self
            .api
            .get_json(&Self::reviews_path(tutoring_id))
            .await
            .map_err(to_domain)?;
        Ok(reviews.unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl TutoringCatalogPort for HttpTutoringGateway {
    async fn list_tutorings(&self) -> Result<Vec<TutoringSummary>, DomainError> {
        self.api.get_json(TUTORING_PATH).await.map_err(to_domain)
    }
}
