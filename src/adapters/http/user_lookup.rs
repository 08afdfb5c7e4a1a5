//! Implements UserLookupPort: `GET {base}/users/{id}`.

use crate::adapters::http::client::{ApiClient, ApiError};
use crate::domain::{DomainError, TutorProfile, UserId};
use crate::ports::UserLookupPort;

pub struct HttpUserLookup {
    api: ApiClient,
}

impl HttpUserLookup {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn profile_path(tutor_id: &UserId) -> String {
        format!("users/{}", tutor_id)
    }
}

#[async_trait::async_trait]
impl UserLookupPort for HttpUserLookup {
    async fn get_tutor_profile(&self, tutor_id: &UserId) -> Result<TutorProfile, DomainError> {
        self.api
            .get_json(&Self::profile_path(tutor_id))
            .await
            .map_err(|e| to_domain(tutor_id, e))
    }
}

fn to_domain(tutor_id: &UserId, err: ApiError) -> DomainError {
    match err {
        ApiError::NotFound(_) => DomainError::NotFound(format!("user {}", tutor_id)),
        other => DomainError::UserLookup(other.to_string()),
    }
}
