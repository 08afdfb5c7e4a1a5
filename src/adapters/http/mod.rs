//! HTTP collaborators. Users and tutoring records over a JSON REST API.

pub mod client;
pub mod tutoring_gateway;
pub mod user_lookup;

pub use client::ApiClient;
pub use tutoring_gateway::HttpTutoringGateway;
pub use user_lookup::HttpUserLookup;
