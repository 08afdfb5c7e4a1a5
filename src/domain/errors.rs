//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User lookup error: {0}")]
    UserLookup(String),

    #[error("Tutoring lookup error: {0}")]
    TutoringLookup(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("UI error: {0}")]
    Ui(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Which enrichment lookup a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTarget {
    Tutor,
    Reviews,
}

impl fmt::Display for LookupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupTarget::Tutor => f.write_str("tutor"),
            LookupTarget::Reviews => f.write_str("reviews"),
        }
    }
}

/// Non-fatal failure of one enrichment lookup.
///
/// Retained in card state; never rendered beyond the neutral placeholders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{target} lookup failed: {reason}")]
pub struct LookupFailure {
    pub target: LookupTarget,
    pub reason: String,
}

impl LookupFailure {
    pub fn tutor(err: &DomainError) -> Self {
        Self {
            target: LookupTarget::Tutor,
            reason: err.to_string(),
        }
    }

    pub fn reviews(err: &DomainError) -> Self {
        Self {
            target: LookupTarget::Reviews,
            reason: err.to_string(),
        }
    }
}
