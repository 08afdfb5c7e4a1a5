//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/IO types here; adapters deserialize straight into these.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identity of a tutoring offering.
///
/// The data-access layer sends ids either as JSON strings or numbers; both
/// forms collapse into the same string identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TutoringId(String);

/// Identity of a user (tutor).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

macro_rules! string_identity {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into_string()))
            }
        }
    };
}

string_identity!(TutoringId);
string_identity!(UserId);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// One bookable tutoring offering, as listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutoringSummary {
    pub id: TutoringId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Unparseable timestamps read as `None`; the card shows its placeholder.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tutor_id: Option<UserId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Millis(i64),
    Other(serde::de::IgnoredAny),
}

/// RFC 3339, offset-less date-times (read as UTC), bare dates, or epoch millis.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawTimestamp::Text(text)) => parse_timestamp(&text),
        Some(RawTimestamp::Millis(ms)) => DateTime::from_timestamp_millis(ms),
        Some(RawTimestamp::Other(_)) | None => None,
    })
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl TutoringSummary {
    /// Trigger key of the aggregation workflow.
    pub fn identity(&self) -> CardIdentity {
        CardIdentity {
            tutoring_id: self.id.clone(),
            tutor_id: self.tutor_id.clone(),
        }
    }
}

/// Tutor profile returned by the user lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
}

impl TutorProfile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A single review of a tutoring offering. Rating on a 1–5 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub tutoring_id: TutoringId,
    pub rating: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Identity observed by the card. A change in either field starts a new cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardIdentity {
    pub tutoring_id: TutoringId,
    pub tutor_id: Option<UserId>,
}
