//! Application configuration. API endpoint, locale, display settings.

use crate::presentation::format::DEFAULT_UTC_OFFSET_MINUTES;
use crate::presentation::{DEFAULT_FALLBACK_IMAGE, Locale};
use serde::Deserialize;

/// Characters of description shown on a card before it is cut with "...".
pub const DEFAULT_DESCRIPTION_MAX_CHARS: usize = 120;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Root of the users/tutoring REST API. Read from TUTORING_CARD_API_BASE_URL.
    /// When unset, the in-memory directory serves the listing.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Bearer token for the API. Read from TUTORING_CARD_API_TOKEN.
    #[serde(default)]
    pub api_token: Option<String>,

    /// HTTP client timeout in seconds (default 10).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Card presentation
    // ─────────────────────────────────────────────────────────────────────────
    /// Placeholder language: "es" (default) or "en".
    #[serde(default)]
    pub locale: Option<Locale>,

    /// Minutes east of UTC used to render creation dates (default -300, Lima).
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,

    /// Image shown for tutorings without one.
    #[serde(default)]
    pub fallback_image_url: Option<String>,

    /// Description clamp for the terminal renderer.
    #[serde(default)]
    pub description_max_chars: Option<usize>,

    // ─────────────────────────────────────────────────────────────────────────
    // In-memory directory
    // ─────────────────────────────────────────────────────────────────────────
    /// JSON seed file for the in-memory directory (tutorings, users, reviews).
    #[serde(default)]
    pub seed_path: Option<String>,

    /// Simulated lookup latency in ms for the in-memory directory (default 150).
    #[serde(default)]
    pub mock_delay_ms: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("TUTORING_CARD"));
        if let Ok(path) = std::env::var("TUTORING_CARD_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the API base URL if configured and non-blank.
    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn request_timeout_secs_or_default(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(10)
    }

    pub fn locale_or_default(&self) -> Locale {
        self.locale.unwrap_or_default()
    }

    pub fn utc_offset_minutes_or_default(&self) -> i32 {
        self.utc_offset_minutes
            .unwrap_or(DEFAULT_UTC_OFFSET_MINUTES)
    }

    pub fn fallback_image_url_or_default(&self) -> String {
        self.fallback_image_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FALLBACK_IMAGE.to_string())
    }

    pub fn description_max_chars_or_default(&self) -> usize {
        self.description_max_chars
            .unwrap_or(DEFAULT_DESCRIPTION_MAX_CHARS)
    }

    pub fn mock_delay_ms_or_default(&self) -> u64 {
        self.mock_delay_ms.unwrap_or(150)
    }
}
