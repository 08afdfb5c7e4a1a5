//! Price, date, rating and star formatting.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Number of stars in the rating indicator.
pub const MAX_STARS: u8 = 5;

/// `DD/MM/YYYY, HH:MM`, 24-hour.
const DATE_FORMAT: &str = "%d/%m/%Y, %H:%M";

/// Lima, UTC-5.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = -300;

/// Fixed offset from minutes east of UTC. Out-of-range values fall back to UTC.
pub fn fixed_offset(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

/// Price with exactly two fractional digits behind the currency prefix.
pub fn format_price(prefix: &str, price: f64) -> String {
    format!("{}{:.2}", prefix, price)
}

/// Average with one fractional digit; an exact zero renders as "0.0".
pub fn format_rating(average: f64) -> String {
    format!("{:.1}", average)
}

/// Star count: average rounded to the nearest integer, clamped to `0..=MAX_STARS`.
pub fn star_count(average: f64) -> u8 {
    if !average.is_finite() {
        return 0;
    }
    average.round().clamp(0.0, f64::from(MAX_STARS)) as u8
}

pub fn star_indicator(stars: u8) -> String {
    let filled = stars.min(MAX_STARS) as usize;
    let empty = MAX_STARS as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

pub fn format_date(created_at: &DateTime<Utc>, offset: &FixedOffset) -> String {
    created_at
        .with_timezone(offset)
        .format(DATE_FORMAT)
        .to_string()
}
