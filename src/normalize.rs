//! Normalization rules shared by every source adapter: canonical timestamps,
//! markup stripping and summary clipping.

use chrono::{DateTime, NaiveDateTime, Utc};
use scraper::Html;

use crate::types::{ELLIPSIS, SUMMARY_LIMIT};

/// The canonical `published` format, also the sort key format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn canonical_timestamp(dt: DateTime<Utc>) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Current wall-clock time in canonical format, the substitute for any source
/// record with a missing or unparseable date.
pub fn now_timestamp() -> String {
    canonical_timestamp(Utc::now())
}

/// Parse a canonical timestamp back into a comparable instant. Any
/// fractional-second suffix is ignored, matching the sort key derivation.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let head = raw.split('.').next().unwrap_or(raw);
    NaiveDateTime::parse_from_str(head, TIMESTAMP_FORMAT).ok()
}

/// Strip any markup from a summary/description field, yielding plain text.
pub fn strip_html(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let fragment = Html::parse_fragment(raw);
    fragment.root_element().text().collect::<String>()
}

/// Clip a sanitized summary to at most `SUMMARY_LIMIT` characters plus the
/// ellipsis marker; shorter text passes through verbatim.
pub fn clip_summary(text: &str) -> String {
    if text.chars().count() <= SUMMARY_LIMIT {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(SUMMARY_LIMIT).collect();
    clipped.push_str(ELLIPSIS);
    clipped
}
