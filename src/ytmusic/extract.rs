//! Fixed-delimiter mining of watch and converter pages.
//!
//! Neither page has a JSON endpoint, so values are cut out of inline script
//! text between known delimiter pairs. Every miner fails explicitly with
//! [`ProviderError::Extract`] - markup drift upstream must break here, not
//! somewhere downstream as a confusing parse error.

use crate::domain::ProviderError;

/// The substring between `start` and `end`, after the first `start`.
fn between<'a>(page: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let after = page.split(start).nth(1)?;
    let value = after.split(end).next()?;
    (!value.is_empty()).then_some(value)
}

/// Inline script text is JSON-escaped; undo the sequences that occur in
/// titles and URLs.
fn unescape(s: &str) -> String {
    s.replace("\\u0026", "&")
        .replace("\\/", "/")
        .replace("\\\"", "\"")
}

/// Track title from a watch page.
pub(crate) fn video_title(page: &str) -> Result<String, ProviderError> {
    between(page, "\"title\":\"", "\"")
        .map(unescape)
        .ok_or(ProviderError::Extract("video title"))
}

/// Channel/artist name from a watch page.
pub(crate) fn video_author(page: &str) -> Result<String, ProviderError> {
    between(page, "\"author\":\"", "\"")
        .map(unescape)
        .ok_or(ProviderError::Extract("video author"))
}

/// Direct download link for one bitrate tier from a converter page.
///
/// Returns `None` when the tier is simply not offered; that's a candidate
/// without a usable reference, not markup drift.
pub(crate) fn mp3_link(page: &str, tier_key: &str) -> Option<String> {
    let start = format!("\"{tier_key}\":\"");
    between(page, &start, "\"").map(unescape)
}
