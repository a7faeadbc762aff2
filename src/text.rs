//! Shared text cleanup applied by every provider adapter.
//!
//! Catalog responses disagree wildly about encoding: HTML entities in titles,
//! combining diacritics from one source and precomposed characters from
//! another, stray whitespace. Everything the scorer compares goes through
//! [`normalize`] first so the fuzzy matching operates on comparable text
//! regardless of which catalog a candidate came from.

use serde_json::Value;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Entities that actually show up in catalog payloads.
const ENTITIES: &[(&str, &str)] = &[
    ("&quot;", "\""),
    ("&#039;", "'"),
    ("&apos;", "'"),
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    // Must come last so it doesn't unescape the prefix of other entities
    ("&amp;", "&"),
];

/// Decode the small set of HTML entities catalogs embed in string fields.
pub fn decode_entities(s: &str) -> String {
    let mut out = s.to_string();
    for (entity, replacement) in ENTITIES {
        if out.contains(entity) {
            out = out.replace(entity, replacement);
        }
    }
    out
}

/// Full normalization for fields the scorer compares (titles, artist names):
/// entity decode, diacritic strip (NFKD then drop combining marks), case
/// fold, whitespace collapse.
pub fn normalize(s: &str) -> String {
    let decoded = decode_entities(s);
    let stripped: String = decoded.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    stripped
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Entity cleanup for retained provider metadata, applied recursively.
///
/// URLs and IDs live in here, so no case folding - only entity decoding.
/// Nested result sets (an album object carrying its track listing) get the
/// same treatment through the recursion.
pub fn clean_value(value: &mut Value) {
    match value {
        Value::String(s) => {
            if s.contains('&') {
                *s = decode_entities(s);
            }
        }
        Value::Array(items) => {
            for item in items {
                clean_value(item);
            }
        }
        Value::Object(map) => {
            for (_, v) in map.iter_mut() {
                clean_value(v);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("Don&#039;t Stop"), "Don't Stop");
        assert_eq!(decode_entities("Rock &amp; Roll"), "Rock & Roll");
        assert_eq!(decode_entities("plain"), "plain");
    }

    #[test]
    fn test_amp_decoded_after_other_entities() {
        // "&amp;quot;" is an escaped "&quot;", not a quote
        assert_eq!(decode_entities("&amp;quot;"), "&quot;");
    }

    #[test]
    fn test_normalize_folds_case_and_diacritics() {
        assert_eq!(normalize("Beyonc\u{00e9}"), "beyonce");
        assert_eq!(normalize("SEN\u{0303}ORITA"), "senorita");
        assert_eq!(normalize("  Shape   of You "), "shape of you");
    }

    #[test]
    fn test_normalize_decodes_entities_first() {
        assert_eq!(normalize("Don&#039;t Start Now"), "don't start now");
    }

    #[test]
    fn test_clean_value_recurses_into_nested_collections() {
        let mut value = json!({
            "title": "Rock &amp; Roll",
            "songs": [
                {"title": "Don&#039;t"},
                {"title": "Can&#039;t"}
            ],
            "year": 1999
        });

        clean_value(&mut value);

        assert_eq!(value["title"], "Rock & Roll");
        assert_eq!(value["songs"][0]["title"], "Don't");
        assert_eq!(value["songs"][1]["title"], "Can't");
        assert_eq!(value["year"], 1999);
    }
}
