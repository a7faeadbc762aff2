//! Adapter layer: Convert raw Saavn song objects to domain candidates.
//!
//! This is the ONLY place Saavn payload fields are interpreted. Every string
//! the scorer will see is normalized here, the whole payload (entity-cleaned,
//! nested collections included) is retained for the URL resolver, and artwork
//! URLs are rewritten to the best resolution variant the CDN serves.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use super::PROVIDER;
use crate::domain::CandidateTrack;
use crate::text;

/// Artwork tokens the catalog serves by default → the best variant it will
/// actually serve when asked.
const ARTWORK_UPSCALES: &[(&str, &str)] = &[("150x150", "500x500"), ("50x50", "500x500")];

/// Payload keys that carry comma-separated artist names. The catalog splits
/// credited artists across these; the scorer needs their union.
const ARTIST_KEYS: &[&str] = &["singers", "primary_artists"];

/// Convert one raw song object into a candidate.
///
/// Returns `None` for objects missing an ID or title - individual malformed
/// items are skipped, they don't fail the whole result set.
pub fn to_candidate(mut song: Map<String, Value>) -> Option<CandidateTrack> {
    for (_, value) in song.iter_mut() {
        text::clean_value(value);
    }

    let provider_id = song.get("id")?.as_str()?.to_string();
    // Search items carry "title", detail responses carry "song"
    let title_field = song.get("title").or_else(|| song.get("song"))?.as_str()?;
    let title = text::normalize(title_field);

    let mut artist_names = BTreeSet::new();
    collect_artists(&song, &mut artist_names);
    if let Some(Value::Object(more_info)) = song.get("more_info") {
        collect_artists(more_info, &mut artist_names);
    }

    if let Some(Value::String(image)) = song.get_mut("image") {
        for (from, to) in ARTWORK_UPSCALES {
            if image.contains(from) {
                *image = image.replace(from, to);
            }
        }
    }

    let lyrics_available = flag(&song, "has_lyrics");

    Some(CandidateTrack {
        provider: PROVIDER,
        provider_id,
        title,
        artist_names,
        raw: song,
        lyrics_available,
    })
}

/// Union comma-separated artist fields into the candidate's artist set.
fn collect_artists(fields: &Map<String, Value>, into: &mut BTreeSet<String>) {
    for key in ARTIST_KEYS {
        if let Some(Value::String(joined)) = fields.get(*key) {
            for artist in joined.split(',') {
                let normalized = text::normalize(artist);
                if !normalized.is_empty() {
                    into.insert(normalized);
                }
            }
        }
    }
}

/// Flags arrive as JSON booleans or the strings "true"/"false".
fn flag(fields: &Map<String, Value>, key: &str) -> bool {
    match fields.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}
