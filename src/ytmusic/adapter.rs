//! Adapter layer: Convert search items and mined watch-page fields to
//! domain candidates.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use super::PROVIDER;
use super::dto;
use crate::domain::CandidateTrack;
use crate::text;

/// Convert one search result into a candidate.
pub fn to_candidate(item: dto::VideoItem) -> CandidateTrack {
    let artist_names: BTreeSet<String> = item
        .artists
        .iter()
        .map(|run| text::normalize(&run.text))
        .filter(|name| !name.is_empty())
        .collect();

    let mut raw = Map::new();
    raw.insert("videoId".to_string(), Value::String(item.video_id.clone()));

    CandidateTrack {
        provider: PROVIDER,
        provider_id: item.video_id,
        title: text::normalize(&item.title),
        artist_names,
        raw,
        lyrics_available: false,
    }
}

/// Build a candidate from fields mined off the watch page.
///
/// The page credits one author; uploader channels sometimes join several
/// artists with separators, so the field is split the same way comma-joined
/// artist fields are elsewhere.
pub fn from_watch_page(video_id: &str, title: &str, author: &str) -> CandidateTrack {
    let artist_names: BTreeSet<String> = author
        .split([',', '&'])
        .map(text::normalize)
        .filter(|name| !name.is_empty())
        .collect();

    let mut raw = Map::new();
    raw.insert("videoId".to_string(), Value::String(video_id.to_string()));

    CandidateTrack {
        provider: PROVIDER,
        provider_id: video_id.to_string(),
        title: text::normalize(title),
        artist_names,
        raw,
        lyrics_available: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_item_conversion() {
        let item = dto::VideoItem {
            video_id: "JGwWNGJdvx8".to_string(),
            title: "Shape of You (Official Video)".to_string(),
            artists: vec![dto::Run {
                text: "Ed Sheeran".to_string(),
            }],
        };

        let candidate = to_candidate(item);

        assert_eq!(candidate.provider, "ytmusic");
        assert_eq!(candidate.provider_id, "JGwWNGJdvx8");
        assert_eq!(candidate.title, "shape of you (official video)");
        assert!(candidate.artist_names.contains("ed sheeran"));
        assert_eq!(candidate.raw["videoId"], "JGwWNGJdvx8");
    }

    #[test]
    fn test_watch_page_author_split_into_artists() {
        let candidate = from_watch_page("a1b2", "Symphony", "Clean Bandit & Zara Larsson");

        assert!(candidate.artist_names.contains("clean bandit"));
        assert!(candidate.artist_names.contains("zara larsson"));
        assert_eq!(candidate.artist_names.len(), 2);
    }
}
