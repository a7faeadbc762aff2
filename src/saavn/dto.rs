//! Saavn API response envelopes.
//!
//! Only the envelopes are typed. Song payloads are kept as raw JSON maps:
//! their field set differs between the autocomplete and detail endpoints
//! (and has drifted over time), and the URL resolver needs the fields
//! verbatim anyway. The adapter is the only place that interprets them.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Autocomplete search response. Albums/playlists/artists sections exist in
/// the payload too; only the songs section matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub songs: Option<SongsBlock>,
}

/// The songs section of a search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SongsBlock {
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
}

/// Lyrics endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct LyricsResponse {
    #[serde(default)]
    pub lyrics: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our envelopes match what the real API returns.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "albums": {"data": []},
            "songs": {
                "data": [
                    {
                        "id": "5WXAlMNt",
                        "title": "Shape of You",
                        "image": "https://c.saavncdn.com/679/x-150x150.jpg",
                        "type": "song",
                        "more_info": {
                            "singers": "Ed Sheeran",
                            "primary_artists": "Ed Sheeran"
                        }
                    }
                ]
            }
        }"#;

        let response: SearchResponse = serde_json::from_str(json).expect("Should parse search");
        let songs = response.songs.expect("songs block present");
        assert_eq!(songs.data.len(), 1);
        assert_eq!(songs.data[0]["id"], "5WXAlMNt");
    }

    #[test]
    fn test_parse_search_response_without_songs_block() {
        // Garbage queries come back with the songs section missing entirely
        let json = r#"{"albums": {"data": []}}"#;
        let response: SearchResponse = serde_json::from_str(json).expect("Should parse");
        assert!(response.songs.is_none());
    }

    #[test]
    fn test_parse_lyrics_response() {
        let json = r#"{"lyrics": "The club isn't the best place...", "lyrics_copyright": "x"}"#;
        let response: LyricsResponse = serde_json::from_str(json).expect("Should parse lyrics");
        assert!(response.lyrics.unwrap().starts_with("The club"));
    }

    #[test]
    fn test_parse_lyrics_response_without_lyrics() {
        let json = r#"{"status": "failure"}"#;
        let response: LyricsResponse = serde_json::from_str(json).expect("Should parse");
        assert!(response.lyrics.is_none());
    }
}
