//! Gaana API Data Transfer Objects
//!
//! These types match what the search and detail endpoints return.
//! DO NOT use these types outside the gaana module - convert to domain types.

use serde::Deserialize;

/// Search and detail responses share this envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct TracksResponse {
    #[serde(default)]
    pub tracks: Vec<TrackItem>,
}

/// One track entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackItem {
    pub track_id: String,
    pub track_title: String,
    /// Album artwork; served at 175x175 unless a larger token is requested
    #[serde(default)]
    pub artwork_large: Option<String>,
    #[serde(default)]
    pub artist: Vec<ArtistItem>,
    #[serde(default)]
    pub stream_urls: Option<StreamUrls>,
}

/// Credited artist.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistItem {
    pub name: String,
}

/// Direct stream URLs per quality tier. Either tier can be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamUrls {
    #[serde(default)]
    pub high_quality: Option<String>,
    #[serde(default)]
    pub medium_quality: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "count": 1,
            "tracks": [{
                "track_id": "1143349",
                "track_title": "Symphony",
                "artwork_large": "https://a10.gaanacdn.com/images/song/49_175x175.jpg",
                "artist": [
                    {"name": "Clean Bandit", "seokey": "clean-bandit"},
                    {"name": "Zara Larsson", "seokey": "zara-larsson"}
                ],
                "stream_urls": {
                    "high_quality": "https://stream.gaanacdn.com/hls/49-hq.m3u8",
                    "medium_quality": "https://stream.gaanacdn.com/hls/49-mq.m3u8"
                }
            }]
        }"#;

        let response: TracksResponse = serde_json::from_str(json).expect("Should parse search");
        assert_eq!(response.tracks.len(), 1);

        let track = &response.tracks[0];
        assert_eq!(track.track_id, "1143349");
        assert_eq!(track.artist.len(), 2);
        assert!(
            track
                .stream_urls
                .as_ref()
                .unwrap()
                .high_quality
                .as_ref()
                .unwrap()
                .contains("hq")
        );
    }

    #[test]
    fn test_parse_track_without_streams_or_artists() {
        let json = r#"{"tracks": [{"track_id": "9", "track_title": "Sparse"}]}"#;
        let response: TracksResponse = serde_json::from_str(json).expect("Should parse");
        let track = &response.tracks[0];
        assert!(track.artist.is_empty());
        assert!(track.stream_urls.is_none());
    }

    #[test]
    fn test_parse_empty_result_set() {
        let json = r#"{"count": 0, "tracks": []}"#;
        let response: TracksResponse = serde_json::from_str(json).expect("Should parse");
        assert!(response.tracks.is_empty());
    }
}
