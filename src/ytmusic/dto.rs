//! YouTube-like search Data Transfer Objects
//!
//! The search endpoint wraps its payload in an envelope whose `contents`
//! field is a JSON-encoded STRING, not an object - it must be parsed twice.
//! Both shapes are typed here; the client performs the second pass.

use serde::Deserialize;

/// First parse pass: the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEnvelope {
    /// JSON-encoded [`SearchPayload`], absent on empty result sets
    #[serde(default)]
    pub contents: Option<String>,
}

/// Second parse pass: the actual result payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

/// One search result.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoItem {
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub title: String,
    /// Credited artists as text runs
    #[serde(default)]
    pub artists: Vec<Run>,
}

/// A text run.
#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    pub text: String,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_envelope_then_payload() {
        // The inner payload is a string - note the escaping
        let json = r#"{
            "responseContext": {"visitorData": "xyz"},
            "contents": "{\"items\":[{\"videoId\":\"JGwWNGJdvx8\",\"title\":\"Shape of You\",\"artists\":[{\"text\":\"Ed Sheeran\"}]}]}"
        }"#;

        let envelope: SearchEnvelope = serde_json::from_str(json).expect("Should parse envelope");
        let contents = envelope.contents.expect("contents present");

        let payload: SearchPayload =
            serde_json::from_str(&contents).expect("Should parse inner payload");
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].video_id, "JGwWNGJdvx8");
        assert_eq!(payload.items[0].artists[0].text, "Ed Sheeran");
    }

    #[test]
    fn test_parse_envelope_without_contents() {
        let json = r#"{"responseContext": {}}"#;
        let envelope: SearchEnvelope = serde_json::from_str(json).expect("Should parse");
        assert!(envelope.contents.is_none());
    }

    #[test]
    fn test_parse_item_without_artists() {
        let json = r#"{"items":[{"videoId":"a1b2","title":"Untitled"}]}"#;
        let payload: SearchPayload = serde_json::from_str(json).expect("Should parse");
        assert!(payload.items[0].artists.is_empty());
    }
}
