//! Internal domain models for track resolution.
//!
//! These types are OUR types - they don't change when a catalog API changes.
//! Every provider response gets converted into them via that provider's
//! adapter before anything downstream (scoring, URL resolution) sees it.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// A logical track identity, typically sourced from the reference catalog.
///
/// Immutable input to a resolution request.
#[derive(Debug, Clone)]
pub struct TrackReference {
    /// Track name as the reference catalog spells it
    pub name: String,
    /// Artist names, in the reference catalog's order
    pub artists: Vec<String>,
}

impl TrackReference {
    pub fn new(
        name: impl Into<String>,
        artists: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            artists: artists.into_iter().map(Into::into).collect(),
        }
    }
}

/// One search-result item from a catalog, normalized to a common shape.
///
/// Owned by the resolution request that produced it and discarded when the
/// request completes.
#[derive(Debug, Clone)]
pub struct CandidateTrack {
    /// Which catalog produced this candidate
    pub provider: &'static str,
    /// Provider-native track ID (opaque to everything but that provider)
    pub provider_id: String,
    /// Normalized title
    pub title: String,
    /// Union of every artist-bearing field the provider exposes, normalized
    pub artist_names: BTreeSet<String>,
    /// Provider-specific fields retained for later URL resolution
    pub raw: Map<String, Value>,
    /// Whether the provider reports lyrics for this track
    pub lyrics_available: bool,
}

impl CandidateTrack {
    /// Joined artist names - the string reference artists are matched against.
    pub fn artist_line(&self) -> String {
        self.artist_names
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(" , ")
    }

    /// String field from the retained provider metadata.
    pub(crate) fn raw_str(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }

    /// Boolean field from the retained provider metadata.
    ///
    /// Some catalogs encode flags as JSON booleans, others as the strings
    /// "true"/"false". Both forms are accepted.
    pub(crate) fn raw_flag(&self, key: &str) -> bool {
        match self.raw.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// A candidate paired with its match score against the reference.
///
/// Score is in [0, 100] and is a pure function of (reference, candidate).
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: CandidateTrack,
    pub score: f32,
}

/// Coarse audio-quality tier of a resolved URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitrateLabel {
    Low,
    High,
}

/// Terminal artifact of a resolution: a directly playable media reference.
#[derive(Debug, Clone)]
pub struct ResolvedMedia {
    pub url: String,
    pub bitrate: BitrateLabel,
    pub lyrics: Option<String>,
}

/// Per-provider failures.
///
/// All of these are caught at the orchestrator boundary and downgraded to
/// "this provider contributed nothing to this request". None of them abort
/// a resolution on their own.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Credential exchange failed - fatal to this provider's calls for the
    /// current request, recoverable on the next one
    #[error("credential exchange failed: {0}")]
    Auth(String),

    /// Transport failure or unexpected response shape
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// The provider call did not complete within its timeout
    #[error("catalog request timed out")]
    Timeout,

    #[error("failed to parse catalog response: {0}")]
    Parse(String),

    /// Fixed-delimiter mining of a provider page found no match - the
    /// upstream markup has drifted
    #[error("could not extract {0} from provider page")]
    Extract(&'static str),

    /// The candidate's retained metadata holds no usable media reference
    #[error("candidate has no usable media reference")]
    NoMediaUrl,
}

/// Terminal failures of a whole resolution request.
///
/// The only errors that escape [`crate::Resolver::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Every configured provider failed before contributing candidates
    #[error("no catalog could be reached for this request")]
    NoProvidersAvailable,

    /// Candidates existed but none passed scoring and yielded a playable URL
    #[error("no candidate yielded a playable match")]
    NoPlayableMatch,
}
