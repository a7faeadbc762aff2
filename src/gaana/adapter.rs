//! Adapter layer: Convert Gaana DTOs to domain candidates.
//!
//! Stream URLs are carried into the candidate's retained metadata so media
//! resolution later needs no second network call for this catalog.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use super::PROVIDER;
use super::dto;
use crate::domain::{BitrateLabel, CandidateTrack, ProviderError, ResolvedMedia};
use crate::text;

/// Default artwork token → the largest variant the CDN serves.
const ARTWORK_UPSCALE: (&str, &str) = ("175x175", "480x480");

/// Retained-metadata keys for the two stream tiers.
const HIGH_STREAM_KEY: &str = "stream_url_high";
const MEDIUM_STREAM_KEY: &str = "stream_url_medium";

/// Convert one track DTO into a candidate.
pub fn to_candidate(track: dto::TrackItem) -> CandidateTrack {
    let title = text::normalize(&track.track_title);

    let artist_names: BTreeSet<String> = track
        .artist
        .iter()
        .map(|artist| text::normalize(&artist.name))
        .filter(|name| !name.is_empty())
        .collect();

    let mut raw = Map::new();
    if let Some(artwork) = track.artwork_large {
        let (from, to) = ARTWORK_UPSCALE;
        raw.insert("artwork".to_string(), Value::String(artwork.replace(from, to)));
    }
    if let Some(streams) = track.stream_urls {
        if let Some(high) = streams.high_quality {
            raw.insert(HIGH_STREAM_KEY.to_string(), Value::String(high));
        }
        if let Some(medium) = streams.medium_quality {
            raw.insert(MEDIUM_STREAM_KEY.to_string(), Value::String(medium));
        }
    }

    CandidateTrack {
        provider: PROVIDER,
        provider_id: track.track_id,
        title,
        artist_names,
        raw,
        lyrics_available: false,
    }
}

/// Pick a stream tier from the retained metadata.
pub fn pick_stream(
    candidate: &CandidateTrack,
    prefer_high_bitrate: bool,
) -> Result<ResolvedMedia, ProviderError> {
    let high = candidate.raw_str(HIGH_STREAM_KEY);
    let medium = candidate.raw_str(MEDIUM_STREAM_KEY);

    let (url, bitrate) = if prefer_high_bitrate {
        match (high, medium) {
            (Some(url), _) => (url, BitrateLabel::High),
            (None, Some(url)) => (url, BitrateLabel::Low),
            (None, None) => return Err(ProviderError::NoMediaUrl),
        }
    } else {
        match (medium, high) {
            (Some(url), _) => (url, BitrateLabel::Low),
            (None, Some(url)) => (url, BitrateLabel::High),
            (None, None) => return Err(ProviderError::NoMediaUrl),
        }
    };

    Ok(ResolvedMedia {
        url: url.to_string(),
        bitrate,
        lyrics: None,
    })
}
