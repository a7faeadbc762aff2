//! Fuzzy matching between a reference track and catalog candidates.
//!
//! Shared by every provider as free functions - no provider carries its own
//! scoring variant. The score is a pure function of (reference, candidate):
//! same inputs always produce the same output, independent of artist list
//! ordering.
//!
//! Scoring recipe:
//! 1. Gate: some word of the reference title must partially match the
//!    candidate title above [`MATCH_THRESHOLD`], or the candidate is
//!    discarded before the costlier artist comparison.
//! 2. Each reference artist counts as matched when its partial ratio against
//!    the joined candidate artist string clears the same threshold; zero
//!    matched artists discards the candidate even on a perfect title.
//! 3. score = (artist_match + name_match) / 2, both on the 0-100 scale.

use crate::domain::{CandidateTrack, ScoredCandidate, TrackReference};
use crate::text;

/// Minimum partial ratio for a title word or an artist to count as matching.
pub const MATCH_THRESHOLD: f32 = 85.0;

/// Partial fuzzy ratio between two strings, 0-100.
///
/// The shorter string is slid across the longer one and the best windowed
/// normalized Levenshtein similarity wins, so a title embedded in a longer
/// one ("Symphony" vs "Symphony (feat. Zara Larsson)") still rates near 100.
pub fn partial_ratio(a: &str, b: &str) -> f32 {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let short_len = shorter.chars().count();
    if short_len == 0 {
        // Two empty strings are identical; one empty string matches nothing
        return if longer.is_empty() { 100.0 } else { 0.0 };
    }

    let long_chars: Vec<char> = longer.chars().collect();
    let mut best = 0.0f64;
    for start in 0..=(long_chars.len() - short_len) {
        let window: String = long_chars[start..start + short_len].iter().collect();
        let similarity = strsim::normalized_levenshtein(shorter, &window);
        if similarity > best {
            best = similarity;
        }
        if best >= 1.0 {
            break;
        }
    }
    (best * 100.0) as f32
}

/// Score a candidate against the reference, or reject it.
///
/// Returns `None` when the candidate fails either the title-word gate or the
/// artist-overlap requirement.
pub fn score(reference: &TrackReference, candidate: &CandidateTrack) -> Option<f32> {
    // Slashes separate alternate titles in several catalogs
    let candidate_title = candidate.title.replace('/', " ");
    let reference_name = text::normalize(&reference.name);

    let has_common_word = reference_name
        .split_whitespace()
        .any(|word| partial_ratio(word, &candidate_title) > MATCH_THRESHOLD);
    if !has_common_word {
        tracing::debug!(
            provider = candidate.provider,
            title = %candidate.title,
            "discarding candidate: no title word in common"
        );
        return None;
    }

    let artist_line = candidate.artist_line();
    let matched_artists = reference
        .artists
        .iter()
        .filter(|artist| partial_ratio(&text::normalize(artist), &artist_line) > MATCH_THRESHOLD)
        .count();
    if matched_artists == 0 {
        tracing::debug!(
            provider = candidate.provider,
            title = %candidate.title,
            "discarding candidate: no artist overlap"
        );
        return None;
    }

    let artist_match = (matched_artists as f32 / reference.artists.len() as f32) * 100.0;
    let name_match = partial_ratio(&candidate_title, &reference_name);
    Some((artist_match + name_match) / 2.0)
}

/// Score and rank candidates from all providers.
///
/// Descending score; ties keep the configured provider order. Rejected
/// candidates never appear in the output.
pub fn rank(
    reference: &TrackReference,
    candidates: Vec<CandidateTrack>,
    provider_order: &[String],
) -> Vec<ScoredCandidate> {
    let priority = |provider: &str| {
        provider_order
            .iter()
            .position(|name| name == provider)
            .unwrap_or(usize::MAX)
    };

    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .filter_map(|candidate| {
            score(reference, &candidate).map(|score| ScoredCandidate { candidate, score })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| priority(a.candidate.provider).cmp(&priority(b.candidate.provider)))
    });
    scored
}
