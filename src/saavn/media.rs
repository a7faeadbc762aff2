//! Media URL resolution for Saavn candidates.
//!
//! Two paths, tried in a fixed order:
//! 1. `media_preview_url` - a plain low-quality preview URL whose quality
//!    token is rewritten to the requested tier. Cheap, and present on most
//!    payloads.
//! 2. `encrypted_media_url` - the catalog's obfuscated address of the real
//!    stream: base64 over DES-ECB with a fixed, publicly known key.
//!
//! Path selection is by explicit field presence. A present-but-malformed
//! field is an error for that candidate, never a silent switch to the other
//! path.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use ecb::cipher::block_padding::Pkcs7;
use ecb::cipher::{BlockDecryptMut, KeyInit};

use crate::domain::{BitrateLabel, CandidateTrack, ProviderError, ResolvedMedia};

type DesEcbDecryptor = ecb::Decryptor<des::Des>;

/// Fixed DES key the catalog encrypts media URLs with.
const MEDIA_URL_KEY: &[u8; 8] = b"38346591";

/// Quality token of preview URLs as served.
const PREVIEW_TOKEN: &str = "_96_p.mp4";
/// Replacement tokens: high tier and standard tier.
const HIGH_TOKEN: &str = "_320.mp4";
const STANDARD_TOKEN: &str = "_160.mp4";

/// Resolve a directly playable URL from a candidate's retained metadata.
pub fn resolve(
    candidate: &CandidateTrack,
    prefer_high_bitrate: bool,
) -> Result<ResolvedMedia, ProviderError> {
    // The high tier only exists when the catalog says so
    let want_high = prefer_high_bitrate && field_flag(candidate, "320kbps");

    if let Some(preview_url) = field_str(candidate, "media_preview_url") {
        return Ok(from_preview_url(preview_url, want_high));
    }

    if let Some(encrypted) = field_str(candidate, "encrypted_media_url") {
        return from_encrypted_url(encrypted, want_high);
    }

    Err(ProviderError::NoMediaUrl)
}

/// Rewrite the preview URL's host segment and quality token.
fn from_preview_url(preview_url: &str, want_high: bool) -> ResolvedMedia {
    let (token, bitrate) = if want_high {
        (HIGH_TOKEN, BitrateLabel::High)
    } else {
        (STANDARD_TOKEN, BitrateLabel::Low)
    };

    let url = preview_url
        .replace("preview", "aac")
        .replace(PREVIEW_TOKEN, token);

    ResolvedMedia {
        url,
        bitrate,
        lyrics: None,
    }
}

/// Decrypt the obfuscated media URL and pick the quality tier.
fn from_encrypted_url(
    encrypted: &str,
    want_high: bool,
) -> Result<ResolvedMedia, ProviderError> {
    let ciphertext = BASE64
        .decode(encrypted.trim())
        .map_err(|e| ProviderError::Parse(format!("encrypted media url is not base64: {e}")))?;

    let plaintext = DesEcbDecryptor::new_from_slice(MEDIA_URL_KEY)
        .map_err(|_| ProviderError::Parse("bad media url key length".to_string()))?
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| ProviderError::Parse("encrypted media url has bad padding".to_string()))?;

    let decrypted = String::from_utf8(plaintext)
        .map_err(|_| ProviderError::Parse("decrypted media url is not UTF-8".to_string()))?;

    // Decrypted URLs point at the 96kbps rendition; upgrade, then downgrade
    // if the high tier isn't available or wasn't asked for
    let upgraded = decrypted.replace("_96.mp4", HIGH_TOKEN);
    let (url, bitrate) = if want_high {
        (upgraded, BitrateLabel::High)
    } else {
        (upgraded.replace(HIGH_TOKEN, STANDARD_TOKEN), BitrateLabel::Low)
    };

    Ok(ResolvedMedia {
        url,
        bitrate,
        lyrics: None,
    })
}

/// Media fields have moved between the payload root and `more_info` across
/// catalog revisions; accept either location.
fn field_str<'a>(candidate: &'a CandidateTrack, key: &str) -> Option<&'a str> {
    candidate.raw_str(key).or_else(|| {
        candidate
            .raw
            .get("more_info")
            .and_then(|v| v.get(key))
            .and_then(|v| v.as_str())
    })
}

fn field_flag(candidate: &CandidateTrack, key: &str) -> bool {
    if candidate.raw_flag(key) {
        return true;
    }
    match candidate.raw.get("more_info").and_then(|v| v.get(key)) {
        Some(serde_json::Value::Bool(b)) => *b,
        Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}
