//! Saavn-like catalog adapter.
//!
//! The catalog speaks a single `api.php` endpoint dispatched on a `__call`
//! query parameter. Search results and song details arrive as loosely-shaped
//! JSON objects whose field set shifts between endpoints, so payloads are
//! retained as raw maps and only the envelope is typed (`dto.rs`). Detail
//! lookups by public page URL mine the song ID out of the page markup
//! (`client::extract_song_id`), the catalog's only non-JSON surface.
//!
//! Media URLs are the interesting part: a plain preview URL when the catalog
//! volunteers one, otherwise a DES-encrypted field (`media.rs`).

pub mod adapter;
pub mod client;
pub mod dto;
pub mod media;

pub use client::SaavnClient;

/// Catalog name used in config priority lists and candidate provenance.
pub const PROVIDER: &str = "saavn";
