//! YouTube-like catalog adapter.
//!
//! The messiest of the catalogs. Search responses wrap the real payload in a
//! JSON-encoded string that needs a second parse pass, detail lookups read
//! the watch page itself, and media URLs come from a converter page - both
//! pages mined with fixed delimiter substrings. All of the string mining is
//! quarantined in `extract.rs` so markup drift upstream breaks loudly and
//! only there.

pub mod adapter;
pub mod client;
pub mod dto;
pub mod extract;

pub use client::YtMusicClient;

/// Catalog name used in config priority lists and candidate provenance.
pub const PROVIDER: &str = "ytmusic";
