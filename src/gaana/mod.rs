//! Gaana-like catalog adapter.
//!
//! The simplest of the catalogs: typed JSON responses and plain per-quality
//! stream URLs, no obfuscation. The API requires a bearer token from the
//! client-credentials exchange, so every call goes through the shared
//! [`crate::auth::TokenManager`] first.

pub mod adapter;
pub mod client;
pub mod dto;

pub use client::GaanaClient;

/// Catalog name used in config priority lists and candidate provenance.
pub const PROVIDER: &str = "gaana";
