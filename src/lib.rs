//! tracklink - resolves logical track identities into playable audio URLs.
//!
//! A track reference (name + artist list, typically from a reference catalog)
//! is fanned out as a search to several third-party music catalogs
//! concurrently. Candidates are normalized to a common shape, fuzzy-scored
//! against the reference, and the best match has a direct media URL
//! extracted - or decrypted - from its metadata. Catalogs fail independently;
//! one bad catalog never takes the request down with it.
//!
//! # Architecture
//!
//! - **Domain models** (`domain`) - internal types; catalog responses never
//!   leak past their adapters
//! - **Catalog adapters** (`saavn`, `gaana`, `ytmusic`) - one module per
//!   catalog, each with its client/DTO/adapter split and its own endpoint
//!   quirks (delimiter-mined pages, double-parsed payloads, encrypted URLs)
//! - **Shared scoring** (`matching`, `text`) - free functions every catalog's
//!   candidates flow through
//! - **Token manager** (`auth`) - cached client-credential bearer tokens
//! - **Orchestrator** (`service`) - fan-out, collect, rank, resolve
//!
//! # Usage
//!
//! ```ignore
//! use tracklink::{Resolver, TrackReference};
//!
//! let config = tracklink::config::load();
//! let resolver = Resolver::new(&config);
//!
//! let reference = TrackReference::new("Shape of You", ["Ed Sheeran"]);
//! let media = resolver.resolve(&reference).await?;
//! println!("{} ({:?})", media.url, media.bitrate);
//! ```

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod gaana;
pub mod matching;
pub mod saavn;
pub mod service;
pub mod text;
pub mod traits;
pub mod ytmusic;

pub use domain::{
    BitrateLabel, CandidateTrack, ProviderError, ResolveError, ResolvedMedia, ScoredCandidate,
    TrackReference,
};
pub use error::{Error, Result};
pub use service::{ResolveOptions, Resolver};
pub use traits::CatalogProvider;
