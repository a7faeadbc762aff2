//! The catalog capability trait.
//!
//! Every catalog exposes the same narrow surface: free-text search, detail by
//! provider-native ID, media URL resolution for its own candidates, and
//! lyrics where the catalog carries them. Shared behavior (normalization,
//! scoring) lives in `text`/`matching` as free functions every provider
//! calls - nothing is inherited.
//!
//! Production code uses the real client implementations below; tests
//! substitute the mocks at the bottom of this module.

use async_trait::async_trait;

use crate::domain::{CandidateTrack, ProviderError, ResolvedMedia};

/// One third-party music catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Stable catalog name; also the key used in the configured priority list.
    fn name(&self) -> &'static str;

    /// Free-text search.
    ///
    /// An empty or garbage result set is `Ok(vec![])`, never an error;
    /// transport failures surface as [`ProviderError::Unavailable`].
    async fn search(&self, query: &str) -> Result<Vec<CandidateTrack>, ProviderError>;

    /// Full detail for a known provider-native ID.
    async fn fetch_by_id(&self, id: &str) -> Result<CandidateTrack, ProviderError>;

    /// Directly playable media URL for a candidate this catalog produced.
    async fn resolve_media(
        &self,
        candidate: &CandidateTrack,
        prefer_high_bitrate: bool,
    ) -> Result<ResolvedMedia, ProviderError>;

    /// Lyrics for a candidate, when the catalog carries them.
    async fn fetch_lyrics(
        &self,
        candidate: &CandidateTrack,
    ) -> Result<Option<String>, ProviderError>;
}

// Implement the trait for the real clients

#[async_trait]
impl CatalogProvider for crate::saavn::SaavnClient {
    fn name(&self) -> &'static str {
        crate::saavn::PROVIDER
    }

    async fn search(&self, query: &str) -> Result<Vec<CandidateTrack>, ProviderError> {
        self.search(query).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<CandidateTrack, ProviderError> {
        self.fetch_by_id(id).await
    }

    async fn resolve_media(
        &self,
        candidate: &CandidateTrack,
        prefer_high_bitrate: bool,
    ) -> Result<ResolvedMedia, ProviderError> {
        crate::saavn::media::resolve(candidate, prefer_high_bitrate)
    }

    async fn fetch_lyrics(
        &self,
        candidate: &CandidateTrack,
    ) -> Result<Option<String>, ProviderError> {
        self.fetch_lyrics(candidate).await
    }
}

#[async_trait]
impl CatalogProvider for crate::gaana::GaanaClient {
    fn name(&self) -> &'static str {
        crate::gaana::PROVIDER
    }

    async fn search(&self, query: &str) -> Result<Vec<CandidateTrack>, ProviderError> {
        self.search(query).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<CandidateTrack, ProviderError> {
        self.fetch_by_id(id).await
    }

    async fn resolve_media(
        &self,
        candidate: &CandidateTrack,
        prefer_high_bitrate: bool,
    ) -> Result<ResolvedMedia, ProviderError> {
        crate::gaana::GaanaClient::resolve_media(candidate, prefer_high_bitrate)
    }

    async fn fetch_lyrics(
        &self,
        _candidate: &CandidateTrack,
    ) -> Result<Option<String>, ProviderError> {
        // Gaana exposes no lyrics endpoint
        Ok(None)
    }
}

#[async_trait]
impl CatalogProvider for crate::ytmusic::YtMusicClient {
    fn name(&self) -> &'static str {
        crate::ytmusic::PROVIDER
    }

    async fn search(&self, query: &str) -> Result<Vec<CandidateTrack>, ProviderError> {
        self.search(query).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<CandidateTrack, ProviderError> {
        self.fetch_by_id(id).await
    }

    async fn resolve_media(
        &self,
        candidate: &CandidateTrack,
        prefer_high_bitrate: bool,
    ) -> Result<ResolvedMedia, ProviderError> {
        self.resolve_media(candidate, prefer_high_bitrate).await
    }

    async fn fetch_lyrics(
        &self,
        _candidate: &CandidateTrack,
    ) -> Result<Option<String>, ProviderError> {
        // Nothing lyrics-shaped in the watch/converter responses
        Ok(None)
    }
}
