//! Gaana HTTP client.
//!
//! Every API call carries a bearer token from the shared token manager; a
//! failed exchange surfaces as [`ProviderError::Auth`] and knocks this
//! catalog out of the current request only.

use std::sync::Arc;

use super::{PROVIDER, adapter, dto};
use crate::auth::TokenManager;
use crate::domain::{CandidateTrack, ProviderError, ResolvedMedia};

/// Credential endpoint for the client-credentials exchange.
pub const TOKEN_URL: &str = "https://apiv2.gaana.com/oauth2/token";

/// Gaana API client
pub struct GaanaClient {
    http_client: reqwest::Client,
    api_base: String,
    tokens: Arc<TokenManager>,
}

impl GaanaClient {
    /// Create a new client sharing the given token manager
    pub fn new(tokens: Arc<TokenManager>) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            api_base: "https://apiv2.gaana.com".to_string(),
            tokens,
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_api_base(api_base: impl Into<String>, tokens: Arc<TokenManager>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_base: api_base.into(),
            tokens,
        }
    }

    /// Free-text song search.
    pub async fn search(&self, query: &str) -> Result<Vec<CandidateTrack>, ProviderError> {
        let url = format!(
            "{}/?type=search&subtype=search_song&content_filter=2&key={}",
            self.api_base,
            urlencoding::encode(query)
        );
        let response: dto::TracksResponse = self.get_json(&url).await?;
        Ok(response
            .tracks
            .into_iter()
            .map(adapter::to_candidate)
            .collect())
    }

    /// Full track detail for a known native ID.
    pub async fn fetch_by_id(&self, id: &str) -> Result<CandidateTrack, ProviderError> {
        let url = format!(
            "{}/?type=songDetail&track_id={}",
            self.api_base,
            urlencoding::encode(id)
        );
        let response: dto::TracksResponse = self.get_json(&url).await?;
        response
            .tracks
            .into_iter()
            .next()
            .map(adapter::to_candidate)
            .ok_or_else(|| ProviderError::Parse(format!("no track in detail response for {id}")))
    }

    /// Pick the stream URL tier from a candidate's retained metadata.
    ///
    /// Pure metadata selection - the adapter already stored both tiers.
    /// Falls back to the other tier when the preferred one is absent.
    pub fn resolve_media(
        candidate: &CandidateTrack,
        prefer_high_bitrate: bool,
    ) -> Result<ResolvedMedia, ProviderError> {
        adapter::pick_stream(candidate, prefer_high_bitrate)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ProviderError> {
        let token = self.tokens.bearer(PROVIDER).await?;

        let response = self
            .http_client
            .get(url)
            .bearer_auth(&token.value)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!("HTTP {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}
