//! Saavn HTTP client.
//!
//! All JSON traffic goes through one `api.php` endpoint dispatched on the
//! `__call` parameter. Detail lookups by public page URL have no JSON
//! endpoint at all: the song ID is mined out of the page markup with fixed
//! delimiter substrings, a historically fragile step that is kept in
//! [`extract_song_id`] so upstream markup drift fails loudly and only here.

use super::{adapter, dto};
use crate::domain::{CandidateTrack, ProviderError};

/// Saavn API client
pub struct SaavnClient {
    http_client: reqwest::Client,
    api_base: String,
}

impl SaavnClient {
    /// Create a new client
    pub fn new() -> Self {
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
            api_base: "https://www.jiosaavn.com/api.php".to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_base: api_base.into(),
        }
    }

    /// Free-text song search via the autocomplete endpoint.
    ///
    /// A response without a songs section (garbage query, regional block
    /// page) yields an empty list, not an error.
    pub async fn search(&self, query: &str) -> Result<Vec<CandidateTrack>, ProviderError> {
        let url = format!(
            "{}?__call=autocomplete.get&_format=json&_marker=0&cc=in&includeMetaTags=1&query={}",
            self.api_base,
            urlencoding::encode(query)
        );
        let body = self.get_text(&url).await?;

        let response: dto::SearchResponse = match serde_json::from_str(&body) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("saavn search returned unparseable payload: {e}");
                return Ok(Vec::new());
            }
        };

        let items = response.songs.map(|block| block.data).unwrap_or_default();
        Ok(items.into_iter().filter_map(adapter::to_candidate).collect())
    }

    /// Full song detail for a known native ID.
    ///
    /// The detail response is keyed by the requested ID: `{"<id>": {...}}`.
    pub async fn fetch_by_id(&self, id: &str) -> Result<CandidateTrack, ProviderError> {
        let url = format!(
            "{}?__call=song.getDetails&cc=in&_marker=0%3F_marker%3D0&_format=json&pids={}",
            self.api_base,
            urlencoding::encode(id)
        );
        let body = self.get_text(&url).await?;

        let mut response: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))?;

        let song = match response.remove(id) {
            Some(serde_json::Value::Object(song)) => song,
            _ => {
                return Err(ProviderError::Parse(format!(
                    "song detail response missing requested id {id}"
                )));
            }
        };

        adapter::to_candidate(song)
            .ok_or_else(|| ProviderError::Parse("song detail object lacked id/title".to_string()))
    }

    /// Full song detail for a public song page URL.
    pub async fn fetch_by_url(&self, page_url: &str) -> Result<CandidateTrack, ProviderError> {
        let page = self.get_text(page_url).await?;
        let id = extract_song_id(&page)?;
        self.fetch_by_id(&id).await
    }

    /// Lyrics for a candidate that advertises them.
    pub async fn fetch_lyrics(
        &self,
        candidate: &CandidateTrack,
    ) -> Result<Option<String>, ProviderError> {
        if !candidate.lyrics_available {
            return Ok(None);
        }

        let url = format!(
            "{}?__call=lyrics.getLyrics&ctx=web6dot0&api_version=4&_format=json&_marker=0%3F_marker%3D0&lyrics_id={}",
            self.api_base,
            urlencoding::encode(&candidate.provider_id)
        );
        let body = self.get_text(&url).await?;

        let response: dto::LyricsResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))?;
        Ok(response.lyrics.filter(|lyrics| !lyrics.is_empty()))
    }

    async fn get_text(&self, url: &str) -> Result<String, ProviderError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))
    }
}

impl Default for SaavnClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Mine the native song ID out of a song page.
///
/// Two delimiter chains, matching the two page layouts the catalog serves:
/// the embedded song entity (`"song":{"type":"..."id":"<id>","image":`)
/// and the older pid form (`"pid":"<id>","`). Anything else is markup drift
/// and fails explicitly.
pub(crate) fn extract_song_id(page: &str) -> Result<String, ProviderError> {
    if let Some(after) = page.split("\"song\":{\"type\":\"").nth(1)
        && let Some(section) = after.split("\",\"image\":").next()
        && section.contains("\"id\":\"")
        && let Some(id) = section.split("\"id\":\"").last()
        && !id.is_empty()
    {
        return Ok(id.to_string());
    }

    if let Some(after) = page.split("\"pid\":\"").nth(1)
        && let Some(id) = after.split("\",\"").next()
        && !id.is_empty()
    {
        return Ok(id.to_string());
    }

    Err(ProviderError::Extract("song id"))
}
