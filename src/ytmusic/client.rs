//! YouTube-like HTTP client.
//!
//! Three distinct surfaces: a JSON search endpoint (with its double-parsed
//! payload), the watch page for detail lookups, and a converter page for
//! direct download links. The two page surfaces go through `extract.rs`.

use super::{adapter, dto, extract};
use crate::domain::{BitrateLabel, CandidateTrack, ProviderError, ResolvedMedia};

/// YouTube-like API client
pub struct YtMusicClient {
    http_client: reqwest::Client,
    api_base: String,
    watch_base: String,
    converter_base: String,
}

impl YtMusicClient {
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
            api_base: "https://music.youtube.com".to_string(),
            watch_base: "https://www.youtube.com".to_string(),
            converter_base: "https://yt1s.com".to_string(),
        }
    }

    /// Create a client for testing with custom base URLs
    #[cfg(test)]
    pub fn with_bases(
        api_base: impl Into<String>,
        watch_base: impl Into<String>,
        converter_base: impl Into<String>,
    ) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_base: api_base.into(),
            watch_base: watch_base.into(),
            converter_base: converter_base.into(),
        }
    }

    /// Free-text song search.
    ///
    /// The response payload is a JSON-encoded string inside the envelope's
    /// `contents` field; an absent field means an empty result set.
    pub async fn search(&self, query: &str) -> Result<Vec<CandidateTrack>, ProviderError> {
        let url = format!("{}/youtubei/v1/search?alt=json", self.api_base);
        let body = serde_json::json!({
            "query": query,
            "filter": "songs",
        });

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!("HTTP {status}")));
        }

        let envelope: dto::SearchEnvelope = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let Some(contents) = envelope.contents else {
            return Ok(Vec::new());
        };

        // Second parse pass over the embedded payload string
        let payload: dto::SearchPayload = serde_json::from_str(&contents)
            .map_err(|e| ProviderError::Parse(format!("embedded search payload: {e}")))?;

        Ok(payload
            .items
            .into_iter()
            .map(adapter::to_candidate)
            .collect())
    }

    /// Detail for a known video ID, mined from the watch page.
    pub async fn fetch_by_id(&self, id: &str) -> Result<CandidateTrack, ProviderError> {
        let url = format!("{}/watch?v={}", self.watch_base, urlencoding::encode(id));
        let page = self.get_text(&url).await?;

        let title = extract::video_title(&page)?;
        let author = extract::video_author(&page)?;
        Ok(adapter::from_watch_page(id, &title, &author))
    }

    /// Direct download link from the converter page.
    ///
    /// The page lists one link per bitrate tier; the preferred tier is taken
    /// when offered, the other tier otherwise.
    pub async fn resolve_media(
        &self,
        candidate: &CandidateTrack,
        prefer_high_bitrate: bool,
    ) -> Result<ResolvedMedia, ProviderError> {
        let url = format!(
            "{}/api/button/mp3/{}",
            self.converter_base,
            urlencoding::encode(&candidate.provider_id)
        );
        let page = self.get_text(&url).await?;

        let high = extract::mp3_link(&page, "mp3_320");
        let low = extract::mp3_link(&page, "mp3_128");

        let (url, bitrate) = if prefer_high_bitrate {
            match (high, low) {
                (Some(url), _) => (url, BitrateLabel::High),
                (None, Some(url)) => (url, BitrateLabel::Low),
                (None, None) => return Err(ProviderError::NoMediaUrl),
            }
        } else {
            match (low, high) {
                (Some(url), _) => (url, BitrateLabel::Low),
                (None, Some(url)) => (url, BitrateLabel::High),
                (None, None) => return Err(ProviderError::NoMediaUrl),
            }
        };

        Ok(ResolvedMedia {
            url,
            bitrate,
            lyrics: None,
        })
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

impl Default for YtMusicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = YtMusicClient::new();
        assert_eq!(client.api_base, "https://music.youtube.com");
        assert_eq!(client.watch_base, "https://www.youtube.com");
    }

    #[test]
    fn test_client_with_custom_bases() {
        let client = YtMusicClient::with_bases(
            "http://localhost:8080",
            "http://localhost:8081",
            "http://localhost:8082",
        );
        assert_eq!(client.converter_base, "http://localhost:8082");
    }
}
