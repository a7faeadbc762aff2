//! Resolution orchestrator - ties the catalogs, scorer and URL resolution
//! together.
//!
//! One resolution request flows through fixed stages:
//! 1. Fan out the search to every configured catalog concurrently
//! 2. Collect everything - a join-all barrier, never race-to-first, so a
//!    slow-but-correct catalog isn't starved by a fast-but-wrong one
//! 3. Score and rank the surviving candidates
//! 4. Walk the ranking, fetching full detail and attempting URL resolution,
//!    falling through to the next candidate when one has no usable media
//!
//! Per-catalog failures (transport, timeout, auth, parse) only remove that
//! catalog's contribution; the two terminal errors in
//! [`ResolveError`] are the only ones a caller sees. Cancellation is
//! cooperative: dropping the future returned by [`Resolver::resolve`] drops
//! every in-flight catalog call with it.

use std::sync::Arc;

use futures::future::join_all;

use crate::auth::{HttpTokenEndpoint, TokenManager};
use crate::config::{Config, ResolverConfig};
use crate::domain::{
    CandidateTrack, ProviderError, ResolveError, ResolvedMedia, ScoredCandidate, TrackReference,
};
use crate::matching;
use crate::traits::CatalogProvider;
use crate::{gaana, saavn, ytmusic};

/// Per-request knobs. [`Resolver::resolve`] fills these from config;
/// [`Resolver::resolve_with`] lets the caller override them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Fetch lyrics for the winning candidate when its catalog has them
    pub include_lyrics: bool,
    /// Ask for the high-bitrate variant when the catalog offers one
    pub prefer_high_bitrate: bool,
}

/// Service resolving track references against the configured catalogs.
pub struct Resolver {
    providers: Vec<Arc<dyn CatalogProvider>>,
    config: ResolverConfig,
}

impl Resolver {
    /// Build the catalog set from config.
    ///
    /// One client per configured catalog name, all sharing a single token
    /// manager; unknown names are skipped with a warning.
    pub fn new(config: &Config) -> Self {
        let tokens = Arc::new(TokenManager::new(HttpTokenEndpoint::new(
            gaana::client::TOKEN_URL,
            config.credentials.clone(),
        )));

        let providers = config
            .resolver
            .providers
            .iter()
            .filter_map(|name| {
                let provider: Arc<dyn CatalogProvider> = match name.as_str() {
                    saavn::PROVIDER => Arc::new(saavn::SaavnClient::new()),
                    gaana::PROVIDER => Arc::new(gaana::GaanaClient::new(tokens.clone())),
                    ytmusic::PROVIDER => Arc::new(ytmusic::YtMusicClient::new()),
                    other => {
                        tracing::warn!("unknown catalog {other:?} in config, skipping");
                        return None;
                    }
                };
                Some(provider)
            })
            .collect();

        Self {
            providers,
            config: config.resolver.clone(),
        }
    }

    /// Build a resolver over an explicit provider set.
    pub fn with_providers(
        providers: Vec<Arc<dyn CatalogProvider>>,
        config: ResolverConfig,
    ) -> Self {
        Self { providers, config }
    }

    /// Resolve a reference using the configured defaults.
    pub async fn resolve(&self, reference: &TrackReference) -> Result<ResolvedMedia, ResolveError> {
        self.resolve_with(
            reference,
            ResolveOptions {
                include_lyrics: self.config.include_lyrics,
                prefer_high_bitrate: self.config.prefer_high_bitrate,
            },
        )
        .await
    }

    /// Resolve a reference with explicit options.
    pub async fn resolve_with(
        &self,
        reference: &TrackReference,
        options: ResolveOptions,
    ) -> Result<ResolvedMedia, ResolveError> {
        let candidates = self.collect_candidates(reference).await?;
        let ranked = matching::rank(reference, candidates, &self.config.providers);
        tracing::debug!(
            track = %reference.name,
            ranked = ranked.len(),
            "candidates scored"
        );
        self.resolve_ranked(reference, ranked, options).await
    }

    /// Fan out the search and collect every catalog's contribution.
    async fn collect_candidates(
        &self,
        reference: &TrackReference,
    ) -> Result<Vec<CandidateTrack>, ResolveError> {
        let timeout = self.config.provider_timeout();

        let searches = self.providers.iter().map(|provider| {
            let provider = Arc::clone(provider);
            let query = reference.name.clone();
            async move {
                let result = match tokio::time::timeout(timeout, provider.search(&query)).await {
                    Ok(result) => result,
                    Err(_) => Err(ProviderError::Timeout),
                };
                (provider.name(), result)
            }
        });

        let results = join_all(searches).await;

        let mut candidates = Vec::new();
        let mut any_succeeded = false;
        for (name, result) in results {
            match result {
                Ok(found) => {
                    any_succeeded = true;
                    tracing::debug!(provider = name, count = found.len(), "catalog answered");
                    candidates.extend(found);
                }
                Err(e) => {
                    tracing::warn!(provider = name, error = %e, "catalog dropped from this request");
                }
            }
        }

        if !any_succeeded {
            return Err(ResolveError::NoProvidersAvailable);
        }
        Ok(candidates)
    }

    /// Walk the ranking until a candidate yields a playable URL.
    async fn resolve_ranked(
        &self,
        reference: &TrackReference,
        ranked: Vec<ScoredCandidate>,
        options: ResolveOptions,
    ) -> Result<ResolvedMedia, ResolveError> {
        for scored in &ranked {
            let Some(provider) = self.provider_by_name(scored.candidate.provider) else {
                continue;
            };

            // Search items are often thin; full detail carries the media
            // fields. A failed detail fetch leaves the search-time candidate.
            let candidate = match provider.fetch_by_id(&scored.candidate.provider_id).await {
                Ok(detailed) => detailed,
                Err(e) => {
                    tracing::debug!(
                        provider = scored.candidate.provider,
                        error = %e,
                        "detail fetch failed, using search result as-is"
                    );
                    scored.candidate.clone()
                }
            };

            match provider
                .resolve_media(&candidate, options.prefer_high_bitrate)
                .await
            {
                Ok(mut media) => {
                    if options.include_lyrics {
                        match provider.fetch_lyrics(&candidate).await {
                            Ok(lyrics) => media.lyrics = lyrics,
                            Err(e) => {
                                // Lyrics are decoration; the resolution stands
                                tracing::warn!(
                                    provider = candidate.provider,
                                    error = %e,
                                    "lyrics fetch failed"
                                );
                            }
                        }
                    }
                    tracing::info!(
                        track = %reference.name,
                        provider = candidate.provider,
                        score = scored.score,
                        bitrate = ?media.bitrate,
                        "resolved"
                    );
                    return Ok(media);
                }
                Err(e) => {
                    tracing::debug!(
                        provider = candidate.provider,
                        id = %candidate.provider_id,
                        error = %e,
                        "candidate unplayable, falling through"
                    );
                }
            }
        }

        Err(ResolveError::NoPlayableMatch)
    }

    fn provider_by_name(&self, name: &str) -> Option<&Arc<dyn CatalogProvider>> {
        self.providers.iter().find(|p| p.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mocks::{MockProvider, candidate};
    use std::time::Duration;

    fn arc(provider: MockProvider) -> Arc<dyn CatalogProvider> {
        Arc::new(provider)
    }

    fn config_with_order(providers: &[&str]) -> ResolverConfig {
        ResolverConfig {
            providers: providers.iter().map(|s| s.to_string()).collect(),
            provider_timeout_secs: 2,
            prefer_high_bitrate: true,
            include_lyrics: false,
        }
    }

    fn reference() -> TrackReference {
        TrackReference::new("Shape of You", ["Ed Sheeran"])
    }

    #[tokio::test]
    async fn test_best_candidate_wins() {
        let saavn = MockProvider::returning(
            "saavn",
            vec![
                candidate("saavn", "Shape of You", &["Ed Sheeran"]),
                candidate("saavn", "Shape of You Karaoke", &["Ed Sheeran"]),
            ],
        );
        let resolver =
            Resolver::with_providers(vec![arc(saavn)], config_with_order(&["saavn"]));

        let media = resolver.resolve(&reference()).await.unwrap();
        assert_eq!(media.url, "https://cdn.example.com/saavn:shape of you.mp4");
    }

    #[tokio::test]
    async fn test_provider_failure_does_not_abort_request() {
        let gaana = MockProvider::failing(
            "gaana",
            ProviderError::Unavailable("connection refused".to_string()),
        );
        let saavn = MockProvider::returning(
            "saavn",
            vec![candidate("saavn", "Shape of You", &["Ed Sheeran"])],
        );
        let resolver = Resolver::with_providers(
            vec![arc(gaana), arc(saavn)],
            config_with_order(&["gaana", "saavn"]),
        );

        let media = resolver.resolve(&reference()).await.unwrap();
        assert!(media.url.contains("saavn"));
    }

    #[tokio::test]
    async fn test_all_providers_failing_is_terminal() {
        let resolver = Resolver::with_providers(
            vec![
                arc(MockProvider::failing(
                    "saavn",
                    ProviderError::Unavailable("down".to_string()),
                )),
                arc(MockProvider::failing(
                    "gaana",
                    ProviderError::Auth("bad credentials".to_string()),
                )),
            ],
            config_with_order(&["saavn", "gaana"]),
        );

        assert_eq!(
            resolver.resolve(&reference()).await.unwrap_err(),
            ResolveError::NoProvidersAvailable
        );
    }

    #[tokio::test]
    async fn test_no_acceptable_candidate_is_no_playable_match() {
        // Catalog answers, but with something unrelated
        let saavn = MockProvider::returning(
            "saavn",
            vec![candidate("saavn", "Bohemian Rhapsody", &["Queen"])],
        );
        let resolver =
            Resolver::with_providers(vec![arc(saavn)], config_with_order(&["saavn"]));

        assert_eq!(
            resolver.resolve(&reference()).await.unwrap_err(),
            ResolveError::NoPlayableMatch
        );
    }

    #[tokio::test]
    async fn test_unplayable_best_falls_through_in_score_order() {
        // Two candidates; the first-ranked one has no media
        let saavn = MockProvider::returning(
            "saavn",
            vec![
                candidate("saavn", "Shape of You", &["Ed Sheeran"]),
                candidate("saavn", "Shape of You Remix", &["Ed Sheeran"]),
            ],
        )
        .unplayable("saavn:shape of you");
        let resolver =
            Resolver::with_providers(vec![arc(saavn)], config_with_order(&["saavn"]));

        let media = resolver.resolve(&reference()).await.unwrap();
        assert_eq!(
            media.url,
            "https://cdn.example.com/saavn:shape of you remix.mp4"
        );
    }

    #[tokio::test]
    async fn test_every_candidate_unplayable_is_no_playable_match() {
        let saavn = MockProvider::returning(
            "saavn",
            vec![candidate("saavn", "Shape of You", &["Ed Sheeran"])],
        )
        .unplayable("saavn:shape of you");
        let resolver =
            Resolver::with_providers(vec![arc(saavn)], config_with_order(&["saavn"]));

        assert_eq!(
            resolver.resolve(&reference()).await.unwrap_err(),
            ResolveError::NoPlayableMatch
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out_without_starving_the_rest() {
        let slow = MockProvider::slow(
            "gaana",
            vec![candidate("gaana", "Shape of You", &["Ed Sheeran"])],
            Duration::from_secs(30),
        );
        let fast = MockProvider::returning(
            "saavn",
            vec![candidate("saavn", "Shape of You", &["Ed Sheeran"])],
        );
        let resolver = Resolver::with_providers(
            vec![arc(slow), arc(fast)],
            config_with_order(&["gaana", "saavn"]),
        );

        let media = resolver.resolve(&reference()).await.unwrap();
        // The timed-out catalog contributed nothing; the fast one carried
        assert!(media.url.contains("saavn"));
    }

    #[tokio::test]
    async fn test_score_tie_broken_by_configured_order() {
        let saavn = MockProvider::returning(
            "saavn",
            vec![candidate("saavn", "Shape of You", &["Ed Sheeran"])],
        );
        let gaana = MockProvider::returning(
            "gaana",
            vec![candidate("gaana", "Shape of You", &["Ed Sheeran"])],
        );

        // gaana listed first: identical scores must resolve through gaana
        let resolver = Resolver::with_providers(
            vec![arc(saavn), arc(gaana)],
            config_with_order(&["gaana", "saavn"]),
        );

        let media = resolver.resolve(&reference()).await.unwrap();
        assert!(media.url.contains("gaana"));
    }

    #[tokio::test]
    async fn test_lyrics_attached_when_requested() {
        let saavn = MockProvider::returning(
            "saavn",
            vec![candidate("saavn", "Shape of You", &["Ed Sheeran"])],
        )
        .with_lyrics("The club isn't the best place to find a lover");
        let resolver =
            Resolver::with_providers(vec![arc(saavn)], config_with_order(&["saavn"]));

        let media = resolver
            .resolve_with(
                &reference(),
                ResolveOptions {
                    include_lyrics: true,
                    prefer_high_bitrate: true,
                },
            )
            .await
            .unwrap();
        assert!(media.lyrics.unwrap().starts_with("The club"));

        let without = resolver.resolve(&reference()).await.unwrap();
        assert!(without.lyrics.is_none());
    }

    #[test]
    fn test_new_skips_unknown_catalog_names() {
        let mut config = Config::default();
        config.resolver.providers = vec!["saavn".to_string(), "spotify".to_string()];

        let resolver = Resolver::new(&config);
        assert_eq!(resolver.providers.len(), 1);
        assert_eq!(resolver.providers[0].name(), "saavn");
    }
}
