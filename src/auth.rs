//! Cached bearer credentials for catalogs that require authentication.
//!
//! Tokens come from a standard client-credentials exchange: HTTP POST with
//! Basic auth (fixed client id/secret from config) and the form body
//! `grant_type=client_credentials`. The manager caches one token per provider
//! and refreshes when a cached token is missing or expires within the safety
//! margin. The cache lock is held across the exchange, so concurrent callers
//! that observe an expiring token wait for the single in-flight refresh
//! instead of issuing duplicate exchanges.
//!
//! One attempt per refresh - retry/backoff is the caller's concern.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::Credentials;
use crate::domain::ProviderError;

/// A token expiring within this window is refreshed before being handed out,
/// so every token returned is valid for at least one request attempt.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// A short-lived bearer credential.
///
/// Replaced on refresh, never mutated in place.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    fn is_fresh(&self) -> bool {
        self.expires_at - Utc::now() > TimeDelta::seconds(EXPIRY_MARGIN_SECS)
    }
}

/// The credential endpoint itself, behind a trait so tests can count
/// exchanges without a network.
#[async_trait]
pub trait TokenEndpoint: Send + Sync {
    /// Perform one client-credentials exchange for the given provider.
    async fn exchange(&self, provider: &str) -> Result<AuthToken, ProviderError>;
}

/// Wire shape of the token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Lifetime in seconds from now
    expires_in: i64,
}

/// Real credential endpoint speaking the client-credentials flow.
pub struct HttpTokenEndpoint {
    http_client: reqwest::Client,
    token_url: String,
    credentials: Credentials,
}

impl HttpTokenEndpoint {
    pub fn new(token_url: impl Into<String>, credentials: Credentials) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            token_url: token_url.into(),
            credentials,
        }
    }
}

#[async_trait]
impl TokenEndpoint for HttpTokenEndpoint {
    async fn exchange(&self, provider: &str) -> Result<AuthToken, ProviderError> {
        let (Some(client_id), Some(client_secret)) = (
            self.credentials.client_id.as_deref(),
            self.credentials.client_secret.as_deref(),
        ) else {
            return Err(ProviderError::Auth(format!(
                "no client credentials configured for {provider}"
            )));
        };

        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| ProviderError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Auth(format!(
                "token endpoint rejected the exchange: HTTP {status}"
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Auth(e.to_string()))?;

        Ok(AuthToken {
            value: body.access_token,
            expires_at: Utc::now() + TimeDelta::seconds(body.expires_in),
        })
    }
}

/// Per-provider token cache with mutually-exclusive refresh.
pub struct TokenManager {
    endpoint: Box<dyn TokenEndpoint>,
    cache: Mutex<HashMap<String, AuthToken>>,
}

impl TokenManager {
    pub fn new(endpoint: impl TokenEndpoint + 'static) -> Self {
        Self {
            endpoint: Box::new(endpoint),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// A token guaranteed valid for at least one request attempt.
    ///
    /// Serves from cache when fresh; otherwise performs one exchange while
    /// holding the cache lock, so concurrent callers share the result.
    pub async fn bearer(&self, provider: &str) -> Result<AuthToken, ProviderError> {
        let mut cache = self.cache.lock().await;

        if let Some(token) = cache.get(provider)
            && token.is_fresh()
        {
            return Ok(token.clone());
        }

        tracing::debug!(provider, "refreshing bearer token");
        let token = self.endpoint.exchange(provider).await?;
        cache.insert(provider.to_string(), token.clone());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Endpoint that mints tokens with a fixed lifetime and counts exchanges.
    struct CountingEndpoint {
        exchanges: Arc<AtomicUsize>,
        lifetime_secs: i64,
    }

    #[async_trait]
    impl TokenEndpoint for CountingEndpoint {
        async fn exchange(&self, provider: &str) -> Result<AuthToken, ProviderError> {
            let n = self.exchanges.fetch_add(1, Ordering::SeqCst);
            Ok(AuthToken {
                value: format!("{provider}-token-{n}"),
                expires_at: Utc::now() + TimeDelta::seconds(self.lifetime_secs),
            })
        }
    }

    /// Endpoint that always rejects the client credentials.
    struct RejectingEndpoint;

    #[async_trait]
    impl TokenEndpoint for RejectingEndpoint {
        async fn exchange(&self, _provider: &str) -> Result<AuthToken, ProviderError> {
            Err(ProviderError::Auth("invalid_client".to_string()))
        }
    }

    fn manager(lifetime_secs: i64) -> (TokenManager, Arc<AtomicUsize>) {
        let exchanges = Arc::new(AtomicUsize::new(0));
        let endpoint = CountingEndpoint {
            exchanges: exchanges.clone(),
            lifetime_secs,
        };
        (TokenManager::new(endpoint), exchanges)
    }

    #[tokio::test]
    async fn test_fresh_token_served_from_cache() {
        let (manager, exchanges) = manager(3600);

        let first = manager.bearer("gaana").await.unwrap();
        let second = manager.bearer("gaana").await.unwrap();

        assert_eq!(first.value, second.value);
        assert_eq!(exchanges.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_exchange() {
        let (manager, exchanges) = manager(3600);

        let (a, b) = tokio::join!(manager.bearer("gaana"), manager.bearer("gaana"));

        assert_eq!(a.unwrap().value, b.unwrap().value);
        assert_eq!(exchanges.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_token_within_expiry_margin_is_refreshed() {
        // Lifetime shorter than the safety margin: every call must exchange
        let (manager, exchanges) = manager(EXPIRY_MARGIN_SECS / 2);

        manager.bearer("gaana").await.unwrap();
        manager.bearer("gaana").await.unwrap();

        assert_eq!(exchanges.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_tokens_cached_per_provider() {
        let (manager, exchanges) = manager(3600);

        let a = manager.bearer("gaana").await.unwrap();
        let b = manager.bearer("other").await.unwrap();

        assert_ne!(a.value, b.value);
        assert_eq!(exchanges.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rejected_credentials_surface_auth_error() {
        let manager = TokenManager::new(RejectingEndpoint);
        let result = manager.bearer("gaana").await;
        assert!(matches!(result, Err(ProviderError::Auth(_))));
    }
}
