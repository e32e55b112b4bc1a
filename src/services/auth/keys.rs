//! Verification key sources for access tokens.
//!
//! - `StaticKey`: one public key PEM from config (no `kid` needed).
//! - `JwksKeys`: the issuer's published JWKS, fetched lazily and cached.
//!   An unknown `kid` triggers one refetch, at most once per cooldown window.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{
    Algorithm, DecodingKey, Header,
    jwk::{Jwk, JwkSet},
};
use thiserror::Error;
use tokio::{sync::RwLock, time::Instant};

use crate::services::auth::AuthError;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("unsupported algorithm for static key: {0:?}")]
    UnsupportedAlgorithm(Algorithm),
    #[error("invalid public key pem: {0}")]
    InvalidPem(#[from] jsonwebtoken::errors::Error),
    #[error("jwks request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("no jwks loaded; last fetch failed inside the cooldown window")]
    CoolingDown,
}

#[async_trait]
pub trait KeyResolver: Send + Sync {
    // For logging.
    fn source_name(&self) -> &'static str;

    /// Resolve the key that should verify a token carrying `header`.
    async fn resolve(&self, header: &Header) -> Result<DecodingKey, AuthError>;
}

#[derive(Clone)]
pub struct StaticKey {
    key: DecodingKey,
}

impl StaticKey {
    pub fn from_pem(pem: &str, algorithm: Algorithm) -> Result<Self, KeyError> {
        let key = match algorithm {
            Algorithm::EdDSA => DecodingKey::from_ed_pem(pem.as_bytes())?,
            Algorithm::RS256 => DecodingKey::from_rsa_pem(pem.as_bytes())?,
            other => return Err(KeyError::UnsupportedAlgorithm(other)),
        };
        Ok(Self { key })
    }
}

#[async_trait]
impl KeyResolver for StaticKey {
    fn source_name(&self) -> &'static str {
        "static"
    }

    async fn resolve(&self, _header: &Header) -> Result<DecodingKey, AuthError> {
        Ok(self.key.clone())
    }
}

#[derive(Default)]
struct JwksCache {
    set: Option<JwkSet>,
    // Set before every fetch, so failures also start the cooldown.
    last_attempt: Option<Instant>,
}

pub struct JwksKeys {
    url: String,
    client: reqwest::Client,
    cache: RwLock<JwksCache>,
    refetch_cooldown: Duration,
}

impl JwksKeys {
    pub fn new(url: impl Into<String>) -> Result<Self, KeyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            url: url.into(),
            client,
            cache: RwLock::new(JwksCache::default()),
            refetch_cooldown: Duration::from_secs(60),
        })
    }

    pub fn with_refetch_cooldown(mut self, cooldown: Duration) -> Self {
        self.refetch_cooldown = cooldown;
        self
    }

    async fn fetch(&self) -> Result<JwkSet, KeyError> {
        let set = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await?;
        Ok(set)
    }

    async fn cached(&self, kid: &str) -> Option<Jwk> {
        let cache = self.cache.read().await;
        cache.set.as_ref().and_then(|set| set.find(kid)).cloned()
    }

    /// Refetch unless a fetch was already attempted inside the cooldown window.
    /// Returns whether the cache was replaced.
    async fn refresh(&self) -> Result<bool, KeyError> {
        let mut cache = self.cache.write().await;

        if let Some(at) = cache.last_attempt
            && at.elapsed() < self.refetch_cooldown
        {
            return match cache.set {
                Some(_) => Ok(false),
                None => Err(KeyError::CoolingDown),
            };
        }

        cache.last_attempt = Some(Instant::now());
        let set = self.fetch().await?;
        tracing::debug!(url = %self.url, keys = set.keys.len(), "fetched jwks");
        cache.set = Some(set);
        Ok(true)
    }
}

#[async_trait]
impl KeyResolver for JwksKeys {
    fn source_name(&self) -> &'static str {
        "jwks"
    }

    async fn resolve(&self, header: &Header) -> Result<DecodingKey, AuthError> {
        let kid = header
            .kid
            .as_deref()
            .ok_or(AuthError::invalid_header("Authorization malformed."))?;

        let jwk = match self.cached(kid).await {
            Some(jwk) => jwk,
            None => {
                if let Err(err) = self.refresh().await {
                    tracing::warn!(error = %err, url = %self.url, "jwks fetch failed");
                    return Err(AuthError::keys_unavailable());
                }
                self.cached(kid).await.ok_or(AuthError::key_not_found())?
            }
        };

        DecodingKey::from_jwk(&jwk).map_err(|err| {
            tracing::warn!(error = %err, kid, "unusable jwk");
            AuthError::key_not_found()
        })
    }
}
