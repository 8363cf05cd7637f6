use crate::{AuthError, KeySource, Result as AuthErrorResult, VerificationKey};

use std::panic::Location;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use error_location::ErrorLocation;
use jsonwebtoken::jwk::{Jwk, JwkSet, KeyAlgorithm};
use jsonwebtoken::{Algorithm, DecodingKey};
use log::{debug, info, warn};
use tokio::sync::RwLock;

pub const DEFAULT_JWKS_CACHE_TTL: Duration = Duration::from_secs(3600);

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

impl CachedKeys {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Provider JWKS endpoint with an in-memory cache.
///
/// Keys are refetched once the TTL lapses, and once more whenever a token
/// names a key id the cached set does not contain.
pub struct JwksKeySource {
    url: String,
    ttl: Duration,
    client: reqwest::Client,
    cache: RwLock<Option<CachedKeys>>,
}

impl JwksKeySource {
    #[track_caller]
    pub fn new(url: impl Into<String>, ttl: Duration) -> AuthErrorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| AuthError::ProviderConfig {
                message: format!("Failed to build HTTP client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            url: url.into(),
            ttl,
            client,
            cache: RwLock::new(None),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> AuthErrorResult<JwkSet> {
        let unavailable = |e: reqwest::Error| AuthError::ProviderUnavailable {
            message: format!("Failed to fetch signing keys from {}: {}", self.url, e),
            location: ErrorLocation::from(Location::caller()),
        };

        let keys = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json::<JwkSet>()
            .await
            .map_err(unavailable)?;

        info!("Fetched {} signing keys from {}", keys.keys.len(), self.url);
        Ok(keys)
    }

    /// Current key set, refreshing when stale or when `force` is set
    async fn keys(&self, force: bool) -> AuthErrorResult<JwkSet> {
        let requested_at = Instant::now();

        if !force {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref()
                && cached.is_fresh(self.ttl)
            {
                return Ok(cached.keys.clone());
            }
        }

        let mut cache = self.cache.write().await;

        // Another task may have refreshed while we waited for the write lock
        if let Some(cached) = cache.as_ref()
            && cached.is_fresh(self.ttl)
            && (!force || cached.fetched_at >= requested_at)
        {
            return Ok(cached.keys.clone());
        }

        let keys = self.fetch().await?;
        *cache = Some(CachedKeys {
            keys: keys.clone(),
            fetched_at: Instant::now(),
        });

        Ok(keys)
    }

    #[track_caller]
    fn to_verification_key(jwk: &Jwk) -> AuthErrorResult<VerificationKey> {
        let algorithm = match &jwk.common.key_algorithm {
            None => Algorithm::RS256,
            Some(alg) => signing_algorithm(alg).ok_or_else(|| AuthError::InvalidToken {
                message: format!("key uses a non-signing algorithm: {:?}", alg),
                location: ErrorLocation::from(Location::caller()),
            })?,
        };

        let key = DecodingKey::from_jwk(jwk).map_err(|e| AuthError::InvalidToken {
            message: format!("unusable signing key: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(VerificationKey { key, algorithm })
    }
}

#[async_trait]
impl KeySource for JwksKeySource {
    async fn verification_key(&self, kid: Option<&str>) -> AuthErrorResult<VerificationKey> {
        let Some(kid) = kid else {
            return Err(AuthError::InvalidToken {
                message: "token header has no key id".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let keys = self.keys(false).await?;
        if let Some(jwk) = keys.find(kid) {
            return Self::to_verification_key(jwk);
        }

        debug!("Key id {} not in cached set, refreshing", kid);
        let keys = self.keys(true).await?;
        match keys.find(kid) {
            Some(jwk) => Self::to_verification_key(jwk),
            None => {
                warn!("Token signed with unknown key id {}", kid);
                Err(AuthError::InvalidToken {
                    message: format!("unknown key id: {}", kid),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }
}

fn signing_algorithm(alg: &KeyAlgorithm) -> Option<Algorithm> {
    match alg {
        KeyAlgorithm::HS256 => Some(Algorithm::HS256),
        KeyAlgorithm::HS384 => Some(Algorithm::HS384),
        KeyAlgorithm::HS512 => Some(Algorithm::HS512),
        KeyAlgorithm::ES256 => Some(Algorithm::ES256),
        KeyAlgorithm::ES384 => Some(Algorithm::ES384),
        KeyAlgorithm::RS256 => Some(Algorithm::RS256),
        KeyAlgorithm::RS384 => Some(Algorithm::RS384),
        KeyAlgorithm::RS512 => Some(Algorithm::RS512),
        KeyAlgorithm::PS256 => Some(Algorithm::PS256),
        KeyAlgorithm::PS384 => Some(Algorithm::PS384),
        KeyAlgorithm::PS512 => Some(Algorithm::PS512),
        KeyAlgorithm::EdDSA => Some(Algorithm::EdDSA),
        _ => None,
    }
}
