use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use reqwest::header::{CACHE_CONTROL, HeaderMap};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{AuthError, IdentityProvider, VerifiedIdentity};
use crate::config::AuthConfig;

/// Unknown key ids trigger a refetch at most this often.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);
/// Cache lifetime when the key endpoint sends no `max-age`.
const FALLBACK_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    email: Option<String>,
    name: Option<String>,
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
    expires_at: Instant,
}

/// Verifies Firebase ID tokens against Google's published signing keys.
pub struct FirebaseVerifier {
    project_id: String,
    jwks_url: String,
    http: reqwest::Client,
    cache: RwLock<Option<CachedKeys>>,
}

impl FirebaseVerifier {
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.jwks_timeout_secs))
            .build()?;
        Ok(Self {
            project_id: config.firebase_project_id.clone(),
            jwks_url: config.jwks_url.clone(),
            http,
            cache: RwLock::new(None),
        })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[format!(
            "https://securetoken.google.com/{}",
            self.project_id
        )]);
        validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);
        validation
    }

    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref()
                && cached.expires_at > Instant::now()
                && let Some(jwk) = cached.keys.find(kid)
            {
                return Ok(DecodingKey::from_jwk(jwk)?);
            }
        }

        let mut cache = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock.
        let stale = match cache.as_ref() {
            None => true,
            Some(cached) => {
                cached.expires_at <= Instant::now()
                    || (cached.keys.find(kid).is_none()
                        && cached.fetched_at.elapsed() >= MIN_REFRESH_INTERVAL)
            }
        };
        if stale {
            *cache = Some(self.fetch_keys().await?);
        }

        let jwk = cache
            .as_ref()
            .and_then(|cached| cached.keys.find(kid))
            .ok_or_else(|| AuthError::UnknownKey(kid.to_string()))?;
        Ok(DecodingKey::from_jwk(jwk)?)
    }

    async fn fetch_keys(&self) -> Result<CachedKeys, AuthError> {
        let response = self
            .http
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?;
        let ttl = max_age(response.headers()).unwrap_or(FALLBACK_TTL);
        let keys: JwkSet = response.json().await?;

        tracing::debug!(keys = keys.keys.len(), ttl_secs = ttl.as_secs(), "Fetched JWKS");
        let now = Instant::now();
        Ok(CachedKeys {
            keys,
            fetched_at: now,
            expires_at: now + ttl,
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        let header = decode_header(token)?;
        if header.alg != Algorithm::RS256 {
            return Err(AuthError::UnsupportedAlgorithm(header.alg));
        }
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;

        let key = self.decoding_key(&kid).await?;
        let claims = decode::<FirebaseClaims>(token, &key, &self.validation())?.claims;

        if claims.sub.is_empty() {
            return Err(AuthError::EmptySubject);
        }
        let email = claims
            .email
            .filter(|e| !e.is_empty())
            .ok_or(AuthError::MissingEmail)?;

        Ok(VerifiedIdentity {
            email,
            display_name: claims.name,
        })
    }
}

/// `max-age` of a `Cache-Control` header, if present.
fn max_age(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get_all(CACHE_CONTROL)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .find_map(|directive| {
            let (name, value) = directive.trim().split_once('=')?;
            if name.trim().eq_ignore_ascii_case("max-age") {
                value.trim().parse::<u64>().ok().map(Duration::from_secs)
            } else {
                None
            }
        })
}
