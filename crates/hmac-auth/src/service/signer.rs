//! # Request Signer
//!
//! Produces `x-service`, `X-Timestamp` and `X-Signature` for an outbound
//! request:
//!
//! 1. Extract the path from the target URL (query and fragment dropped)
//! 2. Read the clock once; format it as the ISO-8601 timestamp
//! 3. Derive the key for the current slice (offset 0)
//! 4. Build the canonical string and HMAC it under the derived key
//!
//! Query parameters are deliberately not signed. If they affect
//! authorization, put them in the path or use a separate mechanism.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::trace;
use url::Url;

use crate::config::SignerConfig;
use crate::domain::canonical::{build_canonical, normalize_method};
use crate::domain::derivation::{derive, sign_canonical, time_slice};
use crate::domain::entities::{
    BaseSecret, DerivedKey, RotationPeriod, ServiceIdentity, SignedHeaders,
};
use crate::domain::errors::{ConfigError, SignerError};
use crate::domain::timestamp::format_iso8601;
use crate::ports::inbound::RequestSigningApi;
use crate::ports::outbound::{SystemTimeSource, TimeSource};
use crate::service::key_cache::DerivedKeyCache;

/// Signs outbound requests on behalf of one service identity.
///
/// Immutable after construction and safe to share across tasks.
#[derive(Debug)]
pub struct RequestSigner<T: TimeSource = SystemTimeSource> {
    service_identity: ServiceIdentity,
    base_secret: BaseSecret,
    period: RotationPeriod,
    key_cache: Option<DerivedKeyCache>,
    time: T,
}

impl RequestSigner<SystemTimeSource> {
    /// Create a signer reading the system clock.
    pub fn new(config: SignerConfig) -> Result<Self, ConfigError> {
        Self::with_time_source(config, SystemTimeSource)
    }
}

impl<T: TimeSource> RequestSigner<T> {
    /// Create a signer with an explicit clock.
    pub fn with_time_source(config: SignerConfig, time: T) -> Result<Self, ConfigError> {
        let (service_identity, period) = config.parts()?;
        let key_cache = config
            .cache_derived_keys
            .then(|| DerivedKeyCache::new(config.base_secret.clone(), period));

        Ok(Self {
            service_identity,
            base_secret: config.base_secret,
            period,
            key_cache,
            time,
        })
    }

    pub fn service_identity(&self) -> &ServiceIdentity {
        &self.service_identity
    }

    pub fn period(&self) -> RotationPeriod {
        self.period
    }

    /// Sign `method path` as of `now_millis`.
    pub fn sign_at(&self, method: &str, path: &str, now_millis: i64) -> SignedHeaders {
        let timestamp = format_iso8601(now_millis);
        let key = self.current_key(now_millis);

        let canonical = build_canonical(
            &normalize_method(method),
            path,
            self.service_identity.as_str(),
            &timestamp,
        );
        let signature = STANDARD.encode(sign_canonical(&key, &canonical));

        trace!(
            service = %self.service_identity,
            slice = %time_slice(now_millis, 0, self.period),
            "Signed request"
        );

        SignedHeaders {
            service: self.service_identity.clone(),
            timestamp,
            signature,
        }
    }

    fn current_key(&self, now_millis: i64) -> DerivedKey {
        match &self.key_cache {
            Some(cache) => cache.key_at(now_millis, 0),
            None => derive(&self.base_secret, now_millis, 0, self.period),
        }
    }
}

impl<T: TimeSource> RequestSigningApi for RequestSigner<T> {
    fn sign(&self, method: &str, url: &str) -> Result<SignedHeaders, SignerError> {
        let path = extract_path(url)?;
        Ok(self.sign_at(method, &path, self.time.now_millis()))
    }

    fn sign_path(&self, method: &str, path: &str) -> SignedHeaders {
        self.sign_at(method, path, self.time.now_millis())
    }
}

/// Extract the path component of an absolute URL.
///
/// Parsed with WHATWG URL rules, the same ones HTTP clients apply before a
/// request goes on the wire: dot segments are resolved and non-ASCII or
/// reserved characters are percent-encoded. Query and fragment are dropped
/// and a URL with no path yields `/`.
pub fn extract_path(url: &str) -> Result<String, SignerError> {
    let parse_error = |message: String| SignerError::ParseError {
        url: url.to_string(),
        message,
    };

    let parsed = Url::parse(url).map_err(|err| parse_error(err.to_string()))?;
    if parsed.cannot_be_a_base() {
        return Err(parse_error("URL has no hierarchical path".to_string()));
    }

    Ok(parsed.path().to_string())
}
