//! # Domain Entities
//!
//! Core value types shared by the signer and the verifier.
//! Nothing here is mutated after construction; the only lifecycle is the
//! time slice advancing with the wall clock.

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::errors::{ConfigError, VerificationFailure};

/// Header carrying the claimed service identity.
pub const HEADER_SERVICE: &str = "x-service";

/// Header carrying the ISO-8601 signing time.
pub const HEADER_TIMESTAMP: &str = "X-Timestamp";

/// Header carrying the base64 HMAC-SHA256 signature.
pub const HEADER_SIGNATURE: &str = "X-Signature";

/// Length of an HMAC-SHA256 output in bytes.
pub const SIGNATURE_LEN: usize = 32;

// =============================================================================
// Identity and Secrets
// =============================================================================

/// Opaque name of a calling service (e.g. `"core"`).
///
/// Used both as the signing claim and as the lookup key into the
/// verifier's secret table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceIdentity(String);

impl ServiceIdentity {
    /// Create an identity, rejecting the empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ConfigError::EmptyServiceIdentity);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ServiceIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Long-lived shared secret from which rotating keys are derived.
///
/// Provisioned out-of-band and never transmitted. Wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop, Deserialize)]
#[serde(from = "String")]
pub struct BaseSecret(Vec<u8>);

impl BaseSecret {
    /// Create a secret from raw bytes, rejecting empty input.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ConfigError::EmptyBaseSecret);
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Emptiness is checked by `validate()` on the config that carries the secret.
impl From<String> for BaseSecret {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl fmt::Debug for BaseSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BaseSecret([REDACTED; {}])", self.0.len())
    }
}

// =============================================================================
// Time Slicing
// =============================================================================

/// Key rotation period in whole seconds. Always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RotationPeriod(NonZeroU64);

impl RotationPeriod {
    /// Default period used by both sides when not configured.
    pub const DEFAULT_SECONDS: u64 = 5;

    pub fn from_secs(seconds: u64) -> Result<Self, ConfigError> {
        NonZeroU64::new(seconds)
            .map(Self)
            .ok_or(ConfigError::ZeroRotationPeriod)
    }

    pub fn as_secs(&self) -> u64 {
        self.0.get()
    }

    /// The period as a signed offset, saturating for absurdly large periods.
    pub fn as_offset_secs(&self) -> i64 {
        i64::try_from(self.0.get()).unwrap_or(i64::MAX)
    }
}

impl Default for RotationPeriod {
    fn default() -> Self {
        Self(NonZeroU64::MIN.saturating_add(Self::DEFAULT_SECONDS - 1))
    }
}

/// Index of a rotation window: `floor(unix_seconds / period)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlice(pub i64);

impl TimeSlice {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TimeSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which rotation window a verifier probe targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationWindow {
    Current,
    Previous,
    Next,
}

impl RotationWindow {
    /// Fixed probe order: now, previous, next.
    pub const PROBE_ORDER: [RotationWindow; 3] = [
        RotationWindow::Current,
        RotationWindow::Previous,
        RotationWindow::Next,
    ];

    /// Clock offset (seconds) applied before slicing.
    pub fn offset_seconds(&self, period: RotationPeriod) -> i64 {
        match self {
            RotationWindow::Current => 0,
            RotationWindow::Previous => -period.as_offset_secs(),
            RotationWindow::Next => period.as_offset_secs(),
        }
    }
}

/// Short-lived signing key derived from a base secret and a time slice.
///
/// Never persisted. Wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; SIGNATURE_LEN]);

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

// =============================================================================
// Canonical Request and Headers
// =============================================================================

/// Deterministic serialization of the signable request fields.
///
/// Never transmitted; both sides rebuild it and must agree byte-for-byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalString(String);

impl CanonicalString {
    pub(crate) fn from_string(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for CanonicalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authentication headers produced by the signer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedHeaders {
    /// Value of `x-service`
    pub service: ServiceIdentity,
    /// Value of `X-Timestamp`
    pub timestamp: String,
    /// Value of `X-Signature`
    pub signature: String,
}

impl SignedHeaders {
    /// Header `(name, value)` pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (HEADER_SERVICE, self.service.as_str()),
            (HEADER_TIMESTAMP, self.timestamp.as_str()),
            (HEADER_SIGNATURE, self.signature.as_str()),
        ]
        .into_iter()
    }

    /// Convert into an `http::HeaderMap`.
    ///
    /// Fails only when the service identity contains bytes that are not
    /// legal in an HTTP header value.
    #[cfg(feature = "http")]
    pub fn to_header_map(&self) -> Result<http::HeaderMap, http::header::InvalidHeaderValue> {
        use http::header::{HeaderName, HeaderValue};

        // HeaderName::from_static only accepts lowercase input.
        let names = [
            HeaderName::from_static("x-service"),
            HeaderName::from_static("x-timestamp"),
            HeaderName::from_static("x-signature"),
        ];

        let mut map = http::HeaderMap::with_capacity(names.len());
        for (name, (_, value)) in names.into_iter().zip(self.iter()) {
            map.insert(name, HeaderValue::from_str(value)?);
        }
        Ok(map)
    }
}

// =============================================================================
// Verification Outcome
// =============================================================================

/// Outcome of verifying one inbound request.
///
/// Produced fresh per request; never cached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    /// Whether the request is authentic
    pub valid: bool,
    /// The claimed identity (absent when any auth header is missing)
    pub service_identity: Option<ServiceIdentity>,
    /// Why verification failed
    pub reason: Option<VerificationFailure>,
    /// Which rotation window matched (success only)
    pub window: Option<RotationWindow>,
}

impl VerificationResult {
    /// Create a successful result.
    pub fn accepted(service_identity: ServiceIdentity, window: RotationWindow) -> Self {
        Self {
            valid: true,
            service_identity: Some(service_identity),
            reason: None,
            window: Some(window),
        }
    }

    /// Create a failed result.
    pub fn rejected(
        service_identity: Option<ServiceIdentity>,
        reason: VerificationFailure,
    ) -> Self {
        Self {
            valid: false,
            service_identity,
            reason: Some(reason),
            window: None,
        }
    }

    /// Collapse into a `Result` for `?`-style callers.
    pub fn into_result(self) -> Result<ServiceIdentity, VerificationFailure> {
        match (self.valid, self.service_identity, self.reason) {
            (true, Some(identity), _) => Ok(identity),
            (_, _, Some(reason)) => Err(reason),
            _ => Err(VerificationFailure::BadSignature),
        }
    }
}
