//! # Request Verifier
//!
//! Validates `x-service`, `X-Timestamp` and `X-Signature` on an inbound
//! request. Checks run in a fixed order and stop at the first failure:
//!
//! 1. All three headers present and non-empty (`MissingHeaders`)
//! 2. Claimed identity has a configured base secret (`UnknownService`)
//! 3. Timestamp parses and lies within `max_skew_seconds` (`TimestampSkew`)
//! 4. Signature matches under the current, previous or next slice key
//!    (`BadSignature`)
//!
//! The canonical string is rebuilt from the receiver's own method and path,
//! never from anything the caller claims about them.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{debug, trace};

use crate::config::{SecretTable, VerifierConfig, DEFAULT_MAX_SKEW_SECONDS};
use crate::domain::canonical::{build_canonical, normalize_method};
use crate::domain::constant_time::ct_eq_signature;
use crate::domain::derivation::{derive, sign_canonical};
use crate::domain::entities::{
    BaseSecret, CanonicalString, RotationPeriod, RotationWindow, ServiceIdentity,
    VerificationResult, HEADER_SERVICE, HEADER_SIGNATURE, HEADER_TIMESTAMP, SIGNATURE_LEN,
};
use crate::domain::errors::{ConfigError, VerificationFailure};
use crate::domain::timestamp::parse_iso8601;
use crate::ports::inbound::{HeaderLookup, RequestVerificationApi};
use crate::ports::outbound::{SecretProvider, SystemTimeSource, TimeSource};

/// Timing rules the verifier enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifierPolicy {
    /// Maximum allowed |now - X-Timestamp| in seconds
    pub max_skew_seconds: u64,
    /// Rotation period shared with every signer
    pub rotation_period: RotationPeriod,
}

impl Default for VerifierPolicy {
    fn default() -> Self {
        Self {
            max_skew_seconds: DEFAULT_MAX_SKEW_SECONDS,
            rotation_period: RotationPeriod::default(),
        }
    }
}

impl VerifierPolicy {
    fn max_skew_millis(&self) -> u64 {
        self.max_skew_seconds.saturating_mul(1_000)
    }
}

/// Verifies inbound requests against a table of shared base secrets.
///
/// Stateless apart from its configuration; keys are re-derived for every
/// request so a verifier can be shared freely across tasks.
#[derive(Debug)]
pub struct RequestVerifier<P: SecretProvider = SecretTable, T: TimeSource = SystemTimeSource> {
    secrets: P,
    policy: VerifierPolicy,
    time: T,
}

impl RequestVerifier<SecretTable, SystemTimeSource> {
    /// Create a verifier reading the system clock.
    pub fn new(config: VerifierConfig) -> Result<Self, ConfigError> {
        Self::with_time_source(config, SystemTimeSource)
    }
}

impl<T: TimeSource> RequestVerifier<SecretTable, T> {
    /// Create a verifier with an explicit clock.
    pub fn with_time_source(config: VerifierConfig, time: T) -> Result<Self, ConfigError> {
        config.validate()?;
        let policy = VerifierPolicy {
            max_skew_seconds: config.max_skew_seconds,
            rotation_period: RotationPeriod::from_secs(config.period_seconds)?,
        };
        Ok(Self::with_parts(config.base_secrets, policy, time))
    }
}

impl<P: SecretProvider, T: TimeSource> RequestVerifier<P, T> {
    /// Assemble a verifier from a custom secret provider.
    pub fn with_parts(secrets: P, policy: VerifierPolicy, time: T) -> Self {
        Self {
            secrets,
            policy,
            time,
        }
    }

    pub fn policy(&self) -> VerifierPolicy {
        self.policy
    }

    /// Verify a request as of `now_millis`.
    pub fn verify_at(
        &self,
        method: &str,
        path: &str,
        headers: &dyn HeaderLookup,
        now_millis: i64,
    ) -> VerificationResult {
        let result = self.check(method, path, headers, now_millis);

        match (&result.reason, &result.window) {
            (Some(reason), _) => debug!(
                service = result.service_identity.as_ref().map(|s| s.as_str()).unwrap_or("-"),
                reason = reason.code(),
                "Rejected request"
            ),
            (None, Some(window)) => trace!(
                service = result.service_identity.as_ref().map(|s| s.as_str()).unwrap_or("-"),
                window = ?window,
                "Verified request"
            ),
            (None, None) => {}
        }

        result
    }

    fn check(
        &self,
        method: &str,
        path: &str,
        headers: &dyn HeaderLookup,
        now_millis: i64,
    ) -> VerificationResult {
        let present = |name: &str| headers.header(name).filter(|value| !value.is_empty());

        let (service, timestamp, signature) = match (
            present(HEADER_SERVICE),
            present(HEADER_TIMESTAMP),
            present(HEADER_SIGNATURE),
        ) {
            (Some(service), Some(timestamp), Some(signature)) => (service, timestamp, signature),
            // No identity is attributed until all three headers are present
            _ => return VerificationResult::rejected(None, VerificationFailure::MissingHeaders),
        };

        // Non-empty was checked above
        let Ok(identity) = ServiceIdentity::new(service) else {
            return VerificationResult::rejected(None, VerificationFailure::MissingHeaders);
        };

        let Some(secret) = self.secrets.secret_for(&identity) else {
            return VerificationResult::rejected(Some(identity), VerificationFailure::UnknownService);
        };

        if !self.within_skew(timestamp, now_millis) {
            return VerificationResult::rejected(Some(identity), VerificationFailure::TimestampSkew);
        }

        let canonical =
            build_canonical(&normalize_method(method), path, identity.as_str(), timestamp);

        match self.matching_window(secret, &canonical, signature, now_millis) {
            Some(window) => VerificationResult::accepted(identity, window),
            None => VerificationResult::rejected(Some(identity), VerificationFailure::BadSignature),
        }
    }

    fn within_skew(&self, timestamp: &str, now_millis: i64) -> bool {
        match parse_iso8601(timestamp) {
            Some(claimed) => now_millis.abs_diff(claimed) <= self.policy.max_skew_millis(),
            None => false,
        }
    }

    /// First window whose derived key reproduces `signature`.
    fn matching_window(
        &self,
        secret: &BaseSecret,
        canonical: &CanonicalString,
        signature: &str,
        now_millis: i64,
    ) -> Option<RotationWindow> {
        let provided: [u8; SIGNATURE_LEN] = STANDARD.decode(signature).ok()?.try_into().ok()?;

        let period = self.policy.rotation_period;
        RotationWindow::PROBE_ORDER.into_iter().find(|window| {
            let key = derive(secret, now_millis, window.offset_seconds(period), period);
            ct_eq_signature(&sign_canonical(&key, canonical), &provided)
        })
    }
}

impl<P: SecretProvider, T: TimeSource> RequestVerificationApi for RequestVerifier<P, T> {
    fn verify(&self, method: &str, path: &str, headers: &dyn HeaderLookup) -> VerificationResult {
        self.verify_at(method, path, headers, self.time.now_millis())
    }
}
