//! # Auth Errors
//!
//! Verification failures are ordinary outcomes, not exceptional conditions:
//! the verifier reports them inside a `VerificationResult` and the embedding
//! service decides the HTTP status. Signer and configuration errors are
//! returned as `Result`s.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an inbound request failed verification.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationFailure {
    /// One of `x-service`, `X-Timestamp`, `X-Signature` is absent or empty
    #[error("Missing headers")]
    MissingHeaders,

    /// No base secret is configured for the claimed identity
    #[error("Unknown microservice")]
    UnknownService,

    /// Timestamp is unparsable or outside the allowed skew
    #[error("Timestamp skew")]
    TimestampSkew,

    /// No rotation window produced a matching signature
    #[error("Bad signature")]
    BadSignature,
}

impl VerificationFailure {
    /// Stable machine-readable code, suitable for metrics labels.
    pub fn code(&self) -> &'static str {
        match self {
            VerificationFailure::MissingHeaders => "missing_headers",
            VerificationFailure::UnknownService => "unknown_service",
            VerificationFailure::TimestampSkew => "timestamp_skew",
            VerificationFailure::BadSignature => "bad_signature",
        }
    }
}

/// Errors raised while signing an outbound request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignerError {
    /// The target URL could not be parsed into a path
    #[error("Invalid target URL '{url}': {message}")]
    ParseError { url: String, message: String },
}

/// Errors raised while validating signer/verifier configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("service identity cannot be empty")]
    EmptyServiceIdentity,

    #[error("base secret cannot be empty")]
    EmptyBaseSecret,

    #[error("rotation period must be greater than zero seconds")]
    ZeroRotationPeriod,

    #[error("verifier has no base secrets configured")]
    NoSecretsConfigured,

    #[error("empty base secret configured for service '{0}'")]
    EmptySecretForService(String),
}
