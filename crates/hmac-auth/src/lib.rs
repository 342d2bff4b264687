//! # HMAC Auth
//!
//! Mutual request authentication between internal services.
//!
//! A [`RequestSigner`] attaches rotating, time-derived HMAC-SHA256 signatures
//! to outbound requests. A [`RequestVerifier`] re-derives the same rotating
//! keys from the shared base secret and validates inbound signatures while
//! tolerating bounded clock drift between hosts.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Key derivation, canonicalization, timestamps,
//!   constant-time comparison. Pure functions, no I/O.
//! - **Ports Layer** (`ports/`): Signing/verification APIs and the clock and
//!   secret-table dependencies supplied by the host application.
//! - **Service Layer** (`service/`): `RequestSigner` and `RequestVerifier`.
//!
//! ## Wire Contract
//!
//! ```text
//! x-service:   <service identity>
//! X-Timestamp: 2024-01-01T00:00:00.000Z
//! X-Signature: base64(HMAC-SHA256(derived_key, canonical))
//!
//! derived_key = HMAC-SHA256(base_secret, decimal(floor(unix_secs / period)))
//! canonical   = METHOD \n path \n service \n timestamp
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hmac_auth::{RequestSigner, RequestVerifier, SignerConfig, VerifierConfig};
//!
//! let signer = RequestSigner::new(SignerConfig::new("core", "super-secret-b"))?;
//! let headers = signer.sign("GET", "http://localhost:8089/api/v2/nodes")?;
//!
//! let verifier = RequestVerifier::new(VerifierConfig::shared("super-secret-b"))?;
//! let result = verifier.verify("GET", "/api/v2/nodes", &headers);
//! assert!(result.valid);
//! ```
//!
//! ## Security Notes
//!
//! - Signatures are compared with `subtle::ConstantTimeEq`, never `==`
//! - Base secrets and derived keys are zeroized on drop and redacted in `Debug`
//! - Replay is bounded by `max_skew_seconds`; there is no nonce cache

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::{SecretTable, SignerConfig, VerifierConfig};
pub use domain::canonical::{build_canonical, normalize_method};
pub use domain::constant_time::{ct_eq, ct_eq_signature};
pub use domain::derivation::{derive, derive_key, sign_canonical, time_slice};
pub use domain::entities::{
    BaseSecret, CanonicalString, DerivedKey, RotationPeriod, RotationWindow, ServiceIdentity,
    SignedHeaders, TimeSlice, VerificationResult, HEADER_SERVICE, HEADER_SIGNATURE,
    HEADER_TIMESTAMP,
};
pub use domain::errors::{ConfigError, SignerError, VerificationFailure};
pub use domain::timestamp::{format_iso8601, parse_iso8601};
pub use ports::inbound::{HeaderLookup, RequestSigningApi, RequestVerificationApi};
pub use ports::outbound::{ManualTimeSource, SecretProvider, SystemTimeSource, TimeSource};
pub use service::key_cache::DerivedKeyCache;
pub use service::signer::RequestSigner;
pub use service::verifier::{RequestVerifier, VerifierPolicy};
