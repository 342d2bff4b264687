//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of the signer and verifier.
//! Implementations must be thread-safe (`Send + Sync`).

use std::collections::HashMap;

use crate::domain::entities::{
    SignedHeaders, VerificationResult, HEADER_SERVICE, HEADER_SIGNATURE, HEADER_TIMESTAMP,
};
use crate::domain::errors::SignerError;

/// Outbound request signing.
pub trait RequestSigningApi: Send + Sync {
    /// Sign a request to an absolute URL. The query string is not signed.
    fn sign(&self, method: &str, url: &str) -> Result<SignedHeaders, SignerError>;

    /// Sign a request for an already-extracted, normalized path.
    fn sign_path(&self, method: &str, path: &str) -> SignedHeaders;
}

/// Inbound request verification.
///
/// Every failure is reported inside the returned `VerificationResult`;
/// implementations never panic on malformed input.
pub trait RequestVerificationApi: Send + Sync {
    /// Verify a request using the receiver's own view of method and path.
    fn verify(&self, method: &str, path: &str, headers: &dyn HeaderLookup) -> VerificationResult;
}

/// Case-insensitive access to request headers.
pub trait HeaderLookup {
    /// The first value of header `name`, if present and valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;
}

impl HeaderLookup for HashMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.get(name) {
            return Some(value.as_str());
        }
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl<'a, const N: usize> HeaderLookup for [(&'a str, &'a str); N] {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }
}

impl HeaderLookup for Vec<(String, String)> {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl HeaderLookup for SignedHeaders {
    fn header(&self, name: &str) -> Option<&str> {
        if name.eq_ignore_ascii_case(HEADER_SERVICE) {
            Some(self.service.as_str())
        } else if name.eq_ignore_ascii_case(HEADER_TIMESTAMP) {
            Some(self.timestamp.as_str())
        } else if name.eq_ignore_ascii_case(HEADER_SIGNATURE) {
            Some(self.signature.as_str())
        } else {
            None
        }
    }
}

#[cfg(feature = "http")]
impl HeaderLookup for http::HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|value| value.to_str().ok())
    }
}
