//! # Canonical Request
//!
//! ```text
//! <METHOD>\n<path>\n<service identity>\n<timestamp>
//! ```
//!
//! No normalization happens here. Any divergence between what the signer
//! signed and what the verifier reconstructs (trailing slash, case, query
//! string) breaks verification, so callers normalize before building.

use super::entities::CanonicalString;

const SEPARATOR: char = '\n';

/// Join the signable request fields into the canonical string.
pub fn build_canonical(
    method: &str,
    path: &str,
    service_identity: &str,
    timestamp: &str,
) -> CanonicalString {
    let mut canonical = String::with_capacity(
        method.len() + path.len() + service_identity.len() + timestamp.len() + 3,
    );
    canonical.push_str(method);
    canonical.push(SEPARATOR);
    canonical.push_str(path);
    canonical.push(SEPARATOR);
    canonical.push_str(service_identity);
    canonical.push(SEPARATOR);
    canonical.push_str(timestamp);
    CanonicalString::from_string(canonical)
}

/// Upper-case an HTTP method the way both sides expect it in the canonical string.
pub fn normalize_method(method: &str) -> String {
    method.to_ascii_uppercase()
}
