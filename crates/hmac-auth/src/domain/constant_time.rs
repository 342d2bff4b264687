//! Constant-time byte comparison.

use subtle::ConstantTimeEq;

use crate::domain::entities::SIGNATURE_LEN;

/// Compare two byte strings without leaking where they first differ.
///
/// SECURITY: Only the lengths are compared in variable time. Signature
/// lengths are public, so this leaks nothing about the bytes.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Compare two HMAC-SHA256 outputs.
pub fn ct_eq_signature(a: &[u8; SIGNATURE_LEN], b: &[u8; SIGNATURE_LEN]) -> bool {
    a[..].ct_eq(&b[..]).into()
}
