//! # Secret Derivation
//!
//! Turns a shared base secret plus a coarse time slice into a short-lived
//! signing key:
//!
//! ```text
//! slice       = floor((unix_secs + offset_secs) / period)
//! derived_key = HMAC-SHA256(key = base_secret, msg = decimal(slice))
//! ```
//!
//! Both sides only need to agree on `period` and keep their clocks within one
//! slice of each other; no sub-second synchronization is required.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::entities::{BaseSecret, CanonicalString, DerivedKey, RotationPeriod, TimeSlice};
use super::entities::SIGNATURE_LEN;

type HmacSha256 = Hmac<Sha256>;

const MILLIS_PER_SEC: i64 = 1_000;

/// Compute the rotation slice for `unix_millis` shifted by `offset_seconds`.
///
/// Uses Euclidean division so pre-epoch instants floor toward negative
/// infinity rather than truncating toward zero.
pub fn time_slice(unix_millis: i64, offset_seconds: i64, period: RotationPeriod) -> TimeSlice {
    let shifted = unix_millis.saturating_add(offset_seconds.saturating_mul(MILLIS_PER_SEC));
    let period_millis = period.as_offset_secs().saturating_mul(MILLIS_PER_SEC);
    TimeSlice(shifted.div_euclid(period_millis))
}

/// Derive the signing key for one time slice.
pub fn derive_key(secret: &BaseSecret, slice: TimeSlice) -> DerivedKey {
    DerivedKey::from_bytes(hmac_sha256(secret.as_bytes(), slice.to_string().as_bytes()))
}

/// Derive the signing key in effect at `unix_millis + offset_seconds`.
pub fn derive(
    secret: &BaseSecret,
    unix_millis: i64,
    offset_seconds: i64,
    period: RotationPeriod,
) -> DerivedKey {
    derive_key(secret, time_slice(unix_millis, offset_seconds, period))
}

/// Compute the raw request signature: `HMAC-SHA256(derived_key, canonical)`.
pub fn sign_canonical(key: &DerivedKey, canonical: &CanonicalString) -> [u8; SIGNATURE_LEN] {
    hmac_sha256(key.as_bytes(), canonical.as_bytes())
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; SIGNATURE_LEN] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(message);
    mac.finalize().into_bytes().into()
}
