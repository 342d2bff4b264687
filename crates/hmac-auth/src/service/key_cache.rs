//! Per-slice derived key cache.
//!
//! Deriving a key costs one HMAC per request. Under load a signer can
//! instead reuse the key for the current slice until the slice advances.
//!
//! ## Invalidation
//!
//! - Entries are keyed by `TimeSlice` for a single base secret
//! - Only the newest slice and its predecessor are retained
//! - Requests for slices older than that are derived but not cached

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::domain::derivation::{derive_key, time_slice};
use crate::domain::entities::{BaseSecret, DerivedKey, RotationPeriod, TimeSlice};

/// Thread-safe cache of derived keys for one base secret.
#[derive(Debug)]
pub struct DerivedKeyCache {
    secret: BaseSecret,
    period: RotationPeriod,
    entries: RwLock<BTreeMap<TimeSlice, DerivedKey>>,
}

impl DerivedKeyCache {
    pub fn new(secret: BaseSecret, period: RotationPeriod) -> Self {
        Self {
            secret,
            period,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Key in effect at `unix_millis + offset_seconds`.
    pub fn key_at(&self, unix_millis: i64, offset_seconds: i64) -> DerivedKey {
        self.key_for(time_slice(unix_millis, offset_seconds, self.period))
    }

    /// Key for an explicit slice, derived on miss.
    pub fn key_for(&self, slice: TimeSlice) -> DerivedKey {
        if let Some(key) = self.entries.read().get(&slice) {
            return key.clone();
        }

        let key = derive_key(&self.secret, slice);

        let mut entries = self.entries.write();
        let newest = entries
            .keys()
            .next_back()
            .copied()
            .map_or(slice, |cached| cached.max(slice));
        let oldest_kept = newest.value().saturating_sub(1);

        if slice.value() < oldest_kept {
            return key;
        }

        entries.insert(slice, key.clone());
        entries.retain(|cached, _| cached.value() >= oldest_kept);
        key
    }

    /// Number of cached slices.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every cached key.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
