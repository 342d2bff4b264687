//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the host application supplies: a clock and the table of
//! shared base secrets. Secret provisioning itself is out of scope; the
//! crate only reads from whatever the host hands it.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::entities::{BaseSecret, ServiceIdentity};

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
            // Clock before the epoch: report a negative instant rather than panic
            Err(before) => i64::try_from(before.duration().as_millis())
                .map(|ms| -ms)
                .unwrap_or(i64::MIN),
        }
    }
}

/// Settable clock for tests and simulations.
///
/// Share it between a signer and a verifier through an `Arc` to model two
/// hosts, or use two instances to model clock drift.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    millis: AtomicI64,
}

impl ManualTimeSource {
    /// Start at the given Unix time in milliseconds.
    pub fn new(unix_millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(unix_millis),
        }
    }

    /// Start at the given Unix time in whole seconds.
    pub fn from_secs(unix_secs: i64) -> Self {
        Self::new(unix_secs.saturating_mul(1_000))
    }

    pub fn set_millis(&self, unix_millis: i64) {
        self.millis.store(unix_millis, Ordering::SeqCst);
    }

    pub fn set_secs(&self, unix_secs: i64) {
        self.set_millis(unix_secs.saturating_mul(1_000));
    }

    pub fn advance_millis(&self, delta: i64) {
        self.millis.fetch_add(delta, Ordering::SeqCst);
    }

    pub fn advance_secs(&self, delta: i64) {
        self.advance_millis(delta.saturating_mul(1_000));
    }
}

impl TimeSource for ManualTimeSource {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Lookup of base secrets by claimed service identity.
///
/// Implementations are read-only after construction; the verifier calls this
/// concurrently from every request-handling task without locking.
pub trait SecretProvider: Send + Sync {
    /// The base secret for `service`, or `None` if the identity is unknown.
    fn secret_for(&self, service: &ServiceIdentity) -> Option<&BaseSecret>;
}

impl<P: SecretProvider + ?Sized> SecretProvider for Arc<P> {
    fn secret_for(&self, service: &ServiceIdentity) -> Option<&BaseSecret> {
        (**self).secret_for(service)
    }
}
