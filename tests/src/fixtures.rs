//! Shared builders for signer/verifier pairs on a controllable clock.

use std::sync::Arc;

use hmac_auth::{
    ManualTimeSource, RequestSigner, RequestVerifier, SecretTable, SignerConfig, VerifierConfig,
};

/// Base secret used by the reference deployment.
pub const SHARED_SECRET: &str = "super-secret-b";

/// Unix time (seconds) at the start of a rotation slice for a 5 s period.
pub const SLICE_ALIGNED_SECS: i64 = 1_000;

pub type TestSigner = RequestSigner<Arc<ManualTimeSource>>;
pub type TestVerifier = RequestVerifier<SecretTable, Arc<ManualTimeSource>>;

/// A signer and a verifier reading independent clocks.
pub struct Deployment {
    pub signer_clock: Arc<ManualTimeSource>,
    pub verifier_clock: Arc<ManualTimeSource>,
    pub signer: TestSigner,
    pub verifier: TestVerifier,
}

impl Deployment {
    /// `core` signing with the shared secret; both clocks start at `secs`.
    pub fn at(secs: i64) -> Self {
        Self::with(
            SignerConfig::new("core", SHARED_SECRET),
            VerifierConfig::shared(SHARED_SECRET),
            secs,
        )
    }

    pub fn with(signer: SignerConfig, verifier: VerifierConfig, secs: i64) -> Self {
        let signer_clock = Arc::new(ManualTimeSource::from_secs(secs));
        let verifier_clock = Arc::new(ManualTimeSource::from_secs(secs));
        Self {
            signer: RequestSigner::with_time_source(signer, Arc::clone(&signer_clock))
                .expect("valid signer config"),
            verifier: RequestVerifier::with_time_source(verifier, Arc::clone(&verifier_clock))
                .expect("valid verifier config"),
            signer_clock,
            verifier_clock,
        }
    }

    /// Move both clocks together.
    pub fn advance_secs(&self, secs: i64) {
        self.signer_clock.advance_secs(secs);
        self.verifier_clock.advance_secs(secs);
    }
}

/// Verifier configured with one secret per identity.
pub fn multi_tenant_verifier(
    entries: &[(&str, &str)],
    secs: i64,
) -> RequestVerifier<SecretTable, ManualTimeSource> {
    RequestVerifier::with_time_source(
        VerifierConfig::new(
            SecretTable::per_service(entries.iter().copied()).expect("non-empty identities"),
        ),
        ManualTimeSource::from_secs(secs),
    )
    .expect("valid verifier config")
}

/// Signer for an arbitrary identity and secret at a fixed instant.
pub fn signer_for(service: &str, secret: &str, secs: i64) -> RequestSigner<ManualTimeSource> {
    RequestSigner::with_time_source(
        SignerConfig::new(service, secret),
        ManualTimeSource::from_secs(secs),
    )
    .expect("valid signer config")
}
