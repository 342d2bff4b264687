//! # Replay
//!
//! There is no nonce cache: a captured request replays successfully while
//! both the skew check and the rotation window still accept it. These
//! tests pin down where that acceptance ends.

#[cfg(test)]
mod tests {
    use hmac_auth::{RequestVerificationApi, VerificationFailure};

    use crate::fixtures::{Deployment, SLICE_ALIGNED_SECS};

    const PATH: &str = "/api/v2/nodes";

    #[test]
    fn test_immediate_replay_is_accepted() {
        let deployment = Deployment::at(SLICE_ALIGNED_SECS);
        let captured = deployment.signer.sign_at("GET", PATH, 1_000_000);

        assert!(deployment.verifier.verify("GET", PATH, &captured).valid);
        assert!(deployment.verifier.verify("GET", PATH, &captured).valid);
    }

    #[test]
    fn test_replay_after_two_slices_is_rejected() {
        let deployment = Deployment::at(SLICE_ALIGNED_SECS);
        let captured = deployment.signer.sign_at("GET", PATH, 1_000_000);

        deployment.verifier_clock.advance_secs(10);
        let result = deployment.verifier.verify("GET", PATH, &captured);
        assert_eq!(result.reason, Some(VerificationFailure::BadSignature));
    }

    #[test]
    fn test_replay_outside_skew_is_rejected_before_signature_check() {
        let deployment = Deployment::at(SLICE_ALIGNED_SECS);
        let captured = deployment.signer.sign_at("GET", PATH, 1_000_000);

        deployment.verifier_clock.set_secs(1_200);
        let result = deployment.verifier.verify("GET", PATH, &captured);
        assert_eq!(result.reason, Some(VerificationFailure::TimestampSkew));
    }

    #[test]
    fn test_refreshed_timestamp_does_not_revive_old_signature() {
        let deployment = Deployment::at(SLICE_ALIGNED_SECS);
        let mut captured = deployment.signer.sign_at("GET", PATH, 1_000_000);

        deployment.verifier_clock.set_secs(1_200);
        captured.timestamp = hmac_auth::format_iso8601(1_200_000);
        let result = deployment.verifier.verify("GET", PATH, &captured);
        assert_eq!(result.reason, Some(VerificationFailure::BadSignature));
    }

    #[test]
    fn test_future_dated_request_is_rejected() {
        let deployment = Deployment::at(SLICE_ALIGNED_SECS);
        let preimage = deployment.signer.sign_at("GET", PATH, 1_150_000);

        let result = deployment.verifier.verify("GET", PATH, &preimage);
        assert_eq!(result.reason, Some(VerificationFailure::TimestampSkew));
    }
}
