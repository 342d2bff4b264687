//! # Identity Spoofing and Request Rewriting
//!
//! An attacker who observes signed headers tries to reuse them under a
//! different identity, method or path.

#[cfg(test)]
mod tests {
    use hmac_auth::{
        RequestVerificationApi, ServiceIdentity, SignedHeaders, VerificationFailure,
    };

    use crate::fixtures::{multi_tenant_verifier, Deployment, SHARED_SECRET, SLICE_ALIGNED_SECS};

    const PATH: &str = "/node-type-list/1227866527542272";

    #[test]
    fn test_relabelled_identity_is_rejected_with_shared_secret() {
        let deployment = Deployment::at(SLICE_ALIGNED_SECS);
        let captured = deployment.signer.sign_at("GET", PATH, 1_000_000);

        let relabelled = SignedHeaders {
            service: ServiceIdentity::new("admin-console").unwrap(),
            ..captured
        };
        let result = deployment.verifier.verify("GET", PATH, &relabelled);
        assert_eq!(result.reason, Some(VerificationFailure::BadSignature));
        assert_eq!(result.service_identity.unwrap().as_str(), "admin-console");
    }

    #[test]
    fn test_unregistered_identity_is_rejected_before_crypto() {
        let verifier = multi_tenant_verifier(&[("core", SHARED_SECRET)], SLICE_ALIGNED_SECS);
        let forged = [
            ("x-service", "admin-console"),
            ("X-Timestamp", "1970-01-01T00:16:40.000Z"),
            ("X-Signature", "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA="),
        ];
        let result = verifier.verify("GET", PATH, &forged);
        assert_eq!(result.reason, Some(VerificationFailure::UnknownService));
    }

    #[test]
    fn test_method_and_path_rewrites_are_rejected() {
        let deployment = Deployment::at(SLICE_ALIGNED_SECS);
        let captured = deployment.signer.sign_at("GET", PATH, 1_000_000);

        for (method, path) in [
            ("DELETE", PATH),
            ("POST", PATH),
            ("GET", "/node-type-list/1227866527542273"),
            ("GET", "/node-type-list/1227866527542272/"),
            ("GET", "/NODE-TYPE-LIST/1227866527542272"),
        ] {
            let result = deployment.verifier.verify(method, path, &captured);
            assert_eq!(
                result.reason,
                Some(VerificationFailure::BadSignature),
                "{method} {path} accepted"
            );
        }
    }

    #[test]
    fn test_signature_cannot_be_grafted_onto_other_timestamp() {
        let deployment = Deployment::at(SLICE_ALIGNED_SECS);
        let early = deployment.signer.sign_at("GET", PATH, 1_000_000);
        let later = deployment.signer.sign_at("GET", PATH, 1_003_000);

        // Same slice, same key: only the timestamp binding tells them apart
        let grafted = SignedHeaders {
            timestamp: later.timestamp,
            ..early
        };
        let result = deployment.verifier.verify("GET", PATH, &grafted);
        assert_eq!(result.reason, Some(VerificationFailure::BadSignature));
    }
}
