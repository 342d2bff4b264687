//! # Cross-Tenant Secret Reuse
//!
//! With per-service secrets, a tenant that knows only its own secret must
//! not be able to act as another tenant.

#[cfg(test)]
mod tests {
    use hmac_auth::{RequestVerificationApi, RotationWindow, VerificationFailure};

    use crate::fixtures::{multi_tenant_verifier, signer_for, SLICE_ALIGNED_SECS};

    const PATH: &str = "/internal/status";
    const TENANTS: [(&str, &str); 2] = [
        ("core", "base-secret-a"),
        ("iot-connector", "base-secret-b"),
    ];

    #[test]
    fn test_each_tenant_verifies_with_its_own_secret() {
        let verifier = multi_tenant_verifier(&TENANTS, SLICE_ALIGNED_SECS);

        for (service, secret) in TENANTS {
            let headers =
                signer_for(service, secret, SLICE_ALIGNED_SECS).sign_at("GET", PATH, 1_000_000);
            let result = verifier.verify("GET", PATH, &headers);
            assert!(result.valid, "{service} rejected: {:?}", result.reason);
            assert_eq!(result.window, Some(RotationWindow::Current));
        }
    }

    #[test]
    fn test_tenant_cannot_sign_as_another() {
        let verifier = multi_tenant_verifier(&TENANTS, SLICE_ALIGNED_SECS);

        // iot-connector knows only its own secret but claims to be core
        let headers =
            signer_for("core", "base-secret-b", SLICE_ALIGNED_SECS).sign_at("GET", PATH, 1_000_000);
        let result = verifier.verify("GET", PATH, &headers);
        assert_eq!(result.reason, Some(VerificationFailure::BadSignature));
    }

    #[test]
    fn test_derived_key_of_one_tenant_is_useless_for_another() {
        let secret_a = hmac_auth::BaseSecret::new("base-secret-a").unwrap();
        let secret_b = hmac_auth::BaseSecret::new("base-secret-b").unwrap();
        let slice = hmac_auth::TimeSlice(200);

        let key_a = hmac_auth::derive_key(&secret_a, slice);
        let key_b = hmac_auth::derive_key(&secret_b, slice);
        assert!(!hmac_auth::ct_eq(key_a.as_bytes(), key_b.as_bytes()));
    }

    #[test]
    fn test_removed_tenant_is_unknown() {
        let verifier = multi_tenant_verifier(&TENANTS[..1], SLICE_ALIGNED_SECS);

        let headers = signer_for("iot-connector", "base-secret-b", SLICE_ALIGNED_SECS)
            .sign_at("GET", PATH, 1_000_000);
        let result = verifier.verify("GET", PATH, &headers);
        assert_eq!(result.reason, Some(VerificationFailure::UnknownService));
    }
}
