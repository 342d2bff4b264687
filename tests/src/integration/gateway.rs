//! # HTTP Flows
//!
//! The receiver router from `auth-node` driven two ways:
//!
//! 1. In-process through `tower::ServiceExt::oneshot`
//! 2. Over a loopback socket with `SignedClient`, as deployed

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use auth_gateway::SignedClient;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use hmac_auth::{
        ManualTimeSource, RequestSigner, RequestSigningApi, RequestVerifier, SignerConfig,
        SystemTimeSource, VerifierConfig,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    use crate::fixtures::{multi_tenant_verifier, signer_for, SHARED_SECRET, SLICE_ALIGNED_SECS};

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request_with(headers: &hmac_auth::SignedHeaders, uri: &str) -> Request<Body> {
        let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        *request.headers_mut() = headers.to_header_map().unwrap();
        request
    }

    // =============================================================================
    // IN-PROCESS
    // =============================================================================

    #[tokio::test]
    async fn test_each_failure_reason_reaches_the_wire() {
        let verifier = multi_tenant_verifier(&[("core", SHARED_SECRET)], SLICE_ALIGNED_SECS);
        let app = auth_node::receiver::router(verifier);

        let good = signer_for("core", SHARED_SECRET, SLICE_ALIGNED_SECS)
            .sign_path("GET", "/internal/status");
        let stranger = signer_for("billing", SHARED_SECRET, SLICE_ALIGNED_SECS)
            .sign_path("GET", "/internal/status");
        let stale = signer_for("core", SHARED_SECRET, SLICE_ALIGNED_SECS - 500)
            .sign_path("GET", "/internal/status");
        let wrong_key = signer_for("core", "not-the-secret", SLICE_ALIGNED_SECS)
            .sign_path("GET", "/internal/status");

        let cases = [
            (
                Request::builder()
                    .uri("/internal/status")
                    .body(Body::empty())
                    .unwrap(),
                "Missing headers",
            ),
            (request_with(&stranger, "/internal/status"), "Unknown microservice"),
            (request_with(&stale, "/internal/status"), "Timestamp skew"),
            (request_with(&wrong_key, "/internal/status"), "Bad signature"),
        ];

        for (request, reason) in cases {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                response.headers().get("www-authenticate").unwrap(),
                "HMAC-SHA256"
            );
            assert_eq!(json_body(response).await, json!({ "error": reason }));
        }

        let response = app
            .oneshot(request_with(&good, "/internal/status"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "ok": true, "from": "core" }));
    }

    #[tokio::test]
    async fn test_signature_for_other_route_is_rejected() {
        let verifier = multi_tenant_verifier(&[("core", SHARED_SECRET)], SLICE_ALIGNED_SECS);
        let app = auth_node::receiver::router(verifier);

        let headers = signer_for("core", SHARED_SECRET, SLICE_ALIGNED_SECS)
            .sign_path("GET", "/internal/other");
        let response = app
            .oneshot(request_with(&headers, "/internal/status"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // =============================================================================
    // LOOPBACK
    // =============================================================================

    async fn spawn_receiver(verifier: RequestVerifier) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = auth_node::receiver::router(verifier);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_signed_client_against_live_receiver() {
        let verifier = RequestVerifier::new(VerifierConfig::shared(SHARED_SECRET)).unwrap();
        let base = spawn_receiver(verifier).await;

        let signer = RequestSigner::new(SignerConfig::new("core", SHARED_SECRET)).unwrap();
        let client = SignedClient::new(signer);

        let response = client
            .get(&format!("{base}/internal/status?fields=all"))
            .unwrap()
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "ok": true, "from": "core" }));

        let health = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(health.status(), reqwest::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_consumer_reports_rejections() {
        let verifier = RequestVerifier::new(VerifierConfig::shared(SHARED_SECRET)).unwrap();
        let base = spawn_receiver(verifier).await;

        // Signer clock ten minutes behind the receiver
        let clock = Arc::new(ManualTimeSource::new(
            hmac_auth::TimeSource::now_millis(&SystemTimeSource) - 600_000,
        ));
        let signer =
            RequestSigner::with_time_source(SignerConfig::new("core", SHARED_SECRET), clock)
                .unwrap();
        let client = SignedClient::new(signer);

        let plan = auth_node::ConsumerPlan {
            url: format!("{base}/internal/status"),
            method: reqwest::Method::GET,
            interval: std::time::Duration::from_millis(1),
            count: 2,
        };
        let report = auth_node::consumer::run(&client, &plan).await;
        assert_eq!(report.sent, 2);
        assert_eq!(report.rejected, 2);
        assert!(!report.is_success());
    }

    #[tokio::test]
    async fn test_consumer_succeeds_against_matching_receiver() {
        let verifier = RequestVerifier::new(VerifierConfig::shared(SHARED_SECRET)).unwrap();
        let base = spawn_receiver(verifier).await;

        let signer = RequestSigner::new(SignerConfig::new("core", SHARED_SECRET)).unwrap();
        let client = SignedClient::new(signer);

        let plan = auth_node::ConsumerPlan {
            url: format!("{base}/internal/status"),
            method: reqwest::Method::GET,
            interval: std::time::Duration::from_millis(10),
            count: 3,
        };
        let report = auth_node::consumer::run(&client, &plan).await;
        assert_eq!(report.accepted, 3);
        assert!(report.is_success());
    }
}
