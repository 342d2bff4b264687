//! Signature verification middleware.
//!
//! Verifies every request with the configured [`RequestVerificationApi`]
//! using the request's own method and path (query excluded). Authentic
//! requests are forwarded with an [`AuthenticatedService`] extension;
//! everything else is answered with 401 and never reaches the handler.

use std::sync::Arc;

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use hmac_auth::{RequestVerificationApi, VerificationFailure};
use tower::{Layer, Service};
use tracing::{debug, debug_span, warn, Instrument};

use crate::error::AuthRejection;
use crate::extract::AuthenticatedService;

/// Signature authentication layer
#[derive(Clone)]
pub struct SignatureAuthLayer {
    verifier: Arc<dyn RequestVerificationApi>,
}

impl SignatureAuthLayer {
    pub fn new(verifier: impl RequestVerificationApi + 'static) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }

    /// Share one verifier between several layers or routers.
    pub fn from_shared(verifier: Arc<dyn RequestVerificationApi>) -> Self {
        Self { verifier }
    }
}

impl<S> Layer<S> for SignatureAuthLayer {
    type Service = SignatureAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SignatureAuthService {
            inner,
            verifier: Arc::clone(&self.verifier),
        }
    }
}

/// Signature authentication service
#[derive(Clone)]
pub struct SignatureAuthService<S> {
    inner: S,
    verifier: Arc<dyn RequestVerificationApi>,
}

impl<S> Service<Request<Body>> for SignatureAuthService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let span = debug_span!(
            "signature_auth",
            method = %req.method(),
            path = req.uri().path()
        );

        let result = {
            let _entered = span.enter();
            self.verifier
                .verify(req.method().as_str(), req.uri().path(), req.headers())
        };

        let identity = match result.into_result() {
            Ok(identity) => identity,
            Err(failure) => {
                log_rejection(&req, failure);
                return Box::pin(async move { Ok(AuthRejection::from(failure).into_response()) });
            }
        };

        span.in_scope(|| debug!(service = %identity, "Request authenticated"));
        req.extensions_mut().insert(AuthenticatedService(identity));

        // Hand the readied service to the future and keep the fresh clone
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(req).await }.instrument(span))
    }
}

fn log_rejection<B>(req: &Request<B>, failure: VerificationFailure) {
    let claimed = req
        .headers()
        .get(hmac_auth::HEADER_SERVICE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    warn!(
        method = %req.method(),
        path = req.uri().path(),
        service = claimed,
        reason = failure.code(),
        "Rejected unauthenticated request"
    );
}
