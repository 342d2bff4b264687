//! Signing HTTP client.
//!
//! Every request built through [`SignedClient`] carries a fresh
//! `x-service` / `X-Timestamp` / `X-Signature` triple computed at build
//! time. Build requests right before sending them; a request built and
//! held longer than the receiver's skew window is rejected.

use std::sync::Arc;

use hmac_auth::{RequestSigner, RequestSigningApi, TimeSource};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use tracing::debug;

use crate::error::ClientError;

/// `reqwest::Client` paired with a request signer.
#[derive(Clone)]
pub struct SignedClient {
    http: Client,
    signer: Arc<dyn RequestSigningApi>,
}

impl SignedClient {
    pub fn new<T: TimeSource + 'static>(signer: RequestSigner<T>) -> Self {
        Self::with_client(Client::new(), Arc::new(signer))
    }

    /// Reuse an existing client (connection pool, timeouts, TLS settings).
    pub fn with_client(http: Client, signer: Arc<dyn RequestSigningApi>) -> Self {
        Self { http, signer }
    }

    /// Start a signed request. The query string of `url` is not signed.
    pub fn request(&self, method: Method, url: &str) -> Result<RequestBuilder, ClientError> {
        let headers = self.signer.sign(method.as_str(), url)?;
        debug!(%method, url, service = %headers.service, "Signing outbound request");

        let builder = headers
            .iter()
            .fold(self.http.request(method, url), |builder, (name, value)| {
                builder.header(name, value)
            });
        Ok(builder)
    }

    pub fn get(&self, url: &str) -> Result<RequestBuilder, ClientError> {
        self.request(Method::GET, url)
    }

    pub fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<RequestBuilder, ClientError> {
        Ok(self.request(Method::POST, url)?.json(body))
    }

    /// Sign and send in one step.
    pub async fn send(&self, method: Method, url: &str) -> Result<Response, ClientError> {
        Ok(self.request(method, url)?.send().await?)
    }
}
