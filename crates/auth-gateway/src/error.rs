//! Gateway error types.
//!
//! Verification failures become `401 Unauthorized` with a JSON body of the
//! form `{"error": "<reason>"}` and a `WWW-Authenticate: HMAC-SHA256`
//! challenge. Reason strings are the `Display` form of
//! [`VerificationFailure`].

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use hmac_auth::{SignerError, VerificationFailure};
use serde_json::json;
use thiserror::Error;

/// Authentication scheme advertised in `WWW-Authenticate`.
pub const AUTH_SCHEME: &str = "HMAC-SHA256";

/// Why a request was refused by the gateway.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthRejection {
    /// The verifier rejected the request
    #[error("{0}")]
    Failed(VerificationFailure),

    /// A handler asked for the caller identity but no layer verified one
    #[error("Unauthenticated")]
    Unauthenticated,
}

impl AuthRejection {
    pub fn status(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl From<VerificationFailure> for AuthRejection {
    fn from(failure: VerificationFailure) -> Self {
        AuthRejection::Failed(failure)
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::WWW_AUTHENTICATE, AUTH_SCHEME)],
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Errors from [`crate::SignedClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to sign request: {0}")]
    Sign(#[from] SignerError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}
