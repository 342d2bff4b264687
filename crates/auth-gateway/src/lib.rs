//! # Auth Gateway
//!
//! HTTP integration for `hmac-auth`.
//!
//! - [`SignatureAuthLayer`]: tower middleware that verifies `x-service`,
//!   `X-Timestamp` and `X-Signature` before a request reaches the handler.
//!   Rejections are answered with `401 {"error": "<reason>"}`.
//! - [`AuthenticatedService`]: axum extractor for the identity the layer
//!   verified.
//! - [`SignedClient`]: `reqwest` client that signs every outbound request.
//!
//! # Usage
//!
//! ```ignore
//! use auth_gateway::{AuthenticatedService, SignatureAuthLayer};
//! use axum::{routing::get, Json, Router};
//!
//! let verifier = RequestVerifier::new(VerifierConfig::shared("super-secret-b"))?;
//! let app = Router::new()
//!     .route("/internal/status", get(|AuthenticatedService(id)| async move {
//!         Json(serde_json::json!({ "ok": true, "from": id }))
//!     }))
//!     .route_layer(SignatureAuthLayer::new(verifier));
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod extract;
pub mod middleware;

pub use client::SignedClient;
pub use error::{AuthRejection, ClientError};
pub use extract::AuthenticatedService;
pub use middleware::{SignatureAuthLayer, SignatureAuthService};
