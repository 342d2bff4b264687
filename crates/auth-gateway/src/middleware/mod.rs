//! Middleware for verifying signed service-to-service requests.
//!
//! Apply with `Router::route_layer` so that unmatched routes still 404
//! instead of 401, and add unauthenticated routes (health checks) after it.

pub mod signature_auth;

pub use signature_auth::{SignatureAuthLayer, SignatureAuthService};
