//! Axum extractor for the verified caller identity.

use std::ops::Deref;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use hmac_auth::ServiceIdentity;

use crate::error::AuthRejection;

/// Identity of the service whose signature [`crate::SignatureAuthLayer`]
/// accepted.
///
/// Extracting it from a route the layer does not cover fails with
/// [`AuthRejection::Unauthenticated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedService(pub ServiceIdentity);

impl AuthenticatedService {
    pub fn identity(&self) -> &ServiceIdentity {
        &self.0
    }

    pub fn into_inner(self) -> ServiceIdentity {
        self.0
    }
}

impl Deref for AuthenticatedService {
    type Target = ServiceIdentity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedService
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedService>()
            .cloned()
            .ok_or(AuthRejection::Unauthenticated)
    }
}
