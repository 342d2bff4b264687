//! Signer and verifier configuration with validation.
//!
//! Both sides must agree on `period_seconds` and share the base secret
//! out-of-band. Field names also accept the camelCase spellings used by
//! existing deployments (`apiKey`, `baseSecret`, `baseSecrets`,
//! `periodSeconds`, `maxSkewSeconds`).
//!
//! Loading these values from the environment or files is the embedding
//! application's job; this module only defines and validates them.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::entities::{BaseSecret, RotationPeriod, ServiceIdentity};
use crate::domain::errors::ConfigError;
use crate::ports::outbound::SecretProvider;

/// Default verifier tolerance between the claimed timestamp and local time.
pub const DEFAULT_MAX_SKEW_SECONDS: u64 = 100;

fn default_period_seconds() -> u64 {
    RotationPeriod::DEFAULT_SECONDS
}

fn default_max_skew_seconds() -> u64 {
    DEFAULT_MAX_SKEW_SECONDS
}

/// Signer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SignerConfig {
    /// This service's own identity, sent as `x-service`
    #[serde(alias = "apiKey", alias = "serviceIdentity")]
    pub service_identity: String,
    /// Shared base secret for key derivation
    #[serde(alias = "baseSecret")]
    pub base_secret: BaseSecret,
    /// How often the derived key changes (default: 5)
    #[serde(default = "default_period_seconds", alias = "periodSeconds")]
    pub period_seconds: u64,
    /// Reuse the derived key for the current slice instead of recomputing it per request
    #[serde(default, alias = "cacheDerivedKeys")]
    pub cache_derived_keys: bool,
}

impl SignerConfig {
    pub fn new(service_identity: impl Into<String>, base_secret: impl Into<String>) -> Self {
        Self {
            service_identity: service_identity.into(),
            base_secret: BaseSecret::from(base_secret.into()),
            period_seconds: default_period_seconds(),
            cache_derived_keys: false,
        }
    }

    pub fn with_period(mut self, period_seconds: u64) -> Self {
        self.period_seconds = period_seconds;
        self
    }

    pub fn with_key_cache(mut self, enabled: bool) -> Self {
        self.cache_derived_keys = enabled;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        ServiceIdentity::new(self.service_identity.as_str())?;
        if self.base_secret.is_empty() {
            return Err(ConfigError::EmptyBaseSecret);
        }
        RotationPeriod::from_secs(self.period_seconds)?;
        Ok(())
    }

    /// Typed view of the validated configuration.
    pub(crate) fn parts(&self) -> Result<(ServiceIdentity, RotationPeriod), ConfigError> {
        self.validate()?;
        Ok((
            ServiceIdentity::new(self.service_identity.as_str())?,
            RotationPeriod::from_secs(self.period_seconds)?,
        ))
    }
}

/// Base secrets known to a verifier.
///
/// Deserializes from either a single string (one secret shared by every
/// caller) or a map of identity to secret.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SecretTable {
    /// Single-tenant deployment: every identity uses the same secret
    Shared(BaseSecret),
    /// One secret per calling service
    PerService(HashMap<ServiceIdentity, BaseSecret>),
}

impl SecretTable {
    pub fn shared(secret: impl Into<String>) -> Self {
        SecretTable::Shared(BaseSecret::from(secret.into()))
    }

    /// Build a per-service table. Fails on the first empty identity.
    pub fn per_service<I, K, V>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(service, secret)| {
                Ok((ServiceIdentity::new(service)?, BaseSecret::from(secret.into())))
            })
            .collect::<Result<HashMap<_, _>, ConfigError>>()?;
        Ok(SecretTable::PerService(map))
    }

    /// Number of identities with a dedicated secret (0 for `Shared`).
    pub fn len(&self) -> usize {
        match self {
            SecretTable::Shared(_) => 0,
            SecretTable::PerService(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SecretTable::Shared(secret) => secret.is_empty(),
            SecretTable::PerService(map) => map.is_empty(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            SecretTable::Shared(secret) if secret.is_empty() => Err(ConfigError::EmptyBaseSecret),
            SecretTable::Shared(_) => Ok(()),
            SecretTable::PerService(map) if map.is_empty() => {
                Err(ConfigError::NoSecretsConfigured)
            }
            SecretTable::PerService(map) => {
                for (service, secret) in map {
                    if service.as_str().is_empty() {
                        return Err(ConfigError::EmptyServiceIdentity);
                    }
                    if secret.is_empty() {
                        return Err(ConfigError::EmptySecretForService(service.to_string()));
                    }
                }
                Ok(())
            }
        }
    }
}

impl SecretProvider for SecretTable {
    fn secret_for(&self, service: &ServiceIdentity) -> Option<&BaseSecret> {
        match self {
            SecretTable::Shared(secret) => Some(secret),
            SecretTable::PerService(map) => map.get(service),
        }
    }
}

/// Verifier configuration
#[derive(Debug, Clone, Deserialize)]
pub struct VerifierConfig {
    /// Known base secrets
    #[serde(alias = "baseSecrets", alias = "baseSecret", alias = "base_secret")]
    pub base_secrets: SecretTable,
    /// Maximum allowed |now - X-Timestamp| in seconds (default: 100)
    #[serde(default = "default_max_skew_seconds", alias = "maxSkewSeconds")]
    pub max_skew_seconds: u64,
    /// Rotation period, must match the signers' (default: 5)
    #[serde(default = "default_period_seconds", alias = "periodSeconds")]
    pub period_seconds: u64,
}

impl VerifierConfig {
    pub fn new(base_secrets: SecretTable) -> Self {
        Self {
            base_secrets,
            max_skew_seconds: default_max_skew_seconds(),
            period_seconds: default_period_seconds(),
        }
    }

    /// Single shared secret for every caller.
    pub fn shared(secret: impl Into<String>) -> Self {
        Self::new(SecretTable::shared(secret))
    }

    pub fn with_max_skew(mut self, max_skew_seconds: u64) -> Self {
        self.max_skew_seconds = max_skew_seconds;
        self
    }

    pub fn with_period(mut self, period_seconds: u64) -> Self {
        self.period_seconds = period_seconds;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_secrets.validate()?;
        RotationPeriod::from_secs(self.period_seconds)?;
        Ok(())
    }
}
