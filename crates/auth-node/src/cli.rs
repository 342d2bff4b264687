//! Command-line arguments.
//!
//! Every option can also be supplied through the environment; the variable
//! name is shown in `--help`. Secrets are never echoed back.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use hmac_auth::{SecretTable, SignerConfig, VerifierConfig};
use reqwest::Method;

use crate::consumer::ConsumerPlan;

/// auth-node: signed service-to-service requests
#[derive(Parser, Debug)]
#[command(name = "auth-node")]
#[command(about = "Receiver/consumer demo for rotating HMAC request signatures")]
pub struct Cli {
    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Shared signing and verification settings.
#[derive(Args, Debug, Clone)]
pub struct AuthArgs {
    /// Identity sent in `x-service` by the consumer
    #[arg(long, env = "AUTH_SERVICE_ID", default_value = "core", global = true)]
    pub service_id: String,

    /// Shared base secret
    #[arg(long, env = "AUTH_BASE_SECRET", hide_env_values = true, global = true)]
    pub base_secret: Option<String>,

    /// Key rotation period in seconds; must match on both sides
    #[arg(long, env = "AUTH_PERIOD_SECONDS", default_value_t = 5, global = true)]
    pub period_seconds: u64,

    /// Maximum accepted clock difference in seconds (receiver)
    #[arg(long, env = "AUTH_MAX_SKEW_SECONDS", default_value_t = 100, global = true)]
    pub max_skew_seconds: u64,

    /// JSON file with an identity -> secret map, or a single secret string (receiver)
    #[arg(long, env = "AUTH_SECRETS_FILE", global = true)]
    pub secrets_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve GET /internal/status behind signature verification
    Receiver {
        /// Listen address
        #[arg(long, env = "AUTH_BIND", default_value = "0.0.0.0:3009")]
        bind: SocketAddr,
    },

    /// Send signed requests to a receiver
    Consumer {
        /// Absolute target URL
        #[arg(long, default_value = "http://127.0.0.1:3009/internal/status")]
        url: String,

        /// HTTP method
        #[arg(long, default_value = "GET")]
        method: String,

        /// Delay between requests in milliseconds
        #[arg(long, default_value_t = 5_000)]
        interval_ms: u64,

        /// Number of requests to send
        #[arg(long, default_value_t = 1)]
        count: u64,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Receiver { .. } => "receiver",
            Command::Consumer { .. } => "consumer",
        }
    }

    /// Consumer schedule; `None` for the receiver.
    pub fn consumer_plan(&self) -> Result<Option<ConsumerPlan>> {
        let Command::Consumer {
            url,
            method,
            interval_ms,
            count,
        } = self
        else {
            return Ok(None);
        };

        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .with_context(|| format!("invalid HTTP method '{method}'"))?;

        Ok(Some(ConsumerPlan {
            url: url.clone(),
            method,
            interval: Duration::from_millis(*interval_ms),
            count: *count,
        }))
    }
}

impl AuthArgs {
    pub fn signer_config(&self) -> Result<SignerConfig> {
        let Some(secret) = &self.base_secret else {
            bail!("AUTH_BASE_SECRET is required to sign requests");
        };

        let config = SignerConfig::new(self.service_id.as_str(), secret.as_str())
            .with_period(self.period_seconds);
        config.validate().context("invalid signer configuration")?;
        Ok(config)
    }

    /// Secrets come from `--secrets-file` when given, else the shared base secret.
    pub fn verifier_config(&self) -> Result<VerifierConfig> {
        let secrets = match (&self.secrets_file, &self.base_secret) {
            (Some(path), _) => load_secret_table(path)?,
            (None, Some(secret)) => SecretTable::shared(secret.as_str()),
            (None, None) => bail!("either AUTH_BASE_SECRET or AUTH_SECRETS_FILE is required"),
        };

        let config = VerifierConfig::new(secrets)
            .with_max_skew(self.max_skew_seconds)
            .with_period(self.period_seconds);
        config.validate().context("invalid verifier configuration")?;
        Ok(config)
    }
}

fn load_secret_table(path: &Path) -> Result<SecretTable> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read secrets file {}", path.display()))?;
    parse_secret_table(&raw).with_context(|| format!("invalid secrets file {}", path.display()))
}

pub fn parse_secret_table(raw: &str) -> Result<SecretTable> {
    Ok(serde_json::from_str(raw)?)
}
