//! # auth-node
//!
//! ```text
//! AUTH_BASE_SECRET=super-secret-b auth-node receiver --bind 0.0.0.0:3009
//! AUTH_BASE_SECRET=super-secret-b auth-node consumer --count 10 --interval-ms 5000
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use auth_gateway::SignedClient;
use auth_node::{consumer, receiver, Cli, Command};
use auth_telemetry::{init_logging, TelemetryConfig};
use hmac_auth::{RequestSigner, RequestVerifier};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let telemetry =
        TelemetryConfig::from_env().with_service_name(format!("auth-node-{}", cli.command.name()));
    init_logging(&telemetry).context("failed to initialize logging")?;

    match &cli.command {
        Command::Receiver { bind } => {
            let verifier = RequestVerifier::new(cli.auth.verifier_config()?)?;
            info!(
                period_seconds = verifier.policy().rotation_period.as_secs(),
                max_skew_seconds = verifier.policy().max_skew_seconds,
                "Verifier configured"
            );
            receiver::serve(*bind, verifier).await
        }
        Command::Consumer { .. } => {
            let plan = cli
                .command
                .consumer_plan()?
                .context("consumer subcommand without a plan")?;
            let signer = RequestSigner::new(cli.auth.signer_config()?)?;
            info!(
                service = %signer.service_identity(),
                url = %plan.url,
                count = plan.count,
                "Consumer starting"
            );

            let client = SignedClient::new(signer);
            let report = tokio::select! {
                report = consumer::run(&client, &plan) => report,
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted");
                    return Ok(());
                }
            };

            info!(
                sent = report.sent,
                accepted = report.accepted,
                rejected = report.rejected,
                failed = report.failed,
                "Consumer finished"
            );
            if !report.is_success() {
                bail!(
                    "{} of {} requests were not accepted",
                    report.rejected + report.failed,
                    report.sent
                );
            }
            Ok(())
        }
    }
}
