//! Periodic signed-request sender.

use std::time::Duration;

use auth_gateway::SignedClient;
use reqwest::{Method, StatusCode};
use tracing::{info, warn};

/// What to send and how often.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerPlan {
    pub url: String,
    pub method: Method,
    pub interval: Duration,
    pub count: u64,
}

/// Outcome counts for one consumer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerReport {
    pub sent: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub failed: u64,
}

impl ConsumerReport {
    /// Every request was accepted by the receiver.
    pub fn is_success(&self) -> bool {
        self.rejected == 0 && self.failed == 0
    }

    fn record(&mut self, outcome: Outcome) {
        self.sent += 1;
        match outcome {
            Outcome::Accepted => self.accepted += 1,
            Outcome::Rejected => self.rejected += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Accepted,
    Rejected,
    Failed,
}

fn classify(status: StatusCode) -> Outcome {
    if status.is_success() {
        Outcome::Accepted
    } else if status == StatusCode::UNAUTHORIZED {
        Outcome::Rejected
    } else {
        Outcome::Failed
    }
}

/// Send `plan.count` signed requests, one every `plan.interval`.
///
/// Each request is signed right before it is sent.
pub async fn run(client: &SignedClient, plan: &ConsumerPlan) -> ConsumerReport {
    let mut report = ConsumerReport::default();
    let mut ticker = tokio::time::interval(plan.interval.max(Duration::from_millis(1)));

    for attempt in 1..=plan.count {
        ticker.tick().await;

        let outcome = match client.send(plan.method.clone(), &plan.url).await {
            Ok(response) => {
                let status = response.status();
                let outcome = classify(status);
                if outcome == Outcome::Accepted {
                    info!(attempt, status = status.as_u16(), "Request accepted");
                } else {
                    let body = response.text().await.unwrap_or_default();
                    warn!(attempt, status = status.as_u16(), body = %body, "Request refused");
                }
                outcome
            }
            Err(e) => {
                warn!(attempt, error = %e, "Request failed");
                Outcome::Failed
            }
        };
        report.record(outcome);
    }

    report
}
