//! # Auth Node
//!
//! Receiver/consumer pair for signed service-to-service calls.
//!
//! - `cli`: command-line and environment configuration
//! - `receiver`: axum service guarded by `SignatureAuthLayer`
//! - `consumer`: signs and sends requests on an interval
//!
//! The binary in `main.rs` only parses arguments and dispatches.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod consumer;
pub mod receiver;

pub use cli::{AuthArgs, Cli, Command};
pub use consumer::{ConsumerPlan, ConsumerReport};
