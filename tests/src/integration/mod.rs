//! # Integration Flows
//!
//! - `rotation`: signer → verifier across slice boundaries and clock drift
//! - `gateway`: the HTTP stack end to end (tower oneshot and real sockets)

pub mod gateway;
