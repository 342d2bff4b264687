//! # Ports Layer
//!
//! - `inbound`: the signing and verification APIs this crate offers
//! - `outbound`: the clock and secret table the host application provides

pub mod inbound;
pub mod outbound;
