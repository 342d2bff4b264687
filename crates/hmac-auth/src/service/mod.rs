//! # Service Layer
//!
//! - `signer`: attaches signatures to outbound requests
//! - `verifier`: validates inbound signatures within the skew window
//! - `key_cache`: optional per-slice derived key reuse for signers

pub mod key_cache;
pub mod signer;
pub mod verifier;
