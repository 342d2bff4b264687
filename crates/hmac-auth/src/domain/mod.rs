//! # Domain Layer
//!
//! Key derivation, canonicalization and comparison logic with no I/O.
//! The wall clock is never read here; callers pass `now` in explicitly.

pub mod canonical;
pub mod constant_time;
pub mod derivation;
pub mod entities;
pub mod errors;
pub mod timestamp;
