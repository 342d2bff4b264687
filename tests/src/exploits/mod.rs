//! # Attack Simulations
//!
//! Each module replays one attack against the verifier and asserts the
//! exact rejection reason.
//!
//! | Module | Attack | Expected |
//! |--------|--------|----------|
//! | `replay` | Resend captured headers later | `TimestampSkew` / `BadSignature` |
//! | `spoofing` | Claim another identity or rewrite the request | `BadSignature` / `UnknownService` |
//! | `truncation` | Short, padded or garbage signatures | `BadSignature` |
//! | `cross_tenant` | Sign with one tenant's secret as another | `BadSignature` |

pub mod cross_tenant;
pub mod replay;
pub mod spoofing;
