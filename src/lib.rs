//! This project is split in 2 main modules:
//!
//! - [luhn] (card number checksum validation)
//! - [payment] (payment intake, amount normalization and invoice retrieval)
#![doc = include_str!("../README.md")]

pub mod db;
/// Card number well-formedness check
///
/// Leaf module with no dependencies on the rest of the crate. The checksum
/// catches accidental transcription errors in card-like numbers; it is not a
/// security mechanism.
pub mod luhn;
/// Payment intake and invoice retrieval
///
/// This module defines the operations the HTTP layer invokes and the types
/// that cross that boundary.
pub mod payment;
