//! Remainder-fair division of integer amounts.
//!
//! # Responsibility
//! - Parse user-entered amounts into positive integers.
//! - Split a total among ordered winners with exact conservation.
//!
//! # Invariants
//! - All arithmetic is integer; shares always sum to the total.
//! - The remainder goes to exactly one designated winner.

pub mod amount;
pub mod shares;
