//! Multi-round payer selection.
//!
//! # Responsibility
//! - Sequence spin, confirm and retry rounds until the payer count is met.
//! - Enforce selection without replacement across rounds.
//!
//! # Invariants
//! - Pool for round `r + 1` is all participants minus confirmed winners.
//! - Retries never change the pool.

pub mod outcome;
pub mod random;
pub mod session;
