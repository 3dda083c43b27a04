//! Domain records for events, members and payments.
//!
//! # Responsibility
//! - Define the plain data the engine consumes and the repository persists.
//! - Keep wire field names compatible with the web client (`camelCase`).
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil UUID.
//! - A payment's shares always sum exactly to its total.

pub mod event_group;
pub mod member;
pub mod payment;
pub mod validation;
