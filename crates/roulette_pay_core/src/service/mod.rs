//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and engine steps into host-facing APIs.
//! - Keep FFI and CLI layers decoupled from storage details.

pub mod event_service;
pub mod statistics;
