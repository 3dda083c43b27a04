//! Repository layer: persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the event-store contract consumed by services.
//! - Keep SQL details out of engine and service code.
//!
//! # Invariants
//! - Writes validate aggregates before touching storage.
//! - Missing targets surface as `RepoError::NotFound`, not silent no-ops.

pub mod event_repo;
