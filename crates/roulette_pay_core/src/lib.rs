//! Core domain logic for RoulettePay.
//!
//! The selection and division engine lives in `wheel`, `selection` and
//! `division`; it performs no I/O. `repo` and `service` persist events and
//! payments around it.

pub mod config;
pub mod db;
pub mod division;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod selection;
pub mod service;
pub mod wheel;

pub use config::SpinConfig;
pub use division::amount::parse_amount;
pub use division::shares::divide;
pub use error::{EngineError, EngineErrorKind, EngineResult};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::event_group::{EventGroup, EventId};
pub use model::member::{Member, MemberId};
pub use model::payment::{Payment, PaymentId, PaymentShare};
pub use model::validation::ModelValidationError;
pub use repo::event_repo::{EventRepository, RepoError, RepoResult, SqliteEventRepository};
pub use selection::outcome::SelectionOutcome;
pub use selection::random::select_random_members;
pub use selection::session::{SelectionSession, SelectionState};
pub use service::event_service::{EventService, EventServiceError, EventServiceResult};
pub use service::statistics::{summarize, EventStatistics, MemberStatistics};
pub use wheel::decode::{decode, decode_slice, DecodedSlice};
pub use wheel::driver::{SpinDriver, SpinFrame};
pub use wheel::layout::{Slice, SliceLayout};
pub use wheel::motion::{ease_out_quint, resolve, SpinState};
pub use wheel::rotation::{RandomRotation, RotationSource, ScriptedRotation};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
