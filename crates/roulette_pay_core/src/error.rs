//! Engine error taxonomy shared by wheel, selection and division.
//!
//! # Responsibility
//! - Give every rejected engine call a discriminated reason.
//! - Separate caller-correctable input problems from programming errors.
//!
//! # Invariants
//! - Every variant maps to exactly one `EngineErrorKind`.
//! - A rejected call never commits partial state.

use crate::model::member::MemberId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EngineResult<T> = Result<T, EngineError>;

/// Coarse failure category for engine errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorKind {
    /// Caller supplied data outside the accepted domain.
    InvalidInput,
    /// Caller broke an API contract; not user-recoverable.
    ContractViolation,
}

/// Rejection reason for selection/division engine calls.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Wheel needs at least two participants.
    TooFewParticipants { count: usize },
    /// Slices per participant outside `1..=5`.
    SlicesPerParticipantOutOfRange { value: u32 },
    /// Requested payer count outside `1..=participants`.
    TargetCountOutOfRange { requested: usize, participants: usize },
    /// The same participant id was offered twice.
    DuplicateParticipant(MemberId),
    /// Angle or rotation magnitude is NaN, infinite or negative.
    InvalidAngle(f64),
    /// Spin configuration failed validation.
    InvalidConfig(String),
    /// Amount text is not a plain integer.
    InvalidAmount(String),
    /// Amount is zero.
    NonPositiveAmount,
    /// Division was requested for an empty winner list.
    EmptyWinners,
    /// Remainder recipient is not part of the winner list.
    RemainderRecipientMissing(MemberId),
    /// Winner list contains the same id twice.
    DuplicateWinner(MemberId),
    /// Event delivered to the selection state machine in the wrong state.
    UnexpectedEvent {
        state: &'static str,
        event: &'static str,
    },
    /// Spin driver was already resolved or cancelled.
    SpinNotRunning,
}

impl EngineError {
    /// Returns the failure category of this error.
    pub fn kind(&self) -> EngineErrorKind {
        match self {
            Self::RemainderRecipientMissing(_)
            | Self::DuplicateWinner(_)
            | Self::UnexpectedEvent { .. }
            | Self::SpinNotRunning => EngineErrorKind::ContractViolation,
            _ => EngineErrorKind::InvalidInput,
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        self.kind() == EngineErrorKind::ContractViolation
    }
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewParticipants { count } => {
                write!(f, "wheel needs at least 2 participants, got {count}")
            }
            Self::SlicesPerParticipantOutOfRange { value } => {
                write!(f, "slices per participant must be in 1..=5, got {value}")
            }
            Self::TargetCountOutOfRange {
                requested,
                participants,
            } => write!(
                f,
                "payer count must be in 1..={participants}, got {requested}"
            ),
            Self::DuplicateParticipant(id) => write!(f, "duplicate participant: {id}"),
            Self::InvalidAngle(value) => write!(f, "invalid angle value: {value}"),
            Self::InvalidConfig(message) => write!(f, "invalid spin config: {message}"),
            Self::InvalidAmount(text) => {
                write!(f, "amount must be a positive integer, got `{text}`")
            }
            Self::NonPositiveAmount => write!(f, "amount must be greater than zero"),
            Self::EmptyWinners => write!(f, "winner list must not be empty"),
            Self::RemainderRecipientMissing(id) => {
                write!(f, "remainder recipient {id} is not among the winners")
            }
            Self::DuplicateWinner(id) => write!(f, "winner listed twice: {id}"),
            Self::UnexpectedEvent { state, event } => {
                write!(f, "event `{event}` is not accepted in state `{state}`")
            }
            Self::SpinNotRunning => write!(f, "spin is not running"),
        }
    }
}

impl Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::{EngineError, EngineErrorKind};
    use uuid::Uuid;

    #[test]
    fn kind_separates_input_errors_from_contract_violations() {
        assert_eq!(
            EngineError::TooFewParticipants { count: 1 }.kind(),
            EngineErrorKind::InvalidInput
        );
        assert_eq!(
            EngineError::NonPositiveAmount.kind(),
            EngineErrorKind::InvalidInput
        );
        assert!(EngineError::RemainderRecipientMissing(Uuid::new_v4()).is_contract_violation());
        assert!(EngineError::UnexpectedEvent {
            state: "idle",
            event: "confirm"
        }
        .is_contract_violation());
    }
}
