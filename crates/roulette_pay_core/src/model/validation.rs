//! Validation errors for domain records.

use crate::model::member::MemberId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Record-level invariant violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    NilId,
    BlankName,
    DuplicateMember(MemberId),
    DuplicatePayment(Uuid),
    NonPositiveTotal,
    EmptyShares,
    DuplicateShare(MemberId),
    ShareSumMismatch { total: u64, sum: u64 },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "id must not be nil"),
            Self::BlankName => write!(f, "name must not be blank"),
            Self::DuplicateMember(id) => write!(f, "member listed twice: {id}"),
            Self::DuplicatePayment(id) => write!(f, "payment listed twice: {id}"),
            Self::NonPositiveTotal => write!(f, "payment total must be greater than zero"),
            Self::EmptyShares => write!(f, "payment must have at least one share"),
            Self::DuplicateShare(id) => write!(f, "member has two shares in one payment: {id}"),
            Self::ShareSumMismatch { total, sum } => {
                write!(f, "shares sum to {sum} but payment total is {total}")
            }
        }
    }
}

impl Error for ModelValidationError {}
