//! Event member model.

use crate::model::validation::ModelValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a member, unique within its event.
pub type MemberId = Uuid;

/// One participant of an event.
///
/// Members are immutable once created; removal is explicit at event level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    /// Display name shown on the wheel.
    pub name: String,
}

impl Member {
    /// Creates a member with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.is_nil() {
            return Err(ModelValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::BlankName);
        }
        Ok(())
    }
}
