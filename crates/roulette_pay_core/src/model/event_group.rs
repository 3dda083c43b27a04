//! Event aggregate: a named group of members and their payments.
//!
//! # Invariants
//! - Member ids are unique within the event.
//! - Payments may reference members that were removed later; history stays.

use crate::model::member::{Member, MemberId};
use crate::model::payment::{Payment, PaymentId};
use crate::model::validation::ModelValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

pub type EventId = Uuid;

/// The unit loaded and saved by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventGroup {
    pub id: EventId,
    pub name: String,
    /// Ordered as added; this order is the wheel order.
    pub members: Vec<Member>,
    /// Ordered as recorded.
    pub payments: Vec<Payment>,
}

impl EventGroup {
    /// Creates an empty event with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members: Vec::new(),
            payments: Vec::new(),
        }
    }

    pub fn member(&self, member_id: MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id == member_id)
    }

    pub fn payment(&self, payment_id: PaymentId) -> Option<&Payment> {
        self.payments
            .iter()
            .find(|payment| payment.id == payment_id)
    }

    /// Sum of all recorded payment totals.
    pub fn total_spent(&self) -> u64 {
        self.payments
            .iter()
            .fold(0u64, |acc, payment| acc.saturating_add(payment.total_amount))
    }

    /// Validates the whole aggregate, including every payment.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.is_nil() {
            return Err(ModelValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::BlankName);
        }

        let mut member_ids = HashSet::with_capacity(self.members.len());
        for member in &self.members {
            member.validate()?;
            if !member_ids.insert(member.id) {
                return Err(ModelValidationError::DuplicateMember(member.id));
            }
        }

        let mut payment_ids = HashSet::with_capacity(self.payments.len());
        for payment in &self.payments {
            payment.validate()?;
            if !payment_ids.insert(payment.id) {
                return Err(ModelValidationError::DuplicatePayment(payment.id));
            }
        }
        Ok(())
    }
}
