//! Payment and share models.
//!
//! # Invariants
//! - `total_amount > 0`.
//! - Exactly one share per paying member.
//! - `sum(shares.amount) == total_amount` with integer arithmetic only.

use crate::model::member::MemberId;
use crate::model::validation::ModelValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

pub type PaymentId = Uuid;

/// One member's portion of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentShare {
    pub member_id: MemberId,
    pub amount: u64,
}

/// A recorded, divided expense.
///
/// Immutable after creation except for deletion from its event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub total_amount: u64,
    /// Free-text note, stored trimmed.
    pub memo: String,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Ordered by selection order of the paying members.
    pub shares: Vec<PaymentShare>,
}

impl Payment {
    /// Builds a validated payment with a generated id.
    pub fn new(
        total_amount: u64,
        memo: impl Into<String>,
        date: NaiveDate,
        shares: Vec<PaymentShare>,
    ) -> Result<Self, ModelValidationError> {
        let payment = Self {
            id: Uuid::new_v4(),
            total_amount,
            memo: memo.into().trim().to_string(),
            date,
            shares,
        };
        payment.validate()?;
        Ok(payment)
    }

    /// Checks total, share uniqueness and exact conservation.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.is_nil() {
            return Err(ModelValidationError::NilId);
        }
        if self.total_amount == 0 {
            return Err(ModelValidationError::NonPositiveTotal);
        }
        if self.shares.is_empty() {
            return Err(ModelValidationError::EmptyShares);
        }

        let mut seen = HashSet::with_capacity(self.shares.len());
        let mut sum: u64 = 0;
        for share in &self.shares {
            if !seen.insert(share.member_id) {
                return Err(ModelValidationError::DuplicateShare(share.member_id));
            }
            sum = sum.saturating_add(share.amount);
        }
        if sum != self.total_amount {
            return Err(ModelValidationError::ShareSumMismatch {
                total: self.total_amount,
                sum,
            });
        }
        Ok(())
    }

    /// Returns the share of `member_id`, if that member paid.
    pub fn share_of(&self, member_id: MemberId) -> Option<u64> {
        self.shares
            .iter()
            .find(|share| share.member_id == member_id)
            .map(|share| share.amount)
    }
}
