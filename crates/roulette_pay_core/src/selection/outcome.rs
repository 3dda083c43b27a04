//! Completed selection handed to the division step.

use crate::error::{EngineError, EngineResult};
use crate::model::member::{Member, MemberId};
use std::collections::HashSet;

/// Ordered, duplicate-free winners of a finished selection.
///
/// The last winner absorbs any division remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
    winners: Vec<Member>,
}

impl SelectionOutcome {
    /// Wraps an externally chosen winner list.
    ///
    /// # Errors
    /// - `EmptyWinners` for an empty list.
    /// - `DuplicateWinner` when an id repeats.
    pub fn new(winners: Vec<Member>) -> EngineResult<Self> {
        if winners.is_empty() {
            return Err(EngineError::EmptyWinners);
        }
        let mut seen = HashSet::with_capacity(winners.len());
        for winner in &winners {
            if !seen.insert(winner.id) {
                return Err(EngineError::DuplicateWinner(winner.id));
            }
        }
        Ok(Self { winners })
    }

    pub fn winners(&self) -> &[Member] {
        &self.winners
    }

    pub fn winner_ids(&self) -> Vec<MemberId> {
        self.winners.iter().map(|winner| winner.id).collect()
    }

    /// Most recently confirmed winner.
    pub fn remainder_recipient(&self) -> &Member {
        &self.winners[self.winners.len() - 1]
    }

    /// True when one member pays the full amount.
    pub fn is_single_payer(&self) -> bool {
        self.winners.len() == 1
    }

    pub fn into_winners(self) -> Vec<Member> {
        self.winners
    }
}
