//! Stepwise selection state machine.
//!
//! # Responsibility
//! - Drive `Idle -> AwaitingSpin -> Spinning -> ResultPending` cycles.
//! - Append confirmed winners and shrink the pool by one per round.
//!
//! # Invariants
//! - `winners.len() < target_count` in every state except `AllRoundsComplete`.
//! - A winner is decoded only by the final frame of a running spin.
//! - Events delivered in the wrong state are rejected without side effects.

use crate::config::SpinConfig;
use crate::error::{EngineError, EngineResult};
use crate::model::member::Member;
use crate::selection::outcome::SelectionOutcome;
use crate::wheel::driver::{SpinDriver, SpinFrame};
use crate::wheel::layout::{SliceLayout, MIN_PARTICIPANTS};
use crate::wheel::rotation::RotationSource;
use log::{error, info};
use std::collections::HashSet;
use std::time::Duration;

/// Current step of a selection.
#[derive(Debug, Clone)]
pub enum SelectionState {
    /// No selection in progress.
    Idle,
    /// Round `round` (1-based) is ready to spin.
    AwaitingSpin { round: usize },
    /// Wheel is animating for round `round`.
    Spinning { round: usize, driver: SpinDriver },
    /// Wheel stopped on `winner`; waiting for confirm or retry.
    ResultPending { round: usize, winner: Member },
    /// Every payer is chosen.
    AllRoundsComplete,
}

impl SelectionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingSpin { .. } => "awaiting_spin",
            Self::Spinning { .. } => "spinning",
            Self::ResultPending { .. } => "result_pending",
            Self::AllRoundsComplete => "all_rounds_complete",
        }
    }

    /// 1-based round number while a selection is in progress.
    pub fn round(&self) -> Option<usize> {
        match self {
            Self::AwaitingSpin { round }
            | Self::Spinning { round, .. }
            | Self::ResultPending { round, .. } => Some(*round),
            Self::Idle | Self::AllRoundsComplete => None,
        }
    }
}

/// One interactive payer selection over a fixed participant list.
#[derive(Debug, Clone)]
pub struct SelectionSession {
    participants: Vec<Member>,
    config: SpinConfig,
    target_count: usize,
    winners: Vec<Member>,
    state: SelectionState,
    wheel_angle: f64,
}

impl SelectionSession {
    /// Creates an idle session.
    ///
    /// # Errors
    /// - Config validation errors.
    /// - `TooFewParticipants` with fewer than two participants.
    /// - `DuplicateParticipant` when an id repeats.
    pub fn new(participants: Vec<Member>, config: SpinConfig) -> EngineResult<Self> {
        config.validate()?;
        if participants.len() < MIN_PARTICIPANTS {
            return Err(EngineError::TooFewParticipants {
                count: participants.len(),
            });
        }
        let mut seen = HashSet::with_capacity(participants.len());
        for participant in &participants {
            if !seen.insert(participant.id) {
                return Err(EngineError::DuplicateParticipant(participant.id));
            }
        }

        Ok(Self {
            participants,
            config,
            target_count: 0,
            winners: Vec::new(),
            state: SelectionState::Idle,
            wheel_angle: 0.0,
        })
    }

    pub fn participants(&self) -> &[Member] {
        &self.participants
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Confirmed winners in confirmation order.
    pub fn winners(&self) -> &[Member] {
        &self.winners
    }

    /// Requested payer count; `0` before `start`.
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, SelectionState::AllRoundsComplete)
    }

    /// Resting angle of the wheel between spins.
    pub fn wheel_angle(&self) -> f64 {
        self.wheel_angle
    }

    /// Participants still eligible, in original order.
    pub fn candidate_pool(&self) -> Vec<&Member> {
        self.participants
            .iter()
            .filter(|participant| !self.winners.iter().any(|winner| winner.id == participant.id))
            .collect()
    }

    /// Layout of the wheel for the current pool.
    ///
    /// # Errors
    /// - `TooFewParticipants` once fewer than two candidates remain.
    pub fn current_layout(&self) -> EngineResult<SliceLayout> {
        SliceLayout::new(self.candidate_pool().len(), self.config.slices_per_member)
    }

    /// Validates the payer count and opens round 1.
    ///
    /// # Errors
    /// - `UnexpectedEvent` unless idle.
    /// - `TargetCountOutOfRange` unless `1 <= target_count <= participants`.
    pub fn start(&mut self, target_count: usize) -> EngineResult<()> {
        if !matches!(self.state, SelectionState::Idle) {
            return Err(self.unexpected("start"));
        }
        if target_count == 0 || target_count > self.participants.len() {
            return Err(EngineError::TargetCountOutOfRange {
                requested: target_count,
                participants: self.participants.len(),
            });
        }

        self.target_count = target_count;
        self.winners.clear();
        self.state = SelectionState::AwaitingSpin { round: 1 };
        info!(
            "event=selection_start module=selection status=ok participants={} target_count={} slices_per_member={}",
            self.participants.len(),
            target_count,
            self.config.slices_per_member
        );
        Ok(())
    }

    /// Starts spinning the current round with a freshly drawn magnitude.
    ///
    /// With a single candidate left there is nothing to spin; that candidate
    /// goes straight to `ResultPending`.
    pub fn spin(&mut self, rotation: &mut dyn RotationSource) -> EngineResult<()> {
        let SelectionState::AwaitingSpin { round } = self.state else {
            return Err(self.unexpected("spin"));
        };
        self.state = self.begin_round(round, rotation)?;
        Ok(())
    }

    /// Feeds one animation frame; the final frame moves to `ResultPending`.
    ///
    /// # Errors
    /// - `UnexpectedEvent` unless spinning.
    pub fn frame(&mut self, elapsed: Duration) -> EngineResult<SpinFrame> {
        let state_name = self.state.name();
        let SelectionState::Spinning { round, driver } = &mut self.state else {
            return Err(unexpected_event(state_name, "frame"));
        };
        let round = *round;
        let frame = driver.frame(elapsed)?;

        if let SpinFrame::Finished { angle, outcome } = frame {
            let winner = self.candidate_pool()[outcome.winner_index].clone();
            self.wheel_angle = angle;
            self.state = SelectionState::ResultPending { round, winner };
            info!(
                "event=spin_result module=selection status=ok round={} winner_index={}",
                round, outcome.winner_index
            );
        }
        Ok(frame)
    }

    /// Abandons a running spin; the round can be spun again.
    ///
    /// Winners, pool and wheel angle are left untouched.
    pub fn cancel_spin(&mut self) -> EngineResult<()> {
        let state_name = self.state.name();
        let SelectionState::Spinning { round, driver } = &mut self.state else {
            return Err(unexpected_event(state_name, "cancel_spin"));
        };
        driver.cancel();
        let round = *round;
        self.state = SelectionState::AwaitingSpin { round };
        info!("event=spin_cancel module=selection status=ok round={round}");
        Ok(())
    }

    /// Accepts the pending winner and advances to the next round or finishes.
    pub fn confirm(&mut self) -> EngineResult<()> {
        let SelectionState::ResultPending { round, winner } = &self.state else {
            return Err(self.unexpected("confirm"));
        };
        let round = *round;
        self.winners.push(winner.clone());

        if self.winners.len() >= self.target_count {
            self.state = SelectionState::AllRoundsComplete;
            info!(
                "event=selection_complete module=selection status=ok rounds={}",
                self.winners.len()
            );
        } else {
            self.state = SelectionState::AwaitingSpin { round: round + 1 };
            info!(
                "event=round_confirm module=selection status=ok round={} remaining_pool={}",
                round,
                self.candidate_pool().len()
            );
        }
        Ok(())
    }

    /// Discards the pending winner and spins the same pool again.
    pub fn retry(&mut self, rotation: &mut dyn RotationSource) -> EngineResult<()> {
        let SelectionState::ResultPending { round, .. } = self.state else {
            return Err(self.unexpected("retry"));
        };
        self.state = self.begin_round(round, rotation)?;
        info!("event=round_retry module=selection status=ok round={round}");
        Ok(())
    }

    /// Drops all progress and returns to `Idle`.
    pub fn reset(&mut self) {
        if let SelectionState::Spinning { driver, .. } = &mut self.state {
            driver.cancel();
        }
        self.winners.clear();
        self.target_count = 0;
        self.state = SelectionState::Idle;
    }

    /// Final ordered winners.
    ///
    /// # Errors
    /// - `UnexpectedEvent` until every round is confirmed.
    pub fn outcome(&self) -> EngineResult<SelectionOutcome> {
        if !self.is_complete() {
            return Err(self.unexpected("outcome"));
        }
        SelectionOutcome::new(self.winners.clone())
    }

    fn begin_round(
        &self,
        round: usize,
        rotation: &mut dyn RotationSource,
    ) -> EngineResult<SelectionState> {
        let pool = self.candidate_pool();
        if pool.len() == 1 {
            info!(
                "event=spin_skip module=selection status=ok round={round} reason=single_candidate"
            );
            return Ok(SelectionState::ResultPending {
                round,
                winner: pool[0].clone(),
            });
        }

        let layout = SliceLayout::new(pool.len(), self.config.slices_per_member)?;
        let driver = SpinDriver::start(
            layout,
            self.wheel_angle,
            rotation.next_magnitude(),
            self.config.spin_duration(),
        )?;
        Ok(SelectionState::Spinning { round, driver })
    }

    fn unexpected(&self, event: &'static str) -> EngineError {
        unexpected_event(self.state.name(), event)
    }
}

fn unexpected_event(state: &'static str, event: &'static str) -> EngineError {
    error!(
        "event=selection_reject module=selection status=error error_code=unexpected_event state={state} input={event}"
    );
    EngineError::UnexpectedEvent { state, event }
}
