//! Interleaved slice layout.
//!
//! # Invariants
//! - `total_slices == participants * slices_per_participant`.
//! - Slices of one participant never touch: they are dealt round-robin.

use crate::error::{EngineError, EngineResult};
use std::f64::consts::TAU;

pub const MIN_PARTICIPANTS: usize = 2;
pub const MIN_SLICES_PER_PARTICIPANT: u32 = 1;
pub const MAX_SLICES_PER_PARTICIPANT: u32 = 5;
/// Number of distinct colors hosts cycle through.
pub const PALETTE_SIZE: usize = 10;

/// Derived geometry of one wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceLayout {
    participants: usize,
    slices_per_participant: u32,
}

/// One wedge of the wheel before rotation is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub index: usize,
    /// Participant index owning this slice.
    pub owner: usize,
    /// Start angle in radians, clockwise from 3 o'clock, unrotated.
    pub start_angle: f64,
    pub sweep: f64,
    /// Only the first slice of each participant carries its name.
    pub labeled: bool,
}

impl SliceLayout {
    /// Builds a layout for `participants` entries with `K` slices each.
    ///
    /// # Errors
    /// - `TooFewParticipants` when `participants < 2`.
    /// - `SlicesPerParticipantOutOfRange` when `K` is outside `1..=5`.
    pub fn new(participants: usize, slices_per_participant: u32) -> EngineResult<Self> {
        if participants < MIN_PARTICIPANTS {
            return Err(EngineError::TooFewParticipants {
                count: participants,
            });
        }
        if !(MIN_SLICES_PER_PARTICIPANT..=MAX_SLICES_PER_PARTICIPANT)
            .contains(&slices_per_participant)
        {
            return Err(EngineError::SlicesPerParticipantOutOfRange {
                value: slices_per_participant,
            });
        }
        Ok(Self {
            participants,
            slices_per_participant,
        })
    }

    pub fn participant_count(&self) -> usize {
        self.participants
    }

    pub fn slices_per_participant(&self) -> u32 {
        self.slices_per_participant
    }

    pub fn total_slices(&self) -> usize {
        self.participants * self.slices_per_participant as usize
    }

    /// Angular width of one slice in radians.
    pub fn slice_angle(&self) -> f64 {
        TAU / self.total_slices() as f64
    }

    /// Participant index owning `slice_index`.
    pub fn owner_of(&self, slice_index: usize) -> usize {
        slice_index % self.participants
    }

    /// Color slot for a participant; hosts index their palette with it.
    pub fn palette_index(&self, participant_index: usize) -> usize {
        participant_index % PALETTE_SIZE
    }

    /// Iterates all slices in drawing order.
    pub fn slices(&self) -> impl Iterator<Item = Slice> + '_ {
        let sweep = self.slice_angle();
        (0..self.total_slices()).map(move |index| Slice {
            index,
            owner: self.owner_of(index),
            start_angle: index as f64 * sweep,
            sweep,
            labeled: index < self.participants,
        })
    }
}
