//! Final-angle decoding.
//!
//! The pointer sits at 12 o'clock (`3π/2` in canvas angles, clockwise from
//! 3 o'clock) while slice 0 starts at angle 0 of the rotated wheel. The slice
//! under the pointer is found by undoing the wheel rotation.
//!
//! # Invariants
//! - Pure: the same angle and layout always produce the same winner.
//! - `winner_index == slice_index mod N`, matching the interleaved layout.

use crate::error::{EngineError, EngineResult};
use crate::wheel::layout::SliceLayout;
use std::f64::consts::{PI, TAU};

/// Pointer position in wheel coordinates.
pub const POINTER_ANGLE: f64 = PI * 1.5;

/// Result of decoding one committed angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedSlice {
    pub slice_index: usize,
    pub winner_index: usize,
}

/// Normalizes any finite angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    ((angle % TAU) + TAU) % TAU
}

/// Angle between slice 0's start and the pointer, in `[0, 2π)`.
pub fn pointer_relative_angle(final_angle: f64) -> f64 {
    (POINTER_ANGLE - normalize_angle(final_angle) + TAU) % TAU
}

/// Decodes `final_angle` against `layout`.
///
/// # Errors
/// - `InvalidAngle` when `final_angle` is NaN or infinite.
pub fn decode_slice(final_angle: f64, layout: &SliceLayout) -> EngineResult<DecodedSlice> {
    if !final_angle.is_finite() {
        return Err(EngineError::InvalidAngle(final_angle));
    }
    let total_slices = layout.total_slices();
    let relative = pointer_relative_angle(final_angle);
    // Rounding can land exactly on 2π/sliceAngle; wrap it back to slice 0.
    let slice_index = (relative / layout.slice_angle()).floor() as usize % total_slices;
    Ok(DecodedSlice {
        slice_index,
        winner_index: layout.owner_of(slice_index),
    })
}

/// Returns the winning participant index for `final_angle`.
///
/// # Errors
/// - `TooFewParticipants` for `participant_count < 2`.
/// - `SlicesPerParticipantOutOfRange` for `K` outside `1..=5`.
/// - `InvalidAngle` for non-finite angles.
pub fn decode(
    final_angle: f64,
    participant_count: usize,
    slices_per_participant: u32,
) -> EngineResult<usize> {
    let layout = SliceLayout::new(participant_count, slices_per_participant)?;
    Ok(decode_slice(final_angle, &layout)?.winner_index)
}
