//! Spin motion: quint ease-out from a start angle over a rotation magnitude.
//!
//! # Invariants
//! - Angle is monotonic non-decreasing in elapsed fraction.
//! - At fraction `1.0` the angle equals `start_angle + rotation_magnitude`.

use crate::error::{EngineError, EngineResult};
use crate::wheel::layout::SliceLayout;

/// Quint ease-out: fast start, long slow tail.
pub fn ease_out_quint(fraction: f64) -> f64 {
    let t = fraction.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(5)
}

/// Transient state of one spin animation.
///
/// Created at spin start, advanced only by the animation driver and dropped
/// when the spin ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinState {
    start_angle: f64,
    rotation_magnitude: f64,
    elapsed_fraction: f64,
}

impl SpinState {
    /// Starts a spin at `start_angle` that will travel `rotation_magnitude`.
    ///
    /// # Errors
    /// - `InvalidAngle` when either value is not finite, or the magnitude is
    ///   negative.
    pub fn new(start_angle: f64, rotation_magnitude: f64) -> EngineResult<Self> {
        if !start_angle.is_finite() {
            return Err(EngineError::InvalidAngle(start_angle));
        }
        if !rotation_magnitude.is_finite() || rotation_magnitude < 0.0 {
            return Err(EngineError::InvalidAngle(rotation_magnitude));
        }
        Ok(Self {
            start_angle,
            rotation_magnitude,
            elapsed_fraction: 0.0,
        })
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn rotation_magnitude(&self) -> f64 {
        self.rotation_magnitude
    }

    pub fn elapsed_fraction(&self) -> f64 {
        self.elapsed_fraction
    }

    /// Moves the animation forward; earlier fractions are ignored.
    pub fn advance_to(&mut self, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        let clamped = fraction.clamp(0.0, 1.0);
        if clamped > self.elapsed_fraction {
            self.elapsed_fraction = clamped;
        }
    }

    /// Angle at the current elapsed fraction.
    pub fn current_angle(&self) -> f64 {
        angle_at(self.start_angle, self.rotation_magnitude, self.elapsed_fraction)
    }

    /// Angle the spin will commit to once finished.
    pub fn final_angle(&self) -> f64 {
        self.start_angle + self.rotation_magnitude
    }

    pub fn is_final(&self) -> bool {
        self.elapsed_fraction >= 1.0
    }
}

fn angle_at(start_angle: f64, rotation_magnitude: f64, fraction: f64) -> f64 {
    if fraction >= 1.0 {
        return start_angle + rotation_magnitude;
    }
    start_angle + rotation_magnitude * ease_out_quint(fraction)
}

/// Computes `(current_angle, is_final)` for a spin over `participants`
/// drawn with `slices_per_participant` slices each.
///
/// # Errors
/// - `TooFewParticipants` with fewer than two participants.
/// - `SlicesPerParticipantOutOfRange` for `K` outside `1..=5`.
/// - `InvalidAngle` for non-finite angles or a negative magnitude.
pub fn resolve<P>(
    participants: &[P],
    slices_per_participant: u32,
    start_angle: f64,
    rotation_magnitude: f64,
    elapsed_fraction: f64,
) -> EngineResult<(f64, bool)> {
    SliceLayout::new(participants.len(), slices_per_participant)?;
    let mut state = SpinState::new(start_angle, rotation_magnitude)?;
    state.advance_to(elapsed_fraction);
    Ok((state.current_angle(), state.is_final()))
}
