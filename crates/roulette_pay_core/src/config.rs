//! Spin configuration.
//!
//! # Responsibility
//! - Hold the tunables of one wheel session (slice density, timing, turns).
//! - Validate host-provided values before any spin starts.
//!
//! # Invariants
//! - `slices_per_member` stays within `1..=5`.
//! - `1 <= min_turns <= max_turns`, so every spin completes full turns.

use crate::error::{EngineError, EngineResult};
use crate::wheel::layout::{MAX_SLICES_PER_PARTICIPANT, MIN_SLICES_PER_PARTICIPANT};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::time::Duration;

pub const DEFAULT_SPIN_DURATION_MS: u64 = 20_000;
pub const DEFAULT_MIN_TURNS: u32 = 8;
pub const DEFAULT_MAX_TURNS: u32 = 14;

/// Per-session wheel settings.
///
/// Missing fields fall back to defaults when deserialized, so hosts can send
/// partial JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Slices drawn for each participant (`K`).
    pub slices_per_member: u32,
    /// Wall-clock length of one spin animation.
    pub spin_duration_ms: u64,
    /// Lower bound of the rotation draw, in full turns.
    pub min_turns: u32,
    /// Upper bound of the rotation draw, in full turns.
    pub max_turns: u32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            slices_per_member: MIN_SLICES_PER_PARTICIPANT,
            spin_duration_ms: DEFAULT_SPIN_DURATION_MS,
            min_turns: DEFAULT_MIN_TURNS,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

impl SpinConfig {
    /// Returns default settings with the given slice density.
    pub fn with_slices(slices_per_member: u32) -> Self {
        Self {
            slices_per_member,
            ..Self::default()
        }
    }

    /// Validates all fields.
    ///
    /// # Errors
    /// - `SlicesPerParticipantOutOfRange` for `K` outside `1..=5`.
    /// - `InvalidConfig` for a zero duration or an empty/inverted turn range.
    pub fn validate(&self) -> EngineResult<()> {
        if !(MIN_SLICES_PER_PARTICIPANT..=MAX_SLICES_PER_PARTICIPANT)
            .contains(&self.slices_per_member)
        {
            return Err(EngineError::SlicesPerParticipantOutOfRange {
                value: self.slices_per_member,
            });
        }
        if self.spin_duration_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "spin_duration_ms must be greater than zero".to_string(),
            ));
        }
        if self.min_turns == 0 {
            return Err(EngineError::InvalidConfig(
                "min_turns must be at least 1".to_string(),
            ));
        }
        if self.min_turns > self.max_turns {
            return Err(EngineError::InvalidConfig(format!(
                "min_turns ({}) must be <= max_turns ({})",
                self.min_turns, self.max_turns
            )));
        }
        Ok(())
    }

    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    /// Smallest rotation magnitude in radians.
    pub fn min_rotation(&self) -> f64 {
        TAU * f64::from(self.min_turns)
    }

    /// Largest rotation magnitude in radians.
    pub fn max_rotation(&self) -> f64 {
        TAU * f64::from(self.max_turns)
    }
}

#[cfg(test)]
mod tests {
    use super::SpinConfig;
    use crate::error::EngineError;
    use std::f64::consts::PI;

    #[test]
    fn default_config_spins_eight_to_fourteen_turns_over_twenty_seconds() {
        let config = SpinConfig::default();
        config.validate().expect("defaults should validate");
        assert_eq!(config.slices_per_member, 1);
        assert_eq!(config.spin_duration().as_millis(), 20_000);
        assert!((config.min_rotation() - 16.0 * PI).abs() < 1e-9);
        assert!((config.max_rotation() - 28.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn validate_rejects_out_of_range_slices() {
        for value in [0, 6] {
            let err = SpinConfig::with_slices(value)
                .validate()
                .expect_err("slice density outside 1..=5 must fail");
            assert_eq!(err, EngineError::SlicesPerParticipantOutOfRange { value });
        }
    }

    #[test]
    fn validate_rejects_inverted_turn_range() {
        let config = SpinConfig {
            min_turns: 10,
            max_turns: 9,
            ..SpinConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }
}
