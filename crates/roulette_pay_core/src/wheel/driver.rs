//! Frame-driven spin animation.
//!
//! # Responsibility
//! - Turn host frame timestamps into eased wheel angles.
//! - Decode the winner exactly once, on the first frame at or past the end.
//!
//! # Invariants
//! - No decode happens before the elapsed fraction reaches `1.0`.
//! - After finishing or cancelling, every further frame is rejected.

use crate::error::{EngineError, EngineResult};
use crate::wheel::decode::{decode_slice, DecodedSlice};
use crate::wheel::layout::SliceLayout;
use crate::wheel::motion::SpinState;
use log::debug;
use std::time::Duration;

/// What the host should draw for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinFrame {
    /// Wheel is still moving.
    Moving { angle: f64 },
    /// Final frame; emitted once per spin.
    Finished { angle: f64, outcome: DecodedSlice },
}

impl SpinFrame {
    pub fn angle(&self) -> f64 {
        match self {
            Self::Moving { angle } | Self::Finished { angle, .. } => *angle,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverStatus {
    Running,
    Finished,
    Cancelled,
}

/// Animation driver for one spin over a fixed layout.
#[derive(Debug, Clone)]
pub struct SpinDriver {
    layout: SliceLayout,
    state: SpinState,
    duration: Duration,
    status: DriverStatus,
}

impl SpinDriver {
    /// Starts a spin from `start_angle` travelling `rotation_magnitude`.
    ///
    /// # Errors
    /// - `InvalidAngle` for non-finite input or a negative magnitude.
    pub fn start(
        layout: SliceLayout,
        start_angle: f64,
        rotation_magnitude: f64,
        duration: Duration,
    ) -> EngineResult<Self> {
        let state = SpinState::new(start_angle, rotation_magnitude)?;
        debug!(
            "event=spin_start module=wheel status=ok slices={} duration_ms={}",
            layout.total_slices(),
            duration.as_millis()
        );
        Ok(Self {
            layout,
            state,
            duration,
            status: DriverStatus::Running,
        })
    }

    pub fn layout(&self) -> &SliceLayout {
        &self.layout
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.status == DriverStatus::Running
    }

    /// Advances to `elapsed` since spin start and returns the frame to draw.
    ///
    /// # Errors
    /// - `SpinNotRunning` after the spin finished or was cancelled.
    pub fn frame(&mut self, elapsed: Duration) -> EngineResult<SpinFrame> {
        if self.status != DriverStatus::Running {
            return Err(EngineError::SpinNotRunning);
        }

        self.state.advance_to(self.fraction_for(elapsed));
        let angle = self.state.current_angle();
        if !self.state.is_final() {
            return Ok(SpinFrame::Moving { angle });
        }

        let outcome = decode_slice(angle, &self.layout)?;
        self.status = DriverStatus::Finished;
        debug!(
            "event=spin_finish module=wheel status=ok slice_index={} winner_index={}",
            outcome.slice_index, outcome.winner_index
        );
        Ok(SpinFrame::Finished { angle, outcome })
    }

    /// Withdraws the pending animation. Idempotent.
    pub fn cancel(&mut self) {
        if self.status == DriverStatus::Running {
            self.status = DriverStatus::Cancelled;
            debug!("event=spin_cancel module=wheel status=ok");
        }
    }

    fn fraction_for(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{SpinDriver, SpinFrame};
    use crate::error::EngineError;
    use crate::wheel::layout::SliceLayout;
    use std::f64::consts::PI;
    use std::time::Duration;

    fn driver(magnitude: f64) -> SpinDriver {
        SpinDriver::start(
            SliceLayout::new(4, 1).unwrap(),
            0.0,
            magnitude,
            Duration::from_millis(20_000),
        )
        .unwrap()
    }

    #[test]
    fn frames_before_duration_never_decode() {
        let mut driver = driver(16.0 * PI);
        for ms in [0, 16, 5_000, 19_999] {
            let frame = driver.frame(Duration::from_millis(ms)).unwrap();
            assert!(matches!(frame, SpinFrame::Moving { .. }));
        }
        assert!(driver.is_running());
    }

    #[test]
    fn final_frame_decodes_once_then_rejects() {
        // 16π is a whole number of turns, so the wheel parks at angle 0.
        let mut driver = driver(16.0 * PI);
        let frame = driver.frame(Duration::from_millis(25_000)).unwrap();
        match frame {
            SpinFrame::Finished { angle, outcome } => {
                assert_eq!(angle, 16.0 * PI);
                assert_eq!(outcome.winner_index, 3);
            }
            other => panic!("expected finished frame, got {other:?}"),
        }
        assert_eq!(
            driver.frame(Duration::from_millis(25_016)).unwrap_err(),
            EngineError::SpinNotRunning
        );
    }

    #[test]
    fn cancelled_spin_never_completes() {
        let mut driver = driver(20.0 * PI);
        driver.frame(Duration::from_millis(100)).unwrap();
        driver.cancel();
        driver.cancel();
        assert_eq!(
            driver.frame(Duration::from_millis(30_000)).unwrap_err(),
            EngineError::SpinNotRunning
        );
        assert!(!driver.is_running());
    }

    #[test]
    fn late_frames_with_smaller_elapsed_do_not_rewind() {
        let mut driver = driver(20.0 * PI);
        let later = driver.frame(Duration::from_millis(10_000)).unwrap().angle();
        let earlier = driver.frame(Duration::from_millis(5_000)).unwrap().angle();
        assert_eq!(later, earlier);
    }
}
