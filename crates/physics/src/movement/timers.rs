//! State-local timers and the entry snapshot.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis magnitude at or above which the player counts as pushing fully.
pub const FULL_INPUT_THRESHOLD: f32 = 0.8;

/// Timers that live as long as the active state and are zeroed on every Start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StateTimers {
    /// Seconds since the active state was entered.
    pub current: f32,

    /// Seconds the input axis has continuously been at full deflection.
    pub full_input: f32,

    /// Seconds the body has continuously moved faster than the caller's
    /// "fast" threshold.
    pub full_speed: f32,
}

impl StateTimers {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn advance(&mut self, delta_time: f32) {
        self.current += delta_time;
    }

    /// Accumulate the effort timers for one tick.
    ///
    /// Each keeps growing by `delta_time` while its condition holds and drops
    /// to zero the tick it does not.
    pub fn track_effort(
        &mut self,
        delta_time: f32,
        axis_magnitude: f32,
        speed: f32,
        fast_speed: f32,
    ) {
        self.full_input += delta_time;
        self.full_speed += delta_time;

        if axis_magnitude < FULL_INPUT_THRESHOLD {
            self.full_input = 0.0;
        }
        if speed < fast_speed {
            self.full_speed = 0.0;
        }
    }

    /// Elapsed time as a fraction of `duration`. Not clamped.
    #[inline]
    pub fn progress(&self, duration: f32) -> f32 {
        self.current / duration
    }
}

/// Rigid body state captured when a state is entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_input_resets_below_threshold() {
        let mut timers = StateTimers::default();
        timers.track_effort(0.1, 1.0, 0.0, 1.0);
        timers.track_effort(0.1, 1.0, 0.0, 1.0);
        assert!((timers.full_input - 0.2).abs() < 1e-6);

        timers.track_effort(0.1, 0.79, 0.0, 1.0);
        assert_eq!(timers.full_input, 0.0);
    }

    #[test]
    fn test_full_speed_uses_caller_threshold() {
        let mut timers = StateTimers::default();
        timers.track_effort(0.5, 0.0, 6.0, 5.0);
        assert_eq!(timers.full_speed, 0.5);

        timers.track_effort(0.5, 0.0, 4.9, 5.0);
        assert_eq!(timers.full_speed, 0.0);
    }

    #[test]
    fn test_reset_and_progress() {
        let mut timers = StateTimers {
            current: 1.5,
            full_input: 1.0,
            full_speed: 0.5,
        };
        assert_eq!(timers.progress(0.5), 3.0);

        timers.reset();
        assert_eq!(timers, StateTimers::default());
    }
}
