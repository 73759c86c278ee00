//! Movement tuning.
//!
//! The controller owns none of these values; callers pass the relevant
//! section into each Start/Tick call. They are grouped here so a whole set
//! can be loaded from TOML and swapped at runtime.
//!
//! Curve-bearing sections are generic over the curve so that any
//! `Fn(f32) -> f32` can stand in for the serialized [`KeyframeCurve`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::controller::ADJUSTMENT_TIME_SCALE;
use super::curve::{Keyframe, KeyframeCurve};

/// Ground movement facing the camera direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkTuning {
    /// Speed along the forward axis at full input (meters/second).
    pub forward_speed: f32,

    /// Speed along the right axis at full input (meters/second).
    pub right_speed: f32,

    /// Per-tick velocity blend factor toward the target velocity. Without
    /// input the same value brakes at `delta_time * 1000 * acceleration` per
    /// tick; see [`MovementTuning::validate_for_tick`].
    pub acceleration: f32,

    /// Per-tick orientation blend factor toward the camera direction.
    pub rotation_speed: f32,

    /// Speed above which the body counts as moving fast (meters/second).
    pub fast_speed: f32,
}

impl Default for WalkTuning {
    fn default() -> Self {
        Self {
            forward_speed: 4.0,
            right_speed: 3.0,
            acceleration: 0.05,
            rotation_speed: 0.15,
            fast_speed: 3.5,
        }
    }
}

/// Ground movement facing the direction of travel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprintTuning {
    pub speed: f32,
    pub acceleration: f32,
    pub rotation_speed: f32,
    pub fast_speed: f32,
}

impl Default for SprintTuning {
    fn default() -> Self {
        Self {
            speed: 8.0,
            acceleration: 0.1,
            rotation_speed: 0.2,
            fast_speed: 7.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpTuning<C = KeyframeCurve> {
    /// Vertical speed at take-off (meters/second).
    pub launch_velocity: f32,

    /// Gravity attenuation over normalized jump progress.
    pub gravity: C,

    /// Seconds until the jump signals its end.
    pub duration: f32,

    /// Gravity at a curve value of 1 (meters/second²).
    pub max_gravity: f32,

    /// Air control strength.
    pub adjustment_speed: f32,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            launch_velocity: 6.0,
            gravity: KeyframeCurve::linear(0.3, 1.0),
            duration: 0.6,
            max_gravity: 20.0,
            adjustment_speed: 0.005,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideTuning<C = KeyframeCurve> {
    /// Speed multiplier over normalized slide progress.
    pub speed_fall: C,
    pub speed: f32,
    pub duration: f32,
    pub adjustment_speed: f32,
}

impl Default for SlideTuning {
    fn default() -> Self {
        Self {
            speed_fall: KeyframeCurve::new(vec![
                Keyframe::new(0.0, 1.0),
                Keyframe::new(0.7, 0.6),
                Keyframe::new(1.0, 0.0),
            ]),
            speed: 10.0,
            duration: 0.8,
            adjustment_speed: 0.002,
        }
    }
}

/// Running along a wall on the left or right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallRunTuning<C = KeyframeCurve> {
    pub launch_velocity: f32,
    pub gravity: C,
    pub speed: f32,
    pub duration: f32,
    pub max_gravity: f32,
}

impl Default for WallRunTuning {
    fn default() -> Self {
        Self {
            launch_velocity: 3.0,
            gravity: KeyframeCurve::linear(0.1, 1.0),
            speed: 8.0,
            duration: 1.2,
            max_gravity: 8.0,
        }
    }
}

/// Running up a wall straight ahead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallRunFrontTuning<C = KeyframeCurve> {
    pub launch_velocity: f32,
    pub gravity: C,
    pub duration: f32,
    pub max_gravity: f32,
}

impl Default for WallRunFrontTuning {
    fn default() -> Self {
        Self {
            launch_velocity: 7.0,
            gravity: KeyframeCurve::linear(0.2, 1.0),
            duration: 0.7,
            max_gravity: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallJumpTuning<C = KeyframeCurve> {
    pub launch_velocity: f32,
    pub gravity: C,
    /// Horizontal speed along the launch direction.
    pub speed: f32,
    pub duration: f32,
    pub max_gravity: f32,
}

impl Default for WallJumpTuning {
    fn default() -> Self {
        Self {
            launch_velocity: 5.0,
            gravity: KeyframeCurve::linear(0.3, 1.0),
            speed: 6.0,
            duration: 0.5,
            max_gravity: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgeTuning {
    /// Speed at which the hands settle onto the grab point.
    pub grab_speed: f32,
}

impl Default for LedgeTuning {
    fn default() -> Self {
        Self { grab_speed: 2.0 }
    }
}

/// Complete tuning set, one section per movement state family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub walk: WalkTuning,
    pub sprint: SprintTuning,
    pub jump: JumpTuning,
    pub slide: SlideTuning,
    pub wall_run: WallRunTuning,
    pub wall_run_front: WallRunFrontTuning,
    pub wall_jump: WallJumpTuning,
    pub ledge: LedgeTuning,
}

impl MovementTuning {
    /// Snappy, floaty tuning: long jumps with little gravity early on.
    pub fn arcade() -> Self {
        let mut tuning = Self::default();
        tuning.walk.acceleration = 0.055;
        tuning.sprint.speed = 10.0;
        tuning.sprint.acceleration = 0.2;
        tuning.jump.launch_velocity = 7.5;
        tuning.jump.gravity = KeyframeCurve::linear(0.1, 1.0);
        tuning.jump.duration = 0.8;
        tuning.jump.adjustment_speed = 0.01;
        tuning.wall_run.duration = 1.6;
        tuning
    }

    /// Weighty tuning: constant gravity and slow turning.
    pub fn heavy() -> Self {
        let mut tuning = Self::default();
        tuning.walk.acceleration = 0.03;
        tuning.walk.rotation_speed = 0.08;
        tuning.sprint.acceleration = 0.05;
        tuning.jump.launch_velocity = 5.0;
        tuning.jump.gravity = KeyframeCurve::constant(1.0);
        tuning.jump.adjustment_speed = 0.002;
        tuning.wall_run.duration = 0.8;
        tuning.wall_jump.gravity = KeyframeCurve::constant(1.0);
        tuning
    }

    /// Parse a tuning set from TOML. Missing sections fall back to defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let tuning: Self = toml::from_str(source)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a TOML tuning file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_toml_str(&source)?;
        log::debug!("loaded movement tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject tuning that overshoots when ticked every `delta_time` seconds.
    ///
    /// Walk braking blends by `delta_time * 1000 * acceleration`; past 1 the
    /// blend flips the velocity and grows it instead of damping it.
    pub fn validate_for_tick(&self, delta_time: f32) -> Result<(), ConfigError> {
        self.validate()?;

        if delta_time * ADJUSTMENT_TIME_SCALE * self.walk.acceleration > 1.0 {
            return Err(ConfigError::Invalid {
                field: "walk.acceleration",
                requirement: "at most 1 / (delta_time * 1000) at the tick rate",
            });
        }
        Ok(())
    }

    /// Reject values the per-tick integration cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("jump.duration", self.jump.duration),
            ("slide.duration", self.slide.duration),
            ("wall_run.duration", self.wall_run.duration),
            ("wall_run_front.duration", self.wall_run_front.duration),
            ("wall_jump.duration", self.wall_jump.duration),
        ];
        for (field, value) in durations {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    requirement: "greater than zero",
                });
            }
        }

        let speeds = [
            ("walk.forward_speed", self.walk.forward_speed),
            ("walk.right_speed", self.walk.right_speed),
            ("walk.fast_speed", self.walk.fast_speed),
            ("sprint.speed", self.sprint.speed),
            ("sprint.fast_speed", self.sprint.fast_speed),
            ("slide.speed", self.slide.speed),
            ("wall_run.speed", self.wall_run.speed),
            ("wall_jump.speed", self.wall_jump.speed),
            ("ledge.grab_speed", self.ledge.grab_speed),
        ];
        for (field, value) in speeds {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    requirement: "non-negative",
                });
            }
        }

        let curves = [
            ("jump.gravity", &self.jump.gravity),
            ("slide.speed_fall", &self.slide.speed_fall),
            ("wall_run.gravity", &self.wall_run.gravity),
            ("wall_run_front.gravity", &self.wall_run_front.gravity),
            ("wall_jump.gravity", &self.wall_jump.gravity),
        ];
        for (field, curve) in curves {
            if !curve.is_sorted() {
                return Err(ConfigError::Invalid {
                    field,
                    requirement: "keyed in increasing time order",
                });
            }
        }

        Ok(())
    }
}
