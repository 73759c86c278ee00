//! Character movement state machine.
//!
//! This module implements a parkour-style movement set with:
//!
//! - Standing, camera-relative walking and sprinting
//! - Sliding with a speed fall-off curve
//! - Jumping, wall-running and wall-jumping under curve-attenuated gravity
//! - Ledge and climb states that hold the character while they run
//! - Inheriting momentum when leaving a moving platform
//!
//! # Design
//!
//! [`MovementController`] exposes one Start and one Tick operation per
//! [`MovementType`]. Start operations reset the state-local timers and set the
//! body's gravity flag; Tick operations integrate one step and write the
//! body's velocity and orientation. Choosing which state to run is left to the
//! caller, which reads the end-of-state signal, timers and sensors.

mod config;
mod controller;
mod curve;
mod orientation;
mod platform;
mod state;
mod timers;

pub use config::{
    JumpTuning, LedgeTuning, MovementTuning, SlideTuning, SprintTuning, WalkTuning,
    WallJumpTuning, WallRunFrontTuning, WallRunTuning,
};
pub use controller::{
    MovementController, ADJUSTMENT_TIME_SCALE, MOVE_INPUT_DEADZONE, WALL_PUSH_SPEED,
};
pub use curve::{Curve, Keyframe, KeyframeCurve};
pub use orientation::{flatten, look_rotation, right_axis_rotation};
pub use state::{ClimbPhase, InputSnapshot, MovementType, WallSide};
pub use timers::{EntrySnapshot, StateTimers, FULL_INPUT_THRESHOLD};
