//! Parkour Movement Core
//!
//! A per-tick character movement state machine that turns player input and
//! environment contact results into rigid body motion.
//!
//! # Architecture
//!
//! - **Body**: [`RigidBody`] is the capability the controller drives. The
//!   engine owns the body; [`KinematicBody`] is a plain stand-in.
//! - **Sensor**: contact results (ground, walls, ledge) computed elsewhere.
//! - **Movement**: the [`MovementController`] and its tuning.
//!
//! # Design Principles
//!
//! 1. **No hidden transitions**: the controller only changes state when a
//!    Start operation is called.
//! 2. **Caller-owned tuning**: speeds, durations and curves are passed in on
//!    every call.
//! 3. **Loud contracts**: ticking the wrong state panics instead of
//!    integrating on stale data.

pub mod body;
pub mod error;
pub mod movement;
pub mod sensor;

// Re-export commonly used types
pub use body::{KinematicBody, MovingPlatform, Platform, PlatformId, RigidBody};
pub use error::{ConfigError, MovementError};
pub use movement::{
    ClimbPhase, Curve, InputSnapshot, KeyframeCurve, MovementController, MovementTuning,
    MovementType, WallSide,
};
pub use sensor::{ContactHit, SensorSnapshot};
