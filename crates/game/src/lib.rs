//! Parkour Game Logic
//!
//! Glue between device input, environment sensors and the movement core:
//!
//! - Camera-relative input sampling with a buffered jump
//! - Per-state tick dispatch for a single player
//! - The tuning set the game ships with
//!
//! ```text
//! ┌──────────────┐    ┌────────────────────┐    ┌───────────────┐
//! │ RawInput     │───►│ InputSampler       │───►│ Movement      │
//! │ CameraPose   │    │ (InputSnapshot)    │    │ Controller    │
//! └──────────────┘    └────────────────────┘    └──────┬────────┘
//!                      SensorSnapshot ─────────────────┤
//!                                                      ▼
//!                                               KinematicBody
//! ```
//!
//! Choosing the next state (when to fall, when to wall-run) stays with the
//! caller; [`Player::start`] only performs the entry.

pub mod input;
pub mod player;

pub use input::{CameraPose, InputSampler, RawInput, DEFAULT_JUMP_BUFFER_TIME};
pub use player::{Player, StateRequest, DEFAULT_GRAVITY};

// Re-export physics types for convenience
pub use parkour_physics::{
    ClimbPhase, ConfigError, ContactHit, KinematicBody, MovementController, MovementError,
    MovementTuning, MovementType, MovingPlatform, PlatformId, SensorSnapshot, WallSide,
};

/// Tuning the game ships with, in TOML.
pub const DEFAULT_TUNING_TOML: &str = include_str!("../assets/movement.toml");

/// Simulation tick rate (ticks per second).
pub const TICK_RATE: u32 = 60;

/// Time step per tick in seconds.
pub const TICK_DELTA_TIME: f32 = 1.0 / TICK_RATE as f32;

/// Parse [`DEFAULT_TUNING_TOML`] and check it is stable at [`TICK_RATE`].
pub fn default_tuning() -> Result<MovementTuning, ConfigError> {
    let tuning = MovementTuning::from_toml_str(DEFAULT_TUNING_TOML)?;
    tuning.validate_for_tick(TICK_DELTA_TIME)?;
    Ok(tuning)
}
