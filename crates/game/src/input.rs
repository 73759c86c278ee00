//! Player input sampling.
//!
//! This module turns raw device input and the camera pose into the
//! [`InputSnapshot`] the movement controller consumes each tick.

use glam::{Quat, Vec2, Vec3};
use parkour_physics::movement::{flatten, look_rotation};
use parkour_physics::InputSnapshot;
use serde::{Deserialize, Serialize};

/// How long a jump press stays asserted if nothing consumes it (seconds).
pub const DEFAULT_JUMP_BUFFER_TIME: f32 = 1.0;

/// Raw device input for a single frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RawInput {
    /// New movement axis reading, if the device reported one this frame.
    /// The previous reading is kept otherwise.
    pub axis: Option<Vec2>,

    /// Jump was pressed this frame.
    pub jump_pressed: bool,

    /// Crouch is held.
    pub crouch: bool,

    /// Sprint is held.
    pub sprint: bool,
}

/// Camera placement used to make input camera-relative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraPose {
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Stateful input sampler.
///
/// Holds the last axis reading and latches jump presses for
/// `jump_buffer_time` seconds so a press slightly before landing still counts.
#[derive(Debug, Clone)]
pub struct InputSampler {
    pub jump_buffer_time: f32,
    axis: Vec2,
    jump: bool,
    jump_expires_at: f32,
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new(DEFAULT_JUMP_BUFFER_TIME)
    }
}

impl InputSampler {
    pub fn new(jump_buffer_time: f32) -> Self {
        Self {
            jump_buffer_time,
            axis: Vec2::ZERO,
            jump: false,
            jump_expires_at: 0.0,
        }
    }

    /// Build this frame's snapshot.
    ///
    /// # Arguments
    ///
    /// * `raw` - Device input for this frame
    /// * `camera` - Current camera pose
    /// * `character_position` - Where the controlled character is
    /// * `time` - Monotonic time in seconds
    pub fn sample(
        &mut self,
        raw: &RawInput,
        camera: &CameraPose,
        character_position: Vec3,
        time: f32,
    ) -> InputSnapshot {
        if let Some(axis) = raw.axis {
            self.axis = axis;
        }

        if self.jump && time > self.jump_expires_at {
            self.jump = false;
        }
        if raw.jump_pressed {
            self.jump = true;
            self.jump_expires_at = time + self.jump_buffer_time;
        }

        let camera_forward = camera.forward();
        let camera_direction = flatten(character_position - camera.position);

        InputSnapshot {
            movement_axis: self.axis,
            movement_vector: camera.rotation * Vec3::new(self.axis.x, 0.0, self.axis.y),
            forward: self.axis.y,
            right: self.axis.x,
            jump: self.jump,
            crouch: raw.crouch,
            sprint: raw.sprint,
            camera_direction,
            camera_forward,
            camera_forward_flat: flatten(camera_forward).normalize_or_zero(),
            camera_rotation: camera.rotation,
            camera_look_flat: look_rotation(camera_direction, Vec3::Y).unwrap_or(Quat::IDENTITY),
        }
    }

    /// Drop a latched jump. Called when the character leaves the ground
    /// without jumping.
    pub fn ungrounded(&mut self) {
        self.jump = false;
    }

    /// Whether a jump is currently latched.
    pub fn jump_latched(&self) -> bool {
        self.jump
    }
}
