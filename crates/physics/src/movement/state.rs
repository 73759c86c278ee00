//! Movement state identifiers and the per-tick input snapshot.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Sub-phase of the climb placeholder state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimbPhase {
    ClimbUp,
    ClimbDown,
}

/// Which side of the character a run-along wall is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// Sign applied to the wall normal: +1 for a wall on the left, -1 for a
    /// wall on the right.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            WallSide::Left => 1.0,
            WallSide::Right => -1.0,
        }
    }
}

/// The movement state the controller is in. Exactly one is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    #[default]
    Stand,
    Walk,
    Sprint,
    Jump,
    Slide,
    WallRunLeft,
    WallRunRight,
    WallRunFront,
    WallJump,
    Fall,
    LedgeGrab,
    LedgeMove,
    /// Climb placeholder, tagged with the phase it stands in for.
    Await(ClimbPhase),
}

impl MovementType {
    /// Whether entering this state turns gravity on for the body.
    pub fn gravity_enabled(self) -> bool {
        matches!(
            self,
            MovementType::Stand
                | MovementType::Walk
                | MovementType::Sprint
                | MovementType::Slide
                | MovementType::Fall
        )
    }

    /// States that run for a fixed duration and raise the end-of-state signal.
    pub fn is_time_bounded(self) -> bool {
        matches!(
            self,
            MovementType::Jump
                | MovementType::Slide
                | MovementType::WallRunLeft
                | MovementType::WallRunRight
                | MovementType::WallRunFront
                | MovementType::WallJump
        )
    }

    /// Ledge and climb placeholders: gravity off, velocity left alone.
    pub fn is_suspended(self) -> bool {
        matches!(
            self,
            MovementType::LedgeGrab | MovementType::LedgeMove | MovementType::Await(_)
        )
    }

    pub fn is_wall_run(self) -> bool {
        matches!(
            self,
            MovementType::WallRunLeft | MovementType::WallRunRight | MovementType::WallRunFront
        )
    }

    /// Wall-run state for a side wall.
    pub fn wall_run(side: WallSide) -> Self {
        match side {
            WallSide::Left => MovementType::WallRunLeft,
            WallSide::Right => MovementType::WallRunRight,
        }
    }
}

/// Player input for a single tick.
///
/// Produced by the input source and handed to the controller wholesale with
/// `set_input`; the controller never edits it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Raw 2D movement axis (x = right, y = forward), magnitude nominally 0..=1.
    pub movement_axis: Vec2,

    /// Axis rotated into world space by the camera.
    pub movement_vector: Vec3,

    /// Forward component of the axis.
    pub forward: f32,

    /// Right component of the axis.
    pub right: f32,

    pub jump: bool,
    pub crouch: bool,
    pub sprint: bool,

    /// Horizontal vector from the camera to the character. Walk and sprint
    /// face along it.
    pub camera_direction: Vec3,

    /// Camera forward axis.
    pub camera_forward: Vec3,

    /// Camera forward axis flattened onto the ground plane and normalized.
    pub camera_forward_flat: Vec3,

    pub camera_rotation: Quat,

    /// Look rotation along `camera_direction`.
    pub camera_look_flat: Quat,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            movement_axis: Vec2::ZERO,
            movement_vector: Vec3::ZERO,
            forward: 0.0,
            right: 0.0,
            jump: false,
            crouch: false,
            sprint: false,
            camera_direction: Vec3::Z,
            camera_forward: Vec3::Z,
            camera_forward_flat: Vec3::Z,
            camera_rotation: Quat::IDENTITY,
            camera_look_flat: Quat::IDENTITY,
        }
    }
}

impl InputSnapshot {
    /// Snapshot for a camera looking straight down +Z, with the axis mapped
    /// directly to world X/Z.
    pub fn from_axis(axis: Vec2) -> Self {
        Self {
            movement_axis: axis,
            movement_vector: Vec3::new(axis.x, 0.0, axis.y),
            forward: axis.y,
            right: axis.x,
            ..Default::default()
        }
    }

    #[inline]
    pub fn axis_magnitude(&self) -> f32 {
        self.movement_axis.length()
    }

    #[inline]
    pub fn movement_magnitude(&self) -> f32 {
        self.movement_vector.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_gravity_policy() {
        for state in [
            MovementType::Stand,
            MovementType::Walk,
            MovementType::Sprint,
            MovementType::Slide,
            MovementType::Fall,
        ] {
            assert!(state.gravity_enabled(), "{state:?} should fall under gravity");
        }

        for state in [
            MovementType::Jump,
            MovementType::WallRunLeft,
            MovementType::WallRunRight,
            MovementType::WallRunFront,
            MovementType::WallJump,
            MovementType::LedgeGrab,
            MovementType::LedgeMove,
            MovementType::Await(ClimbPhase::ClimbUp),
            MovementType::Await(ClimbPhase::ClimbDown),
        ] {
            assert!(!state.gravity_enabled(), "{state:?} should not use gravity");
        }
    }

    #[test]
    fn test_climb_phases_are_distinguishable() {
        let up = MovementType::Await(ClimbPhase::ClimbUp);
        let down = MovementType::Await(ClimbPhase::ClimbDown);
        assert_ne!(up, down);
        assert!(up.is_suspended() && down.is_suspended());
    }

    #[test]
    fn test_time_bounded_and_wall_run_sets() {
        let bounded = [
            MovementType::Jump,
            MovementType::Slide,
            MovementType::WallRunLeft,
            MovementType::WallRunRight,
            MovementType::WallRunFront,
            MovementType::WallJump,
        ];
        for state in bounded {
            assert!(state.is_time_bounded(), "{state:?}");
            assert!(!state.is_suspended(), "{state:?}");
        }
        for state in [
            MovementType::Stand,
            MovementType::Walk,
            MovementType::Sprint,
            MovementType::Fall,
            MovementType::LedgeGrab,
            MovementType::Await(ClimbPhase::ClimbDown),
        ] {
            assert!(!state.is_time_bounded(), "{state:?}");
        }

        let wall_runs: Vec<_> = bounded.into_iter().filter(|s| s.is_wall_run()).collect();
        assert_eq!(
            wall_runs,
            [
                MovementType::WallRunLeft,
                MovementType::WallRunRight,
                MovementType::WallRunFront
            ]
        );
        assert!(MovementType::wall_run(WallSide::Left).is_wall_run());
    }

    #[test]
    fn test_wall_side_sign() {
        assert_eq!(WallSide::Left.sign(), 1.0);
        assert_eq!(WallSide::Right.sign(), -1.0);
        assert_eq!(MovementType::wall_run(WallSide::Right), MovementType::WallRunRight);
    }

    #[test]
    fn test_from_axis() {
        let input = InputSnapshot::from_axis(Vec2::new(0.6, 0.8));
        assert_eq!(input.forward, 0.8);
        assert_eq!(input.right, 0.6);
        assert!((input.axis_magnitude() - 1.0).abs() < 1e-6);
        assert_eq!(input.movement_vector, Vec3::new(0.6, 0.0, 0.8));
    }
}
