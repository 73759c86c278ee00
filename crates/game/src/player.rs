//! Player entity: one body, one controller and the tuning that drives it.

use glam::Vec3;
use parkour_physics::{
    ClimbPhase, KinematicBody, MovementController, MovementError, MovementTuning, MovementType,
    Platform, PlatformId, SensorSnapshot, WallSide,
};

use crate::input::{CameraPose, InputSampler, RawInput};

/// World gravity applied by [`KinematicBody::integrate`] (meters/second²).
pub const DEFAULT_GRAVITY: f32 = 9.81;

/// A request to enter a movement state.
///
/// Launch velocities come from the player's tuning; only the wall jump needs
/// extra data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateRequest {
    Stand,
    Walk,
    Sprint,
    Slide,
    Jump,
    Fall,
    WallRun(WallSide),
    WallRunFront,
    WallJump { direction: Vec3 },
    LedgeGrab,
    LedgeMove,
    Climb(ClimbPhase),
}

/// A player in the game.
#[derive(Debug, Clone)]
pub struct Player {
    pub body: KinematicBody,
    pub controller: MovementController,
    pub tuning: MovementTuning,
    pub input: InputSampler,

    /// Gravity used when integrating the body.
    pub gravity: f32,
}

impl Player {
    /// Create a standing player at the given spawn position.
    pub fn new(spawn_position: Vec3, tuning: MovementTuning) -> Self {
        let mut player = Self {
            body: KinematicBody::new(spawn_position),
            controller: MovementController::new(),
            tuning,
            input: InputSampler::default(),
            gravity: DEFAULT_GRAVITY,
        };
        player.controller.start_standing(&mut player.body);
        player
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.body.velocity
    }

    #[inline]
    pub fn movement_type(&self) -> MovementType {
        self.controller.movement_type()
    }

    /// Sample this frame's device input and hand it to the controller.
    pub fn sample_input(&mut self, raw: &RawInput, camera: &CameraPose, time: f32) {
        let snapshot = self.input.sample(raw, camera, self.body.position, time);
        self.controller.set_input(snapshot);
    }

    /// Enter a movement state.
    pub fn start(&mut self, request: StateRequest) {
        let body = &mut self.body;
        let controller = &mut self.controller;
        let tuning = &self.tuning;

        match request {
            StateRequest::Stand => controller.start_standing(body),
            StateRequest::Walk => controller.start_walking(body),
            StateRequest::Sprint => controller.start_sprinting(body),
            StateRequest::Slide => controller.start_sliding(body),
            StateRequest::Jump => controller.start_jump(body, tuning.jump.launch_velocity),
            StateRequest::Fall => {
                // Walking off an edge must not leave a buffered jump behind.
                self.input.ungrounded();
                controller.start_fall(body);
            }
            StateRequest::WallRun(WallSide::Left) => {
                controller.start_wall_run_left(body, tuning.wall_run.launch_velocity)
            }
            StateRequest::WallRun(WallSide::Right) => {
                controller.start_wall_run_right(body, tuning.wall_run.launch_velocity)
            }
            StateRequest::WallRunFront => {
                controller.start_wall_run_front(body, tuning.wall_run_front.launch_velocity)
            }
            StateRequest::WallJump { direction } => {
                controller.start_wall_jump(body, direction, tuning.wall_jump.launch_velocity)
            }
            StateRequest::LedgeGrab => controller.start_ledge_grab(body),
            StateRequest::LedgeMove => controller.start_ledge_move(body),
            StateRequest::Climb(ClimbPhase::ClimbUp) => controller.start_climb_up(body),
            StateRequest::Climb(ClimbPhase::ClimbDown) => controller.start_climb_down(body),
        }
    }

    /// Run the active state's tick, then integrate the body.
    ///
    /// Wall runs read the matching side's wall sensor and the ledge grab reads
    /// the grab point.
    pub fn tick(&mut self, sensors: &SensorSnapshot, delta_time: f32) {
        let body = &mut self.body;
        let controller = &mut self.controller;
        let tuning = &self.tuning;

        match controller.movement_type() {
            MovementType::Stand => controller.stand(body, delta_time),
            MovementType::Walk => controller.walk(body, &tuning.walk, delta_time),
            MovementType::Sprint => controller.sprint(body, &tuning.sprint, delta_time),
            MovementType::Slide => controller.slide(body, &tuning.slide, delta_time),
            MovementType::Jump => controller.jump(body, &tuning.jump, delta_time),
            MovementType::Fall => controller.fall(delta_time),
            MovementType::WallRunLeft => {
                controller.wall_run_left(body, &sensors.left_wall, &tuning.wall_run, delta_time)
            }
            MovementType::WallRunRight => {
                controller.wall_run_right(body, &sensors.right_wall, &tuning.wall_run, delta_time)
            }
            MovementType::WallRunFront => {
                controller.wall_run_front(body, &tuning.wall_run_front, delta_time)
            }
            MovementType::WallJump => controller.wall_jump(body, &tuning.wall_jump, delta_time),
            MovementType::LedgeGrab => controller.ledge_grab(
                body,
                &sensors.ledge_grab_point,
                tuning.ledge.grab_speed,
                delta_time,
            ),
            MovementType::LedgeMove => controller.ledge_move(body, delta_time),
            MovementType::Await(ClimbPhase::ClimbUp) => controller.climb_up(body, delta_time),
            MovementType::Await(ClimbPhase::ClimbDown) => controller.climb_down(body, delta_time),
        }

        self.body.integrate(delta_time, self.gravity);
    }

    /// Ride a platform.
    pub fn board_platform(&mut self, platform: PlatformId) {
        self.controller.connect_with_platform(&mut self.body, platform);
    }

    /// Step off a platform, keeping its momentum.
    pub fn leave_platform(&mut self, platform: &dyn Platform) -> Result<(), MovementError> {
        self.controller.disconnect_with_platform(&mut self.body, platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use parkour_physics::ContactHit;

    const DT: f32 = 1.0 / 60.0;

    fn player() -> Player {
        Player::new(Vec3::ZERO, MovementTuning::default())
    }

    #[test]
    fn test_player_starts_standing() {
        let player = player();
        assert_eq!(player.movement_type(), MovementType::Stand);
        assert_eq!(player.position(), Vec3::ZERO);
    }

    #[test]
    fn test_stand_tick_keeps_body_still() {
        let mut player = player();
        player.tick(&SensorSnapshot::default(), DT);

        assert_eq!(player.velocity().x, 0.0);
        assert_eq!(player.velocity().z, 0.0);
        assert!((player.controller.current_time() - DT).abs() < 1e-6);
    }

    #[test]
    fn test_start_jump_uses_tuned_launch_velocity() {
        let mut player = player();
        player.start(StateRequest::Jump);

        assert_eq!(player.movement_type(), MovementType::Jump);
        assert_eq!(
            player.controller.jump_velocity(),
            player.tuning.jump.launch_velocity
        );
        assert!(!player.body.gravity_enabled);
    }

    #[test]
    fn test_walk_moves_along_camera_forward() {
        let mut player = player();
        let raw = RawInput {
            axis: Some(Vec2::Y),
            ..Default::default()
        };
        let camera = CameraPose {
            position: Vec3::new(0.0, 2.0, -5.0),
            ..Default::default()
        };

        player.start(StateRequest::Walk);
        for frame in 0..30 {
            player.sample_input(&raw, &camera, frame as f32 * DT);
            player.tick(&SensorSnapshot::default(), DT);
        }

        assert!(player.position().z > 0.0);
        assert!(player.position().x.abs() < 1e-3);
    }

    #[test]
    fn test_fall_clears_buffered_jump() {
        let mut player = player();
        let press = RawInput {
            jump_pressed: true,
            ..Default::default()
        };
        player.sample_input(&press, &CameraPose::default(), 0.0);
        assert!(player.input.jump_latched());

        player.start(StateRequest::Fall);

        assert!(!player.input.jump_latched());
        assert!(player.body.gravity_enabled);
    }

    #[test]
    fn test_wall_run_reads_matching_side_sensor() {
        let mut player = player();
        let sensors = SensorSnapshot {
            right_wall: ContactHit::hit(Vec3::new(1.0, 0.0, 0.0), Vec3::NEG_X),
            ..Default::default()
        };

        player.start(StateRequest::WallRun(WallSide::Right));
        player.tick(&sensors, DT);

        assert_eq!(player.movement_type(), MovementType::WallRunRight);
        assert!(player.velocity().y > 0.0);
    }

    #[test]
    #[should_panic]
    fn test_wall_run_without_wall_panics() {
        let mut player = player();
        player.start(StateRequest::WallRun(WallSide::Left));
        player.tick(&SensorSnapshot::default(), DT);
    }

    #[test]
    fn test_climb_from_rest_stays_put() {
        let mut player = player();
        player.start(StateRequest::Climb(ClimbPhase::ClimbUp));
        player.tick(&SensorSnapshot::default(), DT);

        assert_eq!(player.movement_type(), MovementType::Await(ClimbPhase::ClimbUp));
        assert_eq!(player.position(), Vec3::ZERO);
    }

    #[test]
    fn test_ledge_grab_keeps_entry_velocity_without_gravity() {
        let mut player = player();
        player.body.velocity = Vec3::new(1.0, -3.0, 0.5);
        let sensors = SensorSnapshot {
            ledge_grab_point: ContactHit::hit(Vec3::new(0.0, 1.8, 0.4), Vec3::NEG_Z),
            ..Default::default()
        };

        player.start(StateRequest::LedgeGrab);
        for _ in 0..6 {
            player.tick(&sensors, DT);
            assert_eq!(player.velocity(), Vec3::new(1.0, -3.0, 0.5));
        }

        assert!(!player.body.gravity_enabled);
        assert!(player.position().abs_diff_eq(Vec3::new(1.0, -3.0, 0.5) * 6.0 * DT, 1e-5));
    }

    #[test]
    fn test_walk_brakes_every_tick_with_shipped_tuning() {
        let mut player = Player::new(Vec3::ZERO, crate::default_tuning().unwrap());
        player.start(StateRequest::Walk);
        player.body.velocity = Vec3::new(3.0, 0.0, 0.0);

        let mut speed = player.body.horizontal_speed();
        for tick in 0..8 {
            player.tick(&SensorSnapshot::default(), crate::TICK_DELTA_TIME);
            let next = player.body.horizontal_speed();
            assert!(next < speed, "tick {tick}: {speed} -> {next}");
            speed = next;
        }
    }
}
