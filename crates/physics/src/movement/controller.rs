//! Character movement controller.
//!
//! The controller is a state machine with one Start and one Tick operation
//! per [`MovementType`]. It never switches state on its own: an outside
//! director reads [`MovementController::end_of_state`], the sensors and the
//! timers, and calls the Start operation of whatever should run next.

use glam::Vec3;

use crate::body::RigidBody;
use crate::sensor::ContactHit;

use super::config::{
    JumpTuning, SlideTuning, SprintTuning, WalkTuning, WallJumpTuning, WallRunFrontTuning,
    WallRunTuning,
};
use super::curve::Curve;
use super::orientation::{flatten, look_rotation, right_axis_rotation};
use super::state::{ClimbPhase, InputSnapshot, MovementType, WallSide};
use super::timers::{EntrySnapshot, StateTimers};

/// Movement vector length below which walk and sprint treat input as idle.
pub const MOVE_INPUT_DEADZONE: f32 = 0.1;

/// Multiplier applied to `delta_time` by air control, slide steering and
/// walk braking. Tuning values for those are expressed per millisecond.
pub const ADJUSTMENT_TIME_SCALE: f32 = 1000.0;

/// Outward speed along the wall normal while wall-running sideways, keeping
/// the character from sinking into the wall.
pub const WALL_PUSH_SPEED: f32 = 0.5;

/// Character movement state machine.
///
/// # Example
///
/// ```ignore
/// let mut controller = MovementController::new();
/// let tuning = MovementTuning::default();
///
/// controller.start_jump(&mut body, tuning.jump.launch_velocity);
///
/// // Each tick:
/// controller.set_input(input);
/// controller.jump(&mut body, &tuning.jump, delta_time);
/// if controller.end_of_state() {
///     controller.start_fall(&mut body);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MovementController {
    movement_type: MovementType,
    previous_movement_type: MovementType,

    /// Raised by time-bounded states once their duration has elapsed.
    end_of_state: bool,

    timers: StateTimers,
    entry: EntrySnapshot,
    input: InputSnapshot,

    /// Vertical speed integrated by jump, wall-run and wall-jump.
    jump_velocity: f32,

    /// Horizontal launch direction captured by wall-jump.
    direction: Vec3,
}

impl MovementController {
    /// Create a controller in the `Stand` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the input snapshot. Must be called before the tick that should
    /// see it.
    #[inline]
    pub fn set_input(&mut self, input: InputSnapshot) {
        self.input = input;
    }

    #[inline]
    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    #[inline]
    pub fn movement_type(&self) -> MovementType {
        self.movement_type
    }

    /// State that was active when the current one was entered.
    #[inline]
    pub fn previous_movement_type(&self) -> MovementType {
        self.previous_movement_type
    }

    #[inline]
    pub fn end_of_state(&self) -> bool {
        self.end_of_state
    }

    /// Seconds since the active state was entered.
    #[inline]
    pub fn current_time(&self) -> f32 {
        self.timers.current
    }

    #[inline]
    pub fn full_input_time(&self) -> f32 {
        self.timers.full_input
    }

    #[inline]
    pub fn full_speed_time(&self) -> f32 {
        self.timers.full_speed
    }

    #[inline]
    pub fn timers(&self) -> &StateTimers {
        &self.timers
    }

    /// Body velocity when the active state was entered.
    #[inline]
    pub fn start_velocity(&self) -> Vec3 {
        self.entry.velocity
    }

    /// Body position when the active state was entered.
    #[inline]
    pub fn start_position(&self) -> Vec3 {
        self.entry.position
    }

    /// Working vertical speed of the airborne states.
    #[inline]
    pub fn jump_velocity(&self) -> f32 {
        self.jump_velocity
    }

    /// Launch direction captured by the last wall-jump.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    // ========================================================================
    // Grounded States
    // ========================================================================

    pub fn start_standing(&mut self, body: &mut dyn RigidBody) {
        self.enter(body, MovementType::Stand);
    }

    /// Hold still horizontally. Vertical velocity is left to gravity.
    pub fn stand(&mut self, body: &mut dyn RigidBody, delta_time: f32) {
        self.expect_active(MovementType::Stand);
        self.timers.advance(delta_time);

        let velocity = body.velocity();
        body.set_velocity(Vec3::new(0.0, velocity.y, 0.0));
        body.set_angular_velocity(Vec3::ZERO);
    }

    pub fn start_walking(&mut self, body: &mut dyn RigidBody) {
        self.enter(body, MovementType::Walk);
    }

    /// Walk relative to the camera, turning to face away from it.
    pub fn walk(&mut self, body: &mut dyn RigidBody, tuning: &WalkTuning, delta_time: f32) {
        self.expect_active(MovementType::Walk);

        let velocity = body.velocity();
        self.timers.advance(delta_time);
        self.timers.track_effort(
            delta_time,
            self.input.axis_magnitude(),
            velocity.length(),
            tuning.fast_speed,
        );

        if self.input.movement_magnitude() > MOVE_INPUT_DEADZONE {
            if let Some(facing) = look_rotation(flatten(self.input.camera_direction), Vec3::Y) {
                body.set_rotation(body.rotation().lerp(facing, tuning.rotation_speed));
            }

            let local = Vec3::new(
                self.input.right * tuning.right_speed,
                0.0,
                self.input.forward * tuning.forward_speed,
            );
            let mut target = body.rotation() * local;
            target.y = velocity.y;

            body.set_velocity(velocity.lerp(target, tuning.acceleration));
        } else {
            let rest = Vec3::new(0.0, velocity.y, 0.0);
            let braking = delta_time * ADJUSTMENT_TIME_SCALE * tuning.acceleration;
            body.set_velocity(velocity.lerp(rest, braking));
        }

        body.set_angular_velocity(Vec3::ZERO);
    }

    pub fn start_sprinting(&mut self, body: &mut dyn RigidBody) {
        self.enter(body, MovementType::Sprint);
    }

    /// Run in the input direction relative to the camera, turning to face
    /// the direction of travel.
    pub fn sprint(&mut self, body: &mut dyn RigidBody, tuning: &SprintTuning, delta_time: f32) {
        self.expect_active(MovementType::Sprint);

        let velocity = body.velocity();
        self.timers.advance(delta_time);
        self.timers.track_effort(
            delta_time,
            self.input.axis_magnitude(),
            velocity.length(),
            tuning.fast_speed,
        );

        let target = if self.input.movement_magnitude() > MOVE_INPUT_DEADZONE {
            let basis = look_rotation(flatten(self.input.camera_direction), Vec3::Y)
                .unwrap_or_else(|| body.rotation());
            let forward = basis * Vec3::Z;
            let right = basis * Vec3::X;

            let mut target = (forward * self.input.forward + right * self.input.right) * tuning.speed;
            if let Some(facing) = look_rotation(target, Vec3::Y) {
                body.set_rotation(body.rotation().lerp(facing, tuning.rotation_speed));
            }
            target.y = velocity.y;
            target
        } else {
            Vec3::new(0.0, velocity.y, 0.0)
        };

        body.set_angular_velocity(Vec3::ZERO);
        body.set_velocity(velocity.lerp(target, tuning.acceleration));
    }

    pub fn start_sliding(&mut self, body: &mut dyn RigidBody) {
        self.enter(body, MovementType::Slide);
    }

    /// Slide along the facing direction with speed shaped by `speed_fall`.
    pub fn slide<C: Curve>(
        &mut self,
        body: &mut dyn RigidBody,
        tuning: &SlideTuning<C>,
        delta_time: f32,
    ) {
        self.expect_active(MovementType::Slide);
        self.timers.advance(delta_time);
        self.update_end_of_state(tuning.duration);

        let progress = self.timers.progress(tuning.duration);
        let steering = delta_time * ADJUSTMENT_TIME_SCALE * tuning.adjustment_speed;
        let forward = body.forward();
        let right = body.right();

        let mut next = forward * tuning.speed * tuning.speed_fall.evaluate(progress)
            + forward * self.input.forward * steering
            + right * self.input.right * steering;
        next.y = body.velocity().y;
        body.set_velocity(next);
    }

    // ========================================================================
    // Airborne States
    // ========================================================================

    pub fn start_jump(&mut self, body: &mut dyn RigidBody, jump_velocity: f32) {
        self.enter(body, MovementType::Jump);
        self.jump_velocity = jump_velocity;
    }

    /// Rise and fall under curve-attenuated gravity with limited air control.
    pub fn jump<C: Curve>(
        &mut self,
        body: &mut dyn RigidBody,
        tuning: &JumpTuning<C>,
        delta_time: f32,
    ) {
        self.expect_active(MovementType::Jump);
        self.timers.advance(delta_time);
        self.integrate_vertical(&tuning.gravity, tuning.duration, tuning.max_gravity, delta_time);

        let control = tuning.adjustment_speed * delta_time * ADJUSTMENT_TIME_SCALE;
        let mut next = body.velocity()
            + body.right() * self.input.right * control
            + body.forward() * self.input.forward * control;
        next.y = self.jump_velocity;
        body.set_velocity(next);
        body.set_angular_velocity(Vec3::ZERO);

        self.update_end_of_state(tuning.duration);
    }

    /// Enter free fall. Unlike the other states this does not capture the
    /// body's position and velocity.
    pub fn start_fall(&mut self, body: &mut dyn RigidBody) {
        self.timers.reset();
        self.end_of_state = false;
        self.previous_movement_type = self.movement_type;
        body.set_gravity_enabled(true);
        self.movement_type = MovementType::Fall;

        log::debug!("fall (from {:?})", self.previous_movement_type);
    }

    /// Gravity does the work; only time is tracked.
    pub fn fall(&mut self, delta_time: f32) {
        self.expect_active(MovementType::Fall);
        self.timers.advance(delta_time);
    }

    // ========================================================================
    // Wall States
    // ========================================================================

    pub fn start_wall_run_left(&mut self, body: &mut dyn RigidBody, jump_velocity: f32) {
        self.start_wall_run_side(body, WallSide::Left, jump_velocity);
    }

    pub fn start_wall_run_right(&mut self, body: &mut dyn RigidBody, jump_velocity: f32) {
        self.start_wall_run_side(body, WallSide::Right, jump_velocity);
    }

    /// Run along a wall on the left. `wall` is the left wall sensor result.
    pub fn wall_run_left<C: Curve>(
        &mut self,
        body: &mut dyn RigidBody,
        wall: &ContactHit,
        tuning: &WallRunTuning<C>,
        delta_time: f32,
    ) {
        self.wall_run_side(body, WallSide::Left, wall, tuning, delta_time);
    }

    /// Run along a wall on the right. `wall` is the right wall sensor result.
    pub fn wall_run_right<C: Curve>(
        &mut self,
        body: &mut dyn RigidBody,
        wall: &ContactHit,
        tuning: &WallRunTuning<C>,
        delta_time: f32,
    ) {
        self.wall_run_side(body, WallSide::Right, wall, tuning, delta_time);
    }

    fn start_wall_run_side(&mut self, body: &mut dyn RigidBody, side: WallSide, jump_velocity: f32) {
        self.enter(body, MovementType::wall_run(side));
        self.jump_velocity = jump_velocity;
    }

    fn wall_run_side<C: Curve>(
        &mut self,
        body: &mut dyn RigidBody,
        side: WallSide,
        wall: &ContactHit,
        tuning: &WallRunTuning<C>,
        delta_time: f32,
    ) {
        self.expect_active(MovementType::wall_run(side));
        assert!(
            wall.detected,
            "{side:?} wall run ticked without a detected wall contact"
        );
        self.timers.advance(delta_time);

        let sign = side.sign();
        if let Some(rotation) = right_axis_rotation(wall.normal * sign) {
            body.set_rotation(rotation);
        }

        self.integrate_vertical(&tuning.gravity, tuning.duration, tuning.max_gravity, delta_time);

        let next = body.forward() * tuning.speed
            + Vec3::Y * self.jump_velocity
            + wall.normal * WALL_PUSH_SPEED * sign;
        body.set_velocity(next);

        self.update_end_of_state(tuning.duration);
    }

    pub fn start_wall_run_front(&mut self, body: &mut dyn RigidBody, jump_velocity: f32) {
        self.enter(body, MovementType::WallRunFront);
        self.jump_velocity = jump_velocity;
    }

    /// Run straight up the wall ahead.
    pub fn wall_run_front<C: Curve>(
        &mut self,
        body: &mut dyn RigidBody,
        tuning: &WallRunFrontTuning<C>,
        delta_time: f32,
    ) {
        self.expect_active(MovementType::WallRunFront);
        self.timers.advance(delta_time);
        self.integrate_vertical(&tuning.gravity, tuning.duration, tuning.max_gravity, delta_time);

        body.set_velocity(Vec3::Y * self.jump_velocity);

        self.update_end_of_state(tuning.duration);
    }

    /// Kick off a wall. Only the horizontal part of `direction` is used.
    pub fn start_wall_jump(&mut self, body: &mut dyn RigidBody, direction: Vec3, jump_velocity: f32) {
        self.enter(body, MovementType::WallJump);
        self.direction = flatten(direction).normalize_or_zero();
        self.jump_velocity = jump_velocity;
    }

    pub fn wall_jump<C: Curve>(
        &mut self,
        body: &mut dyn RigidBody,
        tuning: &WallJumpTuning<C>,
        delta_time: f32,
    ) {
        self.expect_active(MovementType::WallJump);
        self.timers.advance(delta_time);

        if let Some(facing) = look_rotation(self.direction, Vec3::Y) {
            body.set_rotation(facing);
        }
        body.set_angular_velocity(Vec3::ZERO);

        self.integrate_vertical(&tuning.gravity, tuning.duration, tuning.max_gravity, delta_time);
        body.set_velocity(self.direction * tuning.speed + Vec3::Y * self.jump_velocity);

        self.update_end_of_state(tuning.duration);
    }

    // ========================================================================
    // Ledge and Climb States
    //
    // Placeholders until their motion is designed: gravity off, velocity
    // untouched. A body that enters while moving keeps drifting.
    // ========================================================================

    pub fn start_ledge_grab(&mut self, body: &mut dyn RigidBody) {
        self.enter(body, MovementType::LedgeGrab);
    }

    pub fn ledge_grab(
        &mut self,
        body: &mut dyn RigidBody,
        grab_point: &ContactHit,
        speed: f32,
        delta_time: f32,
    ) {
        self.expect_active(MovementType::LedgeGrab);
        log::trace!("holding ledge at {:?} (speed {speed})", grab_point.point);
        self.suspend(body, delta_time);
    }

    pub fn start_ledge_move(&mut self, body: &mut dyn RigidBody) {
        self.enter(body, MovementType::LedgeMove);
    }

    pub fn ledge_move(&mut self, body: &mut dyn RigidBody, delta_time: f32) {
        self.expect_active(MovementType::LedgeMove);
        self.suspend(body, delta_time);
    }

    pub fn start_climb_up(&mut self, body: &mut dyn RigidBody) {
        self.enter(body, MovementType::Await(ClimbPhase::ClimbUp));
    }

    pub fn climb_up(&mut self, body: &mut dyn RigidBody, delta_time: f32) {
        self.expect_active(MovementType::Await(ClimbPhase::ClimbUp));
        self.suspend(body, delta_time);
    }

    pub fn start_climb_down(&mut self, body: &mut dyn RigidBody) {
        self.enter(body, MovementType::Await(ClimbPhase::ClimbDown));
    }

    pub fn climb_down(&mut self, body: &mut dyn RigidBody, delta_time: f32) {
        self.expect_active(MovementType::Await(ClimbPhase::ClimbDown));
        self.suspend(body, delta_time);
    }

    // ========================================================================
    // Shared Bookkeeping
    // ========================================================================

    /// Entry preamble shared by every state except `Fall`.
    fn enter(&mut self, body: &mut dyn RigidBody, next: MovementType) {
        self.timers.reset();
        self.entry = EntrySnapshot {
            position: body.position(),
            velocity: body.velocity(),
        };
        self.end_of_state = false;
        self.previous_movement_type = self.movement_type;

        body.set_gravity_enabled(next.gravity_enabled());
        self.movement_type = next;

        log::debug!(
            "{:?} (from {:?}) entry velocity={:?}",
            next,
            self.previous_movement_type,
            self.entry.velocity
        );
    }

    fn expect_active(&self, expected: MovementType) {
        assert!(
            self.movement_type == expected,
            "{expected:?} ticked while {:?} is active",
            self.movement_type
        );
    }

    /// Raise the end-of-state signal once elapsed time passes `duration`.
    fn update_end_of_state(&mut self, duration: f32) {
        debug_assert!(
            self.movement_type.is_time_bounded(),
            "{:?} has no duration",
            self.movement_type
        );
        if self.timers.progress(duration) > 1.0 {
            if !self.end_of_state {
                log::debug!(
                    "{:?} finished after {:.3}s",
                    self.movement_type,
                    self.timers.current
                );
            }
            self.end_of_state = true;
        }
    }

    /// Subtract one tick of curve-attenuated gravity from the vertical speed.
    fn integrate_vertical(
        &mut self,
        gravity: &impl Curve,
        duration: f32,
        max_gravity: f32,
        delta_time: f32,
    ) {
        debug_assert!(
            matches!(self.movement_type, MovementType::Jump | MovementType::WallJump)
                || self.movement_type.is_wall_run(),
            "{:?} has no vertical accumulator",
            self.movement_type
        );
        let progress = self.timers.progress(duration);
        self.jump_velocity -= gravity.evaluate(progress) * max_gravity * delta_time;
    }

    fn suspend(&mut self, body: &mut dyn RigidBody, delta_time: f32) {
        self.timers.advance(delta_time);
        body.set_gravity_enabled(false);
    }
}

// ============================================================================
// Tests
// ============================================================================
