//! Multi-state movement flows driven through the public game API.

use glam::{Vec2, Vec3};
use parkour_game::{
    default_tuning, CameraPose, ContactHit, MovementError, MovementType, MovingPlatform,
    PlatformId, Player, RawInput, SensorSnapshot, StateRequest, WallSide,
};

const DT: f32 = 1.0 / 60.0;

fn grounded() -> SensorSnapshot {
    SensorSnapshot {
        ground: ContactHit::hit(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    }
}

#[test]
fn jump_runs_to_completion_then_falls() {
    let mut player = Player::new(Vec3::ZERO, default_tuning().unwrap());
    let sensors = SensorSnapshot::default();

    player.start(StateRequest::Jump);
    let mut peak: f32 = 0.0;
    let mut ticks = 0;
    while !player.controller.end_of_state() {
        player.tick(&sensors, DT);
        peak = peak.max(player.position().y);
        ticks += 1;
        assert!(ticks < 600, "jump never finished");
    }
    assert!(peak > 0.0);

    player.start(StateRequest::Fall);
    assert_eq!(player.controller.previous_movement_type(), MovementType::Jump);
    assert!(!player.controller.end_of_state());

    let before = player.velocity().y;
    player.tick(&sensors, DT);
    assert!(player.velocity().y < before);
}

#[test]
fn walk_into_sprint_keeps_heading() {
    let mut player = Player::new(Vec3::ZERO, default_tuning().unwrap());
    let camera = CameraPose {
        position: Vec3::new(0.0, 2.0, -5.0),
        ..Default::default()
    };
    let raw = RawInput {
        axis: Some(Vec2::Y),
        ..Default::default()
    };

    player.start(StateRequest::Walk);
    for frame in 0..60 {
        player.sample_input(&raw, &camera, frame as f32 * DT);
        player.tick(&grounded(), DT);
        player.body.position.y = 0.0;
    }
    let walk_speed = player.body.horizontal_speed();

    player.start(StateRequest::Sprint);
    assert_eq!(player.controller.start_velocity(), player.velocity());
    for frame in 60..120 {
        player.sample_input(&raw, &camera, frame as f32 * DT);
        player.tick(&grounded(), DT);
        player.body.position.y = 0.0;
    }

    assert!(player.body.horizontal_speed() > walk_speed);
    assert!(player.velocity().x.abs() < 1e-3);
    assert!(player.velocity().z > 0.0);
}

#[test]
fn wall_run_then_wall_jump_away_from_wall() {
    let mut player = Player::new(Vec3::ZERO, default_tuning().unwrap());
    let sensors = SensorSnapshot {
        left_wall: ContactHit::hit(Vec3::new(-0.5, 1.0, 0.0), Vec3::X),
        ..Default::default()
    };

    player.start(StateRequest::WallRun(WallSide::Left));
    for _ in 0..10 {
        player.tick(&sensors, DT);
    }
    assert!(player.velocity().z.abs() > 0.0);

    player.start(StateRequest::WallJump {
        direction: Vec3::new(1.0, 0.5, 0.0),
    });
    assert_eq!(player.controller.direction(), Vec3::X);
    player.tick(&sensors, DT);

    assert!(player.velocity().x > 0.0);
    assert!(player.velocity().y > 0.0);
}

#[test]
fn leaving_a_platform_keeps_its_momentum() {
    let mut player = Player::new(Vec3::ZERO, default_tuning().unwrap());
    let platform = MovingPlatform::new(PlatformId(3), Vec3::new(2.0, 0.0, 0.0));

    player.board_platform(platform.id);
    assert_eq!(player.body.parent, Some(PlatformId(3)));

    player.leave_platform(&platform).unwrap();
    player.start(StateRequest::Fall);

    assert_eq!(player.body.parent, None);
    assert_eq!(player.velocity().x, 2.0);
}

#[test]
fn leaving_a_static_platform_is_an_error() {
    let mut player = Player::new(Vec3::ZERO, default_tuning().unwrap());
    let platform = MovingPlatform::fixed(PlatformId(4));

    player.board_platform(platform.id);
    let err = player.leave_platform(&platform).unwrap_err();

    assert_eq!(err, MovementError::PlatformWithoutBody(PlatformId(4)));
    assert_eq!(player.body.parent, Some(PlatformId(4)));
}
