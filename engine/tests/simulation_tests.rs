//! Simulation Tests - Full Frames from Keys and Mouse
//!
//! Drives the simulation through `InputState` the way an event loop would,
//! checking the frame order end to end.

use approx::assert_relative_eq;
use glam::{Vec2, Vec3};
use rolling_sphere_engine::camera::{Camera, CameraController};
use rolling_sphere_engine::input::{InputState, KeyCode, MovementConfig};
use rolling_sphere_engine::physics::CollisionSphere;
use rolling_sphere_engine::world::{Scene, Simulation};
use rolling_sphere_engine::SandboxConfig;

const DT: f32 = 1.0 / 60.0;

fn floor_scene() -> Scene {
    let mut scene = Scene::new();
    scene
        .add_box(Vec3::new(-100.0, -1.0, -100.0), Vec3::new(100.0, 0.0, 100.0))
        .unwrap();
    scene
}

/// Player resting at the origin, camera looking level down -Z.
fn level_simulation() -> Simulation {
    let mut scene = floor_scene();
    let player = scene.spawn_body(CollisionSphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0).unwrap());
    let camera = Camera::new(Vec3::new(0.0, 2.5, 0.0), Vec3::new(0.0, 2.5, -1.0));
    let controller = CameraController::new(camera, player, 0.005, Vec2::ZERO);
    Simulation::new(scene, player, controller, MovementConfig::default()).unwrap()
}

#[test]
fn test_walk_turn_swoosh_jump() {
    let mut sim = level_simulation();
    let mut input = InputState::new();

    // Walk north for a second
    input.keyboard.handle_key(KeyCode::W, true);
    for _ in 0..60 {
        let report = sim.step(&input.sample(DT)).unwrap();
        assert!(report.standing);
    }
    let position = sim.player().position();
    assert!(position.z < -0.5);
    assert_relative_eq!(position.x, 0.0, epsilon = 1e-4);
    let speed = sim.player().velocity().length();

    // Quarter turn to the right and swoosh in the same frame
    input.add_mouse_motion(Vec2::new(std::f32::consts::FRAC_PI_2 / 0.005, 0.0));
    input.keyboard.handle_key(KeyCode::ShiftLeft, true);
    let report = sim.step(&input.sample(DT)).unwrap();
    assert!(report.swooshed);

    let velocity = report.sphere_velocity;
    assert!(velocity.normalize().x > 0.999);
    // Redirected speed keeps its magnitude, then friction and the W impulse apply
    assert_relative_eq!(velocity.length(), speed * 0.99 + 0.17, epsilon = 1e-3);

    // Holding shift does not swoosh again
    assert!(!sim.step(&input.sample(DT)).unwrap().swooshed);

    input.keyboard.handle_key(KeyCode::Space, true);
    let report = sim.step(&input.sample(DT)).unwrap();
    assert!(report.jumped);

    let mut peak = report.sphere_position.y;
    for _ in 0..30 {
        let report = sim.step(&input.sample(DT)).unwrap();
        assert!(!report.jumped);
        peak = peak.max(report.sphere_position.y);
    }
    assert!(peak > 3.0, "peak {peak}");
}

#[test]
fn test_camera_rides_the_sphere() {
    let mut sim = level_simulation();
    let mut input = InputState::new();
    input.keyboard.handle_key(KeyCode::D, true);

    for _ in 0..30 {
        sim.step(&input.sample(DT)).unwrap();
    }
    // Camera moved at the start of the last frame, before the body did
    let before = sim.player().position();
    let report = sim.step(&input.sample(DT)).unwrap();
    assert_relative_eq!(report.camera.position.x, before.x, epsilon = 1e-5);
    assert_relative_eq!(report.camera.position.y, before.y + 1.5, epsilon = 1e-5);
    assert!(report.sphere_position.x > 0.0);
}

#[test]
fn test_config_gravity_reaches_sphere() {
    let config = SandboxConfig::from_json(r#"{ "sphere": { "gravity": -9.81 } }"#).unwrap();
    let mut sim = Simulation::from_config(Scene::new(), &config, Vec2::ZERO).unwrap();

    let mut input = InputState::new();
    for _ in 0..60 {
        sim.step(&input.sample(DT)).unwrap();
    }
    assert_relative_eq!(sim.player().velocity().y, -9.81, epsilon = 1e-3);
    assert!(!sim.player().is_standing());
    assert_eq!(sim.frame(), 60);
}

#[test]
fn test_default_spawn_falls_onto_box() {
    let mut scene = Scene::new();
    scene
        .add_box(Vec3::new(-1.0, -100.0, -10.0), Vec3::new(1.0, 10.0, 1.0))
        .unwrap();
    let mut config = SandboxConfig::default();
    config.spawn.position = Vec3::new(0.0, 14.0, -2.0);
    let mut sim = Simulation::from_config(scene, &config, Vec2::ZERO).unwrap();

    let mut input = InputState::new();
    let mut landed = None;
    for _ in 0..180 {
        let report = sim.step(&input.sample(DT)).unwrap();
        if report.standing {
            landed = Some(report);
            break;
        }
    }

    let report = landed.expect("sphere lands on the box");
    assert_relative_eq!(report.sphere_position.y, 11.0, epsilon = 1e-5);
    assert_eq!(report.contacts.contacts, 1);
}
