//! Rolling Sphere Sandbox
//!
//! Run with: `cargo run --bin sphere_sandbox [config.json]`
//!
//! Headless demo. Builds a small scene (one tall box and a sloped triangle
//! terrain), drops the player sphere into it and drives it with a scripted
//! input sequence. Frame state goes to the log:
//!
//! - `RUST_LOG=info`: one summary line every half second
//! - `RUST_LOG=debug`: jumps and swooshes
//! - `RUST_LOG=trace`: every contact
//!
//! Script:
//! - 0.0s  fall from the spawn point
//! - 2.0s  hold W, sweep the mouse to the left
//! - 4.0s  jump
//! - 5.0s  swoosh, release W
//! - 7.0s  done

use std::error::Error;

use glam::{Vec2, Vec3};
use log::{info, warn};
use rolling_sphere_engine::input::{InputState, KeyCode};
use rolling_sphere_engine::world::{FrameReport, Scene, Simulation};
use rolling_sphere_engine::SandboxConfig;

const FRAME_RATE: u32 = 60;
const DURATION_SECONDS: u32 = 7;

/// Terrain extent on X and Z, centered on the origin
const TERRAIN_HALF_EXTENT: f32 = 20.0;
const TERRAIN_CELL: f32 = 2.0;
/// Rise per unit of X
const TERRAIN_SLOPE: f32 = 0.1;

fn terrain_height(x: f32) -> f32 {
    x * TERRAIN_SLOPE
}

/// Two triangles per grid cell.
fn terrain_triangles() -> Vec<[Vec3; 3]> {
    let cells = (2.0 * TERRAIN_HALF_EXTENT / TERRAIN_CELL) as usize;
    let point = |i: usize, j: usize| {
        let x = -TERRAIN_HALF_EXTENT + i as f32 * TERRAIN_CELL;
        let z = -TERRAIN_HALF_EXTENT + j as f32 * TERRAIN_CELL;
        Vec3::new(x, terrain_height(x), z)
    };

    let mut triangles = Vec::with_capacity(cells * cells * 2);
    for i in 0..cells {
        for j in 0..cells {
            let p00 = point(i, j);
            let p10 = point(i + 1, j);
            let p01 = point(i, j + 1);
            let p11 = point(i + 1, j + 1);
            triangles.push([p00, p01, p10]);
            triangles.push([p10, p01, p11]);
        }
    }
    triangles
}

fn build_scene() -> Result<Scene, Box<dyn Error>> {
    let mut scene = Scene::new();
    // The box is checked before the terrain every frame
    scene.add_box(Vec3::new(-1.0, -100.0, -10.0), Vec3::new(1.0, 10.0, 1.0))?;
    scene.extend_triangles(terrain_triangles());
    Ok(scene)
}

/// Apply the scripted key and mouse events for `frame`.
fn drive_input(input: &mut InputState, frame: u32) {
    let t = frame as f32 / FRAME_RATE as f32;
    let at = |seconds: u32| frame == seconds * FRAME_RATE;

    if at(2) {
        input.keyboard.handle_key(KeyCode::W, true);
    }
    if (2.0..3.0).contains(&t) {
        input.add_mouse_motion(Vec2::new(-4.0, 0.5));
    }
    if at(4) {
        input.keyboard.handle_key(KeyCode::Space, true);
    }
    if frame == 4 * FRAME_RATE + 5 {
        input.keyboard.handle_key(KeyCode::Space, false);
    }
    if at(5) {
        input.keyboard.handle_key(KeyCode::ShiftLeft, true);
        input.keyboard.handle_key(KeyCode::W, false);
    }
    if frame == 5 * FRAME_RATE + 1 {
        input.keyboard.handle_key(KeyCode::ShiftLeft, false);
    }
}

fn log_report(report: &FrameReport) {
    info!(
        "frame {:>4}: sphere {:.3} speed {:.3} standing {} colliding {} | eye {:.3} target {:.3}",
        report.frame,
        report.sphere_position,
        report.sphere_velocity.length(),
        report.standing,
        report.colliding,
        report.camera.position,
        report.camera.target,
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SandboxConfig::load_from_file(path)?,
        None => SandboxConfig::default(),
    };

    let scene = build_scene()?;
    info!(
        "scene ready: {} colliders, spawn {} radius {}",
        scene.colliders().len(),
        config.spawn.position,
        config.spawn.radius
    );

    let mut input = InputState::new();
    input.set_mouse_position(Vec2::new(500.0, 400.0));
    let mut sim = Simulation::from_config(scene, &config, input.mouse_position())?;

    let dt = 1.0 / FRAME_RATE as f32;
    let mut last = None;
    for frame in 0..DURATION_SECONDS * FRAME_RATE {
        drive_input(&mut input, frame);
        let report = sim.step(&input.sample(dt))?;

        if report.jumped {
            info!("frame {}: jump", report.frame);
        }
        if report.swooshed {
            info!("frame {}: swoosh", report.frame);
        }
        if frame % (FRAME_RATE / 2) == 0 {
            log_report(&report);
        }
        last = Some(report);
    }

    match last {
        Some(report) => {
            log_report(&report);
            if !report.standing {
                warn!("sphere still airborne at the end of the run");
            }
        }
        None => warn!("no frames were simulated"),
    }
    Ok(())
}
