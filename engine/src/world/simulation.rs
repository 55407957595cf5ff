//! Simulation
//!
//! Reference frame driver. Runs one frame in the fixed order the physics
//! depends on:
//!
//! 1. Camera follows the body and applies mouse look
//! 2. Movement intent from held keys and the camera basis
//! 3. Jump (on the key's press edge) and swoosh triggers
//! 4. Sphere integration
//! 5. Contact pass over the scene's colliders, in order
//!
//! Rendering stays with the caller: [`FrameReport`] carries everything a
//! renderer needs.

use glam::{Vec2, Vec3};
use log::{debug, trace};

use super::scene::{BodyHandle, ContactSummary, Scene};
use crate::camera::{Camera, CameraController};
use crate::config::SandboxConfig;
use crate::input::{ActionLatch, FrameInput, MovementConfig, movement_intent};
use crate::physics::{Collider, CollisionSphere, DebugColor, PhysicsError};

/// State exposed to the renderer after a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frames completed so far, including this one
    pub frame: u64,
    pub sphere_position: Vec3,
    pub sphere_velocity: Vec3,
    pub sphere_radius: f32,
    pub colliding: bool,
    pub standing: bool,
    pub debug_color: DebugColor,
    /// View transform after this frame's mouse look
    pub camera: Camera,
    pub contacts: ContactSummary,
    /// A jump impulse was applied this frame
    pub jumped: bool,
    /// The velocity was redirected this frame
    pub swooshed: bool,
}

/// One scene, one player body, one follow camera.
#[derive(Debug, Clone)]
pub struct Simulation {
    scene: Scene,
    player: BodyHandle,
    camera: CameraController,
    movement: MovementConfig,
    jump: ActionLatch,
    frame: u64,
}

impl Simulation {
    /// Assemble a simulation from parts.
    ///
    /// # Errors
    ///
    /// * `UnknownBody` if `player` or the camera's handle is not in `scene`
    pub fn new(
        scene: Scene,
        player: BodyHandle,
        camera: CameraController,
        movement: MovementConfig,
    ) -> Result<Self, PhysicsError> {
        scene.body(player)?;
        scene.body(camera.body())?;
        Ok(Self {
            scene,
            player,
            camera,
            movement,
            jump: ActionLatch::new(),
            frame: 0,
        })
    }

    /// Spawn the player described by `config` into `scene` and attach a
    /// follow camera to it.
    pub fn from_config(
        mut scene: Scene,
        config: &SandboxConfig,
        mouse_position: Vec2,
    ) -> Result<Self, PhysicsError> {
        config.validate()?;
        let body = CollisionSphere::with_config(
            config.spawn.position,
            config.spawn.radius,
            &config.sphere,
        )?;
        let player = scene.spawn_body(body);
        let camera =
            CameraController::with_config(Camera::default(), player, &config.camera, mouse_position);
        Self::new(scene, player, camera, config.movement)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Append a collider between frames. It joins the end of the contact
    /// order.
    pub fn add_collider(&mut self, collider: impl Into<Collider>) {
        self.scene.add_collider(collider);
    }

    /// Append a batch of triangles between frames, skipping degenerate ones.
    pub fn extend_triangles<I>(&mut self, triangles: I) -> usize
    where
        I: IntoIterator<Item = [Vec3; 3]>,
    {
        self.scene.extend_triangles(triangles)
    }

    /// The player body.
    pub fn player(&self) -> &CollisionSphere {
        // Checked in `new`; the scene is only ever appended to after that
        &self.scene.bodies()[self.player.index()]
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame.
    ///
    /// # Errors
    ///
    /// * `InvalidTimeStep` if `input.dt` is negative or not finite
    /// * `NonFinite` if the mouse position is NaN or infinite
    ///
    /// Input errors are caught before any state changes.
    pub fn step(&mut self, input: &FrameInput) -> Result<FrameReport, PhysicsError> {
        if !(input.dt.is_finite() && input.dt >= 0.0) {
            return Err(PhysicsError::InvalidTimeStep(input.dt));
        }
        if !input.mouse_position.is_finite() {
            return Err(PhysicsError::NonFinite("mouse position"));
        }

        self.camera.update(&self.scene, input.mouse_position)?;

        let forward = self.camera.forward_v();
        let right = self.camera.right_v();
        let intent = movement_intent(&input.movement, forward, right, self.movement.ground_speed);

        let body = self.scene.body_mut(self.player)?;

        let jumped = self.jump.trigger(input.jump_held) && body.jump(self.movement.jump_force);
        let swooshed =
            input.swoosh_pressed && body.swoosh(-forward * self.movement.swoosh_speed);

        body.update(intent, input.dt)?;
        let contacts = self.scene.resolve_contacts(self.player)?;
        self.frame += 1;

        let body = self.player();
        trace!(
            "frame {}: position {}, velocity {}, contacts {}",
            self.frame,
            body.position(),
            body.velocity(),
            contacts.contacts
        );
        if jumped || swooshed {
            debug!("frame {}: jumped {jumped}, swooshed {swooshed}", self.frame);
        }

        Ok(FrameReport {
            frame: self.frame,
            sphere_position: body.position(),
            sphere_velocity: body.velocity(),
            sphere_radius: body.radius(),
            colliding: body.is_colliding(),
            standing: body.is_standing(),
            debug_color: body.debug_color(),
            camera: *self.camera.camera(),
            contacts,
            jumped,
            swooshed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::StaticBox;

    const DT: f32 = 1.0 / 60.0;

    fn floor_scene() -> Scene {
        let mut scene = Scene::new();
        scene
            .add_box(Vec3::new(-50.0, -1.0, -50.0), Vec3::new(50.0, 0.0, 50.0))
            .unwrap();
        scene
    }

    fn resting_config() -> SandboxConfig {
        let mut config = SandboxConfig::default();
        config.spawn.position = Vec3::new(0.0, 1.0, 0.0);
        config
    }

    #[test]
    fn test_new_rejects_unknown_player() {
        let mut other = Scene::new();
        let handle = other.spawn_body(CollisionSphere::new(Vec3::ZERO, 1.0).unwrap());
        let camera = CameraController::new(Camera::default(), handle, 0.005, Vec2::ZERO);
        let result = Simulation::new(Scene::new(), handle, camera, MovementConfig::default());
        assert!(matches!(result, Err(PhysicsError::UnknownBody(0))));
    }

    #[test]
    fn test_invalid_dt_changes_nothing() {
        let mut sim = Simulation::from_config(floor_scene(), &resting_config(), Vec2::ZERO).unwrap();
        let before = sim.player().clone();
        let result = sim.step(&FrameInput::idle(-1.0, Vec2::new(50.0, 0.0)));
        assert_eq!(result, Err(PhysicsError::InvalidTimeStep(-1.0)));
        assert_eq!(sim.player(), &before);
        assert_eq!(sim.frame(), 0);
        assert_eq!(sim.camera().last_mouse_position(), Vec2::ZERO);
    }

    #[test]
    fn test_lands_on_floor() {
        let mut config = resting_config();
        config.spawn.position = Vec3::new(0.0, 3.0, 0.0);
        let mut sim = Simulation::from_config(floor_scene(), &config, Vec2::ZERO).unwrap();

        let mut report = None;
        for _ in 0..120 {
            report = Some(sim.step(&FrameInput::idle(DT, Vec2::ZERO)).unwrap());
        }
        let report = report.unwrap();
        assert!(report.standing);
        assert!(report.colliding);
        assert!((report.sphere_position.y - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_jump_fires_once_per_press() {
        let mut sim = Simulation::from_config(floor_scene(), &resting_config(), Vec2::ZERO).unwrap();
        sim.step(&FrameInput::idle(DT, Vec2::ZERO)).unwrap();

        let held = FrameInput {
            jump_held: true,
            ..FrameInput::idle(DT, Vec2::ZERO)
        };
        assert!(sim.step(&held).unwrap().jumped);
        assert!(!sim.step(&held).unwrap().jumped);
    }

    #[test]
    fn test_forward_key_moves_along_view() {
        let mut sim = Simulation::from_config(floor_scene(), &resting_config(), Vec2::ZERO).unwrap();
        sim.step(&FrameInput::idle(DT, Vec2::ZERO)).unwrap();
        let start = sim.player().position();
        let look = sim.camera().look_direction();

        let mut input = FrameInput::idle(DT, Vec2::ZERO);
        input.movement.forward = true;
        for _ in 0..30 {
            sim.step(&input).unwrap();
        }

        let moved = sim.player().position() - start;
        let horizontal_look = Vec3::new(look.x, 0.0, look.z).normalize();
        assert!(moved.dot(horizontal_look) > 0.1);
    }

    #[test]
    fn test_colliders_added_between_frames() {
        let mut config = resting_config();
        config.spawn.position = Vec3::new(0.0, 3.0, 0.0);
        let mut sim = Simulation::from_config(Scene::new(), &config, Vec2::ZERO).unwrap();
        sim.step(&FrameInput::idle(DT, Vec2::ZERO)).unwrap();
        assert!(!sim.player().is_standing());

        let added = sim.extend_triangles([
            [Vec3::new(-10.0, 0.0, -10.0), Vec3::new(0.0, 0.0, 10.0), Vec3::new(10.0, 0.0, -10.0)],
            [Vec3::ZERO, Vec3::ZERO, Vec3::X],
        ]);
        assert_eq!(added, 1);
        let pillar = StaticBox::new(Vec3::new(5.0, 0.0, -1.0), Vec3::new(6.0, 4.0, 1.0)).unwrap();
        sim.add_collider(pillar);
        assert_eq!(sim.scene().colliders().len(), 2);

        let mut report = None;
        for _ in 0..120 {
            report = Some(sim.step(&FrameInput::idle(DT, Vec2::ZERO)).unwrap());
        }
        let report = report.unwrap();
        assert!(report.standing);
        assert_eq!(report.contacts.contacts, 1);
        assert!((sim.player().position().y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_report_exposes_camera() {
        let mut sim = Simulation::from_config(floor_scene(), &resting_config(), Vec2::ZERO).unwrap();
        let report = sim.step(&FrameInput::idle(DT, Vec2::ZERO)).unwrap();
        assert_eq!(report.frame, 1);
        assert_eq!(report.sphere_radius, 1.0);
        assert!((report.camera.position - (report.sphere_position + Vec3::Y * 1.5)).length() < 1e-5);
        assert!(((report.camera.target - report.camera.position).length() - 1.0).abs() < 1e-5);
    }
}
