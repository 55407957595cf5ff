//! Scene
//!
//! Owns the dynamic bodies (by value, addressed through [`BodyHandle`]) and
//! the ordered list of static colliders. Anything that follows a body, like
//! the camera, keeps a handle rather than a second owner.
//!
//! # Contact Order
//!
//! [`Scene::resolve_contacts`] walks the colliders in insertion order and
//! resolves each against the position left by the previous one. Last write
//! wins: a later primitive can push the sphere back into an earlier one.

use glam::Vec3;
use log::{info, warn};

use crate::physics::{Collider, CollisionSphere, PhysicsError, StaticBox, StaticTriangle};

/// Non-owning reference to a body in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(usize);

impl BodyHandle {
    /// Index into the scene's body table.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Aggregate result of one contact pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactSummary {
    /// Number of primitives the sphere touched
    pub contacts: usize,
    /// Whether any contact was below the sphere center
    pub grounded: bool,
    /// Deepest penetration resolved during the pass
    pub max_penetration: f32,
}

/// Static collision geometry plus the bodies moving through it.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    bodies: Vec<CollisionSphere>,
    colliders: Vec<Collider>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a body into the scene and return its handle.
    pub fn spawn_body(&mut self, body: CollisionSphere) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() - 1)
    }

    /// Borrow a body.
    pub fn body(&self, handle: BodyHandle) -> Result<&CollisionSphere, PhysicsError> {
        self.bodies
            .get(handle.0)
            .ok_or(PhysicsError::UnknownBody(handle.0))
    }

    /// Mutably borrow a body.
    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut CollisionSphere, PhysicsError> {
        self.bodies
            .get_mut(handle.0)
            .ok_or(PhysicsError::UnknownBody(handle.0))
    }

    pub fn bodies(&self) -> &[CollisionSphere] {
        &self.bodies
    }

    /// Colliders in resolution order.
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Append a collider to the end of the resolution order.
    pub fn add_collider(&mut self, collider: impl Into<Collider>) {
        self.colliders.push(collider.into());
    }

    /// Validate and append a triangle.
    pub fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) -> Result<(), PhysicsError> {
        self.add_collider(StaticTriangle::new(a, b, c)?);
        Ok(())
    }

    /// Validate and append a box.
    pub fn add_box(&mut self, min: Vec3, max: Vec3) -> Result<(), PhysicsError> {
        self.add_collider(StaticBox::new(min, max)?);
        Ok(())
    }

    /// Append a batch of triangles, e.g. a loaded collision mesh.
    ///
    /// Degenerate or non-finite triangles are skipped with a warning rather
    /// than failing the whole batch. Returns the number of triangles added.
    pub fn extend_triangles<I>(&mut self, triangles: I) -> usize
    where
        I: IntoIterator<Item = [Vec3; 3]>,
    {
        let mut added = 0;
        let mut skipped = 0;
        for [a, b, c] in triangles {
            match StaticTriangle::new(a, b, c) {
                Ok(tri) => {
                    self.colliders.push(Collider::Triangle(tri));
                    added += 1;
                }
                Err(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!("skipped {skipped} degenerate collision triangles");
        }
        info!("added {added} collision triangles ({} colliders total)", self.colliders.len());
        added
    }

    /// Run one contact pass for a body.
    ///
    /// Clears the body's contact flags, then resolves it against every
    /// collider in order.
    pub fn resolve_contacts(&mut self, handle: BodyHandle) -> Result<ContactSummary, PhysicsError> {
        let body = self
            .bodies
            .get_mut(handle.0)
            .ok_or(PhysicsError::UnknownBody(handle.0))?;

        body.begin_contact_pass();

        let mut summary = ContactSummary::default();
        for collider in &self.colliders {
            if let Some(contact) = body.check_collision(collider) {
                summary.contacts += 1;
                summary.grounded |= contact.grounded;
                summary.max_penetration = summary.max_penetration.max(contact.penetration);
            }
        }
        Ok(summary)
    }
}
