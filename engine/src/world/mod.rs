//! World Module
//!
//! Contains the scene (bodies and static colliders) and the reference
//! frame driver that steps it.
//!
//! ## Frame Order
//! Camera look, movement intent, jump/swoosh, integration, then the contact
//! pass. The contact pass is sequential over the scene's collider list.

pub mod scene;
pub mod simulation;

pub use scene::{BodyHandle, ContactSummary, Scene};
pub use simulation::{FrameReport, Simulation};
