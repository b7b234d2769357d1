//! The physics engine seam
//!
//! [`World`](crate::world::World) never simulates anything itself. It drives a
//! [`PhysicsBackend`], which owns bodies, fixtures and the solver. The default
//! backend is [`RapierBackend`](crate::rapier::RapierBackend); tests plug in
//! recording fakes.

use crate::body::{BodyDesc, BodyHandle, FixtureDesc, FixtureHandle};
use crate::error::Result;
use crate::events::ContactEvent;

/// Engine world construction parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    /// Gravity vector in simulation units
    pub gravity: [f32; 2],
    /// Skip contacts between pairs with no dynamic body
    pub ignore_static_collisions: bool,
}

/// Operations the facade needs from a 2D rigid-body engine
pub trait PhysicsBackend {
    /// Create the engine world
    fn create(settings: &EngineSettings) -> Result<Self>
    where
        Self: Sized;

    /// Create a body at `desc.position` with zero rotation; no fixture yet
    fn create_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle>;

    /// Destroy a body and its fixtures. Only used to roll back a failed creation.
    fn remove_body(&mut self, body: BodyHandle);

    /// Attach a fixture to a body
    fn create_fixture(&mut self, body: BodyHandle, desc: &FixtureDesc) -> Result<FixtureHandle>;

    /// Set a body's angle (radians)
    fn set_body_angle(&mut self, body: BodyHandle, angle: f32) -> Result<()>;

    /// Advance one step, returning the contact-begin events it produced
    fn step(&mut self, dt: f32, velocity_iterations: usize, position_iterations: usize) -> Result<Vec<ContactEvent>>;

    /// Reset accumulated forces and torques on every body
    fn clear_forces(&mut self);

    fn gravity(&self) -> [f32; 2];

    fn set_gravity(&mut self, gravity: [f32; 2]);

    /// Apply an impulse at a world-space point
    fn apply_impulse_at_point(&mut self, body: BodyHandle, impulse: [f32; 2], point: [f32; 2]) -> Result<()>;

    fn body_position(&self, body: BodyHandle) -> Result<[f32; 2]>;

    fn body_angle(&self, body: BodyHandle) -> Result<f32>;

    fn body_linear_velocity(&self, body: BodyHandle) -> Result<[f32; 2]>;

    /// World-space center of mass
    fn body_center_of_mass(&self, body: BodyHandle) -> Result<[f32; 2]>;
}
