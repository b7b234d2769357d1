//! Physics world facade - body registry, stepping and sensor dispatch

use crate::backend::{EngineSettings, PhysicsBackend};
use crate::body::{Body, BodyConfig, BodyHandle, BodyRef};
use crate::config::{GravityUpdate, WorldConfig};
use crate::error::{PhysicsError, Result};
use crate::events::{ContactEvent, SensorTable};
use crate::impulse::RandomImpulse;
use crate::rapier::RapierBackend;
use crate::units::{DrawRatio, Length};
use std::collections::HashMap;

/// Velocity iterations used by [`World::step`]
pub const DEFAULT_VELOCITY_ITERATIONS: usize = 8;

/// Position iterations used by [`World::step`]
pub const DEFAULT_POSITION_ITERATIONS: usize = 3;

/// One engine world plus every body created through it.
///
/// Bodies are kept in creation order and are never removed; the engine is
/// the only source of live position, angle and velocity.
pub struct World<B: PhysicsBackend = RapierBackend> {
    config: WorldConfig,
    ratio: DrawRatio,
    engine: B,
    bodies: Vec<Body>,
    index: HashMap<BodyHandle, usize>,
    sensors: SensorTable,
    contacts: Vec<ContactEvent>,
}

impl World<RapierBackend> {
    /// Create a world backed by Rapier
    pub fn configure(config: WorldConfig) -> Result<Self> {
        Self::with_backend(config)
    }
}

impl<B: PhysicsBackend> World<B> {
    /// Create a world on any backend
    pub fn with_backend(config: WorldConfig) -> Result<Self> {
        let ratio = config.validate()?;
        let engine = B::create(&EngineSettings {
            gravity: config.gravity,
            ignore_static_collisions: config.ignore_static_collisions,
        })?;

        log::debug!(
            "Configured physics world (gravity: {:?}, draw ratio: {}, ignore static collisions: {})",
            config.gravity,
            ratio.get(),
            config.ignore_static_collisions
        );

        Ok(Self {
            config,
            ratio,
            engine,
            bodies: Vec::new(),
            index: HashMap::new(),
            sensors: SensorTable::default(),
            contacts: Vec::new(),
        })
    }

    /// Configuration the world was created with
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn draw_ratio(&self) -> f32 {
        self.ratio.get()
    }

    /// The wrapped engine
    pub fn backend(&self) -> &B {
        &self.engine
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // ==================== Bodies ====================

    /// Normalize `config` and create the body and its fixture.
    ///
    /// On error nothing is registered and the engine is left as it was.
    pub fn create_body(&mut self, config: BodyConfig) -> Result<BodyHandle> {
        let desc = match config.resolve(&self.ratio) {
            Ok(desc) => desc,
            Err(e) => {
                log::warn!("Rejected body options: {}", e);
                return Err(e);
            }
        };

        let handle = self.engine.create_body(&desc)?;
        let fixture = match self.engine.create_fixture(handle, &desc.fixture) {
            Ok(fixture) => fixture,
            Err(e) => {
                self.engine.remove_body(handle);
                return Err(e);
            }
        };
        if let Err(e) = self.engine.set_body_angle(handle, desc.rotation) {
            self.engine.remove_body(handle);
            return Err(e);
        }

        let BodyConfig { id, on_contact, .. } = config;
        if let Some(callback) = on_contact {
            self.sensors.insert(handle, callback);
        }

        log::debug!(
            "Created {} body {:?} ({}) at {:?}",
            if desc.is_static { "static" } else { "dynamic" },
            handle,
            desc.fixture.shape.kind(),
            desc.position
        );

        self.index.insert(handle, self.bodies.len());
        self.bodies.push(Body {
            handle,
            fixture,
            shape: desc.fixture.shape,
            is_static: desc.is_static,
            id,
        });

        Ok(handle)
    }

    /// Live view of one body
    pub fn body(&self, handle: BodyHandle) -> Result<BodyRef<'_>> {
        self.index
            .get(&handle)
            .map(|&i| self.view(&self.bodies[i]))
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Whether `handle` has a contact callback
    pub fn has_sensor(&self, handle: BodyHandle) -> bool {
        self.sensors.contains(handle)
    }

    /// Visit every body in creation order, collecting the visitor's results
    pub fn for_each_body<R, F>(&self, mut visitor: F) -> Vec<R>
    where
        F: FnMut(usize, BodyRef<'_>) -> R,
    {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, body)| visitor(i, self.view(body)))
            .collect()
    }

    /// Iterate bodies in creation order
    pub fn bodies(&self) -> impl Iterator<Item = BodyRef<'_>> + '_ {
        self.bodies.iter().map(move |body| self.view(body))
    }

    fn view<'a>(&'a self, body: &'a Body) -> BodyRef<'a> {
        BodyRef {
            body,
            engine: &self.engine,
            ratio: self.ratio,
        }
    }

    // ==================== Simulation ====================

    /// Advance the engine one step and dispatch contact-begin callbacks
    pub fn advance(&mut self, dt: f32, velocity_iterations: usize, position_iterations: usize) -> Result<()> {
        let contacts = self.engine.step(dt, velocity_iterations, position_iterations)?;
        log::trace!(
            "Stepped {}s ({} velocity / {} position iterations), {} contact(s) began",
            dt,
            velocity_iterations,
            position_iterations,
            contacts.len()
        );

        if !self.sensors.is_empty() {
            for event in &contacts {
                let (Some(&i1), Some(&i2)) = (self.index.get(&event.body1), self.index.get(&event.body2)) else {
                    continue;
                };
                let first = BodyRef {
                    body: &self.bodies[i1],
                    engine: &self.engine,
                    ratio: self.ratio,
                };
                let second = BodyRef {
                    body: &self.bodies[i2],
                    engine: &self.engine,
                    ratio: self.ratio,
                };
                self.sensors.dispatch(event, first, second);
            }
        }

        self.contacts = contacts;
        Ok(())
    }

    /// [`advance`](Self::advance) with the default iteration counts
    pub fn step(&mut self, dt: f32) -> Result<()> {
        self.advance(dt, DEFAULT_VELOCITY_ITERATIONS, DEFAULT_POSITION_ITERATIONS)
    }

    /// Contact-begin events from the last step
    pub fn contact_events(&self) -> &[ContactEvent] {
        &self.contacts
    }

    /// Reset forces accumulated on every body
    pub fn clear_accumulated_forces(&mut self) {
        self.engine.clear_forces();
    }

    // ==================== Gravity ====================

    /// Current gravity, read from the engine
    pub fn gravity(&self) -> [f32; 2] {
        self.engine.gravity()
    }

    /// Change gravity; axes missing from `update` keep their current value
    pub fn set_gravity(&mut self, update: impl Into<GravityUpdate>) {
        let gravity = update.into().apply_to(self.engine.gravity());
        self.engine.set_gravity(gravity);
    }

    // ==================== Units ====================

    /// Pixel literal or number to simulation units; `NaN` when unparseable
    pub fn pixels_to_units(&self, value: impl Into<Length>) -> f32 {
        self.ratio.pixels_to_units(&value.into())
    }

    /// Simulation units to pixels; strings have any `px` stripped first
    pub fn units_to_pixels(&self, value: impl Into<Length>) -> f32 {
        self.ratio.units_to_pixels(&value.into())
    }

    // ==================== Impulses ====================

    /// Kick a body in a random direction at its center of mass
    pub fn apply_random_impulse(&mut self, body: BodyHandle, options: &RandomImpulse) -> Result<()> {
        if !self.index.contains_key(&body) {
            return Err(PhysicsError::BodyNotFound(body));
        }
        let impulse = options.impulse(&self.ratio)?;
        let point = self.engine.body_center_of_mass(body)?;
        self.engine.apply_impulse_at_point(body, impulse, point)
    }
}
