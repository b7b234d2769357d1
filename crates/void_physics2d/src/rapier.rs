//! Rapier 2D backend

use crate::backend::{EngineSettings, PhysicsBackend};
use crate::body::{BodyDesc, BodyHandle, FixtureDesc, FixtureHandle};
use crate::error::{PhysicsError, Result};
use crate::events::ContactEvent;
use crate::shape::ShapeDesc;
use rapier2d::prelude as rapier;
use std::num::NonZeroUsize;

/// Rapier pipeline plus the sets it steps
pub struct RapierBackend {
    pipeline: rapier::PhysicsPipeline,
    gravity: rapier::Vector<f32>,
    integration_params: rapier::IntegrationParameters,
    islands: rapier::IslandManager,
    broad_phase: rapier::DefaultBroadPhase,
    narrow_phase: rapier::NarrowPhase,
    impulse_joints: rapier::ImpulseJointSet,
    multibody_joints: rapier::MultibodyJointSet,
    ccd_solver: rapier::CCDSolver,
    bodies: rapier::RigidBodySet,
    colliders: rapier::ColliderSet,
    collision_types: rapier::ActiveCollisionTypes,
}

impl RapierBackend {
    /// Number of rigid bodies in the engine
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of colliders in the engine
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Engine collider for a fixture, for inspection
    pub fn collider(&self, fixture: FixtureHandle) -> Option<&rapier::Collider> {
        self.colliders.get(raw_collider(fixture))
    }

    fn body_ref(&self, body: BodyHandle) -> Result<&rapier::RigidBody> {
        self.bodies.get(raw_body(body)).ok_or(PhysicsError::BodyNotFound(body))
    }

    fn body_mut(&mut self, body: BodyHandle) -> Result<&mut rapier::RigidBody> {
        self.bodies.get_mut(raw_body(body)).ok_or(PhysicsError::BodyNotFound(body))
    }
}

impl PhysicsBackend for RapierBackend {
    fn create(settings: &EngineSettings) -> Result<Self> {
        let collision_types = if settings.ignore_static_collisions {
            rapier::ActiveCollisionTypes::default()
        } else {
            rapier::ActiveCollisionTypes::all()
        };

        Ok(Self {
            pipeline: rapier::PhysicsPipeline::new(),
            gravity: rapier::Vector::new(settings.gravity[0], settings.gravity[1]),
            integration_params: rapier::IntegrationParameters::default(),
            islands: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            impulse_joints: rapier::ImpulseJointSet::new(),
            multibody_joints: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            collision_types,
        })
    }

    fn create_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle> {
        let body_type = if desc.is_static {
            rapier::RigidBodyType::Fixed
        } else {
            rapier::RigidBodyType::Dynamic
        };
        let builder = rapier::RigidBodyBuilder::new(body_type)
            .translation(rapier::Vector::new(desc.position[0], desc.position[1]));
        let handle = self.bodies.insert(builder);
        let (index, generation) = handle.into_raw_parts();
        Ok(BodyHandle::from_raw_parts(index, generation))
    }

    fn remove_body(&mut self, body: BodyHandle) {
        self.bodies.remove(
            raw_body(body),
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    fn create_fixture(&mut self, body: BodyHandle, desc: &FixtureDesc) -> Result<FixtureHandle> {
        let parent = raw_body(body);
        if !self.bodies.contains(parent) {
            return Err(PhysicsError::BodyNotFound(body));
        }

        let builder = rapier::ColliderBuilder::new(to_rapier_shape(&desc.shape)?)
            .density(desc.material.density)
            .friction(desc.material.friction)
            .restitution(desc.material.restitution)
            .sensor(desc.is_sensor)
            .active_events(rapier::ActiveEvents::COLLISION_EVENTS)
            .active_collision_types(self.collision_types);
        let handle = self.colliders.insert_with_parent(builder, parent, &mut self.bodies);
        let (index, generation) = handle.into_raw_parts();
        Ok(FixtureHandle::from_raw_parts(index, generation))
    }

    fn set_body_angle(&mut self, body: BodyHandle, angle: f32) -> Result<()> {
        self.body_mut(body)?.set_rotation(rapier::Rotation::new(angle), true);
        Ok(())
    }

    fn step(&mut self, dt: f32, velocity_iterations: usize, position_iterations: usize) -> Result<Vec<ContactEvent>> {
        self.integration_params.dt = dt;
        self.integration_params.num_solver_iterations =
            NonZeroUsize::new(velocity_iterations).unwrap_or(NonZeroUsize::MIN);
        self.integration_params.num_internal_stabilization_iterations = position_iterations.max(1);

        let (collision_send, collision_recv) = crossbeam_channel::unbounded();
        let event_handler = ContactBeginCollector {
            collision_events: collision_send,
        };

        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &event_handler,
        );

        let mut contacts = Vec::new();
        while let Ok(event) = collision_recv.try_recv() {
            let rapier::CollisionEvent::Started(h1, h2, _) = event else {
                continue;
            };
            let (Some(c1), Some(c2)) = (self.colliders.get(h1), self.colliders.get(h2)) else {
                continue;
            };
            let (Some(b1), Some(b2)) = (c1.parent(), c2.parent()) else {
                continue;
            };

            contacts.push(ContactEvent {
                fixture1: fixture_handle(h1),
                fixture2: fixture_handle(h2),
                body1: body_handle(b1),
                body2: body_handle(b2),
                is_sensor: c1.is_sensor() || c2.is_sensor(),
            });
        }

        Ok(contacts)
    }

    fn clear_forces(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            body.reset_forces(false);
            body.reset_torques(false);
        }
    }

    fn gravity(&self) -> [f32; 2] {
        [self.gravity.x, self.gravity.y]
    }

    fn set_gravity(&mut self, gravity: [f32; 2]) {
        self.gravity = rapier::Vector::new(gravity[0], gravity[1]);
    }

    fn apply_impulse_at_point(&mut self, body: BodyHandle, impulse: [f32; 2], point: [f32; 2]) -> Result<()> {
        self.body_mut(body)?.apply_impulse_at_point(
            rapier::Vector::new(impulse[0], impulse[1]),
            rapier::Point::new(point[0], point[1]),
            true,
        );
        Ok(())
    }

    fn body_position(&self, body: BodyHandle) -> Result<[f32; 2]> {
        let pos = self.body_ref(body)?.translation();
        Ok([pos.x, pos.y])
    }

    fn body_angle(&self, body: BodyHandle) -> Result<f32> {
        Ok(self.body_ref(body)?.rotation().angle())
    }

    fn body_linear_velocity(&self, body: BodyHandle) -> Result<[f32; 2]> {
        let vel = self.body_ref(body)?.linvel();
        Ok([vel.x, vel.y])
    }

    fn body_center_of_mass(&self, body: BodyHandle) -> Result<[f32; 2]> {
        let com = self.body_ref(body)?.center_of_mass();
        Ok([com.x, com.y])
    }
}

/// Build a Rapier shared shape
fn to_rapier_shape(shape: &ShapeDesc) -> Result<rapier::SharedShape> {
    match shape {
        ShapeDesc::Box { half_extents } => Ok(rapier::SharedShape::cuboid(half_extents[0], half_extents[1])),
        ShapeDesc::Circle { radius } => Ok(rapier::SharedShape::ball(*radius)),
        ShapeDesc::Polygon { points } => {
            let degenerate =
                || PhysicsError::ShapeCreationFailed(format!("degenerate polygon with {} vertices", points.len()));
            if points.len() < 3 {
                return Err(degenerate());
            }
            let rapier_points: Vec<_> = points.iter().map(|p| rapier::Point::new(p[0], p[1])).collect();
            rapier::SharedShape::convex_hull(&rapier_points)
                .filter(|shape| shape.as_convex_polygon().is_some_and(|poly| poly.points().len() >= 3))
                .ok_or_else(degenerate)
        }
    }
}

fn raw_body(body: BodyHandle) -> rapier::RigidBodyHandle {
    let (index, generation) = body.into_raw_parts();
    rapier::RigidBodyHandle::from_raw_parts(index, generation)
}

fn raw_collider(fixture: FixtureHandle) -> rapier::ColliderHandle {
    let (index, generation) = fixture.into_raw_parts();
    rapier::ColliderHandle::from_raw_parts(index, generation)
}

fn body_handle(handle: rapier::RigidBodyHandle) -> BodyHandle {
    let (index, generation) = handle.into_raw_parts();
    BodyHandle::from_raw_parts(index, generation)
}

fn fixture_handle(handle: rapier::ColliderHandle) -> FixtureHandle {
    let (index, generation) = handle.into_raw_parts();
    FixtureHandle::from_raw_parts(index, generation)
}

/// Channel-based collector for Rapier collision events
struct ContactBeginCollector {
    collision_events: crossbeam_channel::Sender<rapier::CollisionEvent>,
}

impl rapier::EventHandler for ContactBeginCollector {
    fn handle_collision_event(
        &self,
        _bodies: &rapier::RigidBodySet,
        _colliders: &rapier::ColliderSet,
        event: rapier::CollisionEvent,
        _contact_pair: Option<&rapier::ContactPair>,
    ) {
        let _ = self.collision_events.send(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &rapier::RigidBodySet,
        _colliders: &rapier::ColliderSet,
        _contact_pair: &rapier::ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}
