//! Void Physics 2D - friendly configuration layer over Rapier 2D
//!
//! Turns loose option objects (pixel strings, shape shorthand, partial
//! settings) into engine bodies and fixtures. All simulation happens in the
//! wrapped engine; this crate only normalizes input, keeps an ordered body
//! registry and dispatches contact callbacks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                    World                      │
//! │  ┌────────────┐ ┌────────────┐ ┌───────────┐ │
//! │  │ Body list  │ │ SensorTable│ │ DrawRatio │ │
//! │  └────────────┘ └────────────┘ └───────────┘ │
//! └──────────────────────┬───────────────────────┘
//!                        │ PhysicsBackend
//!                        ▼
//!               ┌─────────────────┐
//!               │  RapierBackend  │
//!               └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use void_physics2d::prelude::*;
//!
//! let mut world = World::configure(WorldConfig::default().with_draw_ratio(30.0))?;
//!
//! // Static floor, 600px wide
//! world.create_body(BodyConfig::rectangle("600px", "20px").with_position("300px", "590px"))?;
//!
//! // Falling ball that reports what it hits
//! let ball = world.create_body(
//!     BodyConfig::circle("12px")
//!         .with_position("300px", "0px")
//!         .dynamic()
//!         .on_contact(|_, me, other| log::info!("{:?} hit {:?}", me.handle(), other.id())),
//! )?;
//! world.apply_random_impulse(ball, &RandomImpulse::default())?;
//!
//! loop {
//!     world.step(1.0 / 60.0)?;
//!     world.for_each_body(|i, body| draw(i, body.position_px(), body.angle()));
//!     world.clear_accumulated_forces();
//! }
//! ```

pub mod backend;
pub mod body;
pub mod config;
pub mod error;
pub mod events;
pub mod impulse;
pub mod material;
pub mod rapier;
pub mod shape;
pub mod units;
pub mod world;

pub mod prelude {
    //! Common imports for 2D physics functionality
    pub use crate::backend::{EngineSettings, PhysicsBackend};
    pub use crate::body::{Body, BodyConfig, BodyDesc, BodyHandle, BodyRef, FixtureDesc, FixtureHandle};
    pub use crate::config::{GravityUpdate, WorldConfig};
    pub use crate::error::{PhysicsError, Result};
    pub use crate::events::{ContactEvent, SensorCallback};
    pub use crate::impulse::RandomImpulse;
    pub use crate::material::PhysicsMaterial;
    pub use crate::rapier::RapierBackend;
    pub use crate::shape::{ShapeDesc, ShapeKind, Vertex, Vertices};
    pub use crate::units::{DrawRatio, Length};
    pub use crate::world::World;
}

pub use prelude::*;
