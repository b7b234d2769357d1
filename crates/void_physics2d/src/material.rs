//! Fixture material (density, friction, restitution)

use serde::{Deserialize, Serialize};

/// Surface and mass properties applied to a body's fixture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsMaterial {
    /// Density for mass calculation
    pub density: f32,
    /// Friction coefficient (0 = frictionless)
    pub friction: f32,
    /// Restitution/bounciness (0 = no bounce, 1 = perfect bounce)
    pub restitution: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            density: 1.0,
            friction: 0.5,
            restitution: 0.3,
        }
    }
}

impl PhysicsMaterial {
    /// Create a new physics material
    pub fn new(density: f32, friction: f32, restitution: f32) -> Self {
        Self {
            density,
            friction,
            restitution,
        }
    }
}
