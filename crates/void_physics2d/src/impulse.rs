//! Random impulse options

use crate::error::{PhysicsError, Result};
use crate::units::{DrawRatio, Length};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Options for [`World::apply_random_impulse`](crate::world::World::apply_random_impulse)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RandomImpulse {
    /// Lower angle bound in degrees, inclusive (default: 0)
    pub min_angle: f32,
    /// Upper angle bound in degrees, exclusive (default: 360)
    pub max_angle: f32,
    /// Impulse magnitude (default: `"10px"`)
    pub scale: Length,
    /// Fixed seed for a reproducible angle
    pub seed: Option<u64>,
}

impl Default for RandomImpulse {
    fn default() -> Self {
        Self {
            min_angle: 0.0,
            max_angle: 360.0,
            scale: Length::px(10.0),
            seed: None,
        }
    }
}

impl RandomImpulse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON option object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set angle range in degrees
    #[must_use]
    pub fn with_angles(mut self, min_degrees: f32, max_degrees: f32) -> Self {
        self.min_angle = min_degrees;
        self.max_angle = max_degrees;
        self
    }

    /// Set magnitude
    #[must_use]
    pub fn with_scale(mut self, scale: impl Into<Length>) -> Self {
        self.scale = scale.into();
        self
    }

    /// Set a random seed for reproducibility
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draw an angle in degrees from `[min_angle, max_angle)`.
    /// An empty range yields `min_angle`.
    pub fn sample_angle(&self) -> Result<f32> {
        if !self.min_angle.is_finite() || !self.max_angle.is_finite() {
            return Err(PhysicsError::InvalidImpulse(format!(
                "angle range must be finite, got {}..{}",
                self.min_angle, self.max_angle
            )));
        }
        if self.max_angle <= self.min_angle {
            return Ok(self.min_angle);
        }

        let mut rng: Box<dyn RngCore> = if let Some(seed) = self.seed {
            Box::new(StdRng::seed_from_u64(seed))
        } else {
            Box::new(rand::thread_rng())
        };
        Ok(rng.gen_range(self.min_angle..self.max_angle))
    }

    /// Impulse vector in simulation units
    pub fn impulse(&self, ratio: &DrawRatio) -> Result<[f32; 2]> {
        let scale = ratio.resolve("scale", &self.scale)?;
        let angle = self.sample_angle()?.to_radians();
        Ok([scale * angle.cos(), scale * angle.sin()])
    }
}
