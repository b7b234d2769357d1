//! World configuration

use crate::error::{PhysicsError, Result};
use crate::units::DrawRatio;
use serde::{Deserialize, Deserializer, Serialize};

/// Default gravity, screen-style (positive Y points down)
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, 9.8];

/// Physics world configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldConfig {
    /// Skip contacts between pairs with no dynamic body (default: true)
    pub ignore_static_collisions: bool,

    /// Pixels per simulation unit (default: 1)
    pub draw_ratio: f32,

    /// Gravity vector (default: 0, 9.8). JSON input may give a single axis.
    #[serde(deserialize_with = "gravity_over_default")]
    pub gravity: [f32; 2],
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            ignore_static_collisions: true,
            draw_ratio: 1.0,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl WorldConfig {
    /// Load from a JSON option object; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set gravity
    pub fn with_gravity(mut self, x: f32, y: f32) -> Self {
        self.gravity = [x, y];
        self
    }

    /// Set draw ratio
    pub fn with_draw_ratio(mut self, ratio: f32) -> Self {
        self.draw_ratio = ratio;
        self
    }

    /// Set whether pairs without a dynamic body are skipped
    pub fn with_ignore_static_collisions(mut self, ignore: bool) -> Self {
        self.ignore_static_collisions = ignore;
        self
    }

    /// Check the configuration, returning the validated draw ratio
    pub fn validate(&self) -> Result<DrawRatio> {
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(PhysicsError::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        DrawRatio::new(self.draw_ratio)
    }
}

/// Per-axis gravity change. Axes left as `None` keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityUpdate {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

impl GravityUpdate {
    /// Change both axes
    pub fn new(x: f32, y: f32) -> Self {
        Self { x: Some(x), y: Some(y) }
    }

    /// Change only the X axis
    pub fn x(x: f32) -> Self {
        Self { x: Some(x), y: None }
    }

    /// Change only the Y axis
    pub fn y(y: f32) -> Self {
        Self { x: None, y: Some(y) }
    }

    /// Merge onto an existing gravity vector
    pub fn apply_to(&self, current: [f32; 2]) -> [f32; 2] {
        [self.x.unwrap_or(current[0]), self.y.unwrap_or(current[1])]
    }
}

impl From<[f32; 2]> for GravityUpdate {
    fn from(g: [f32; 2]) -> Self {
        Self::new(g[0], g[1])
    }
}

fn gravity_over_default<'de, D>(deserializer: D) -> std::result::Result<[f32; 2], D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum GravityInput {
        Vector([f32; 2]),
        Axes(GravityUpdate),
    }

    Ok(match GravityInput::deserialize(deserializer)? {
        GravityInput::Vector(gravity) => gravity,
        GravityInput::Axes(update) => update.apply_to(DEFAULT_GRAVITY),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorldConfig::default();
        assert!(config.ignore_static_collisions);
        assert_eq!(config.draw_ratio, 1.0);
        assert_eq!(config.gravity, [0.0, 9.8]);
    }

    #[test]
    fn test_from_json_partial() {
        let config = WorldConfig::from_json(r#"{"drawRatio": 30, "gravity": {"x": 2}}"#).unwrap();
        assert_eq!(config.draw_ratio, 30.0);
        assert_eq!(config.gravity, [2.0, 9.8]);
        assert!(config.ignore_static_collisions);

        let empty = WorldConfig::from_json("{}").unwrap();
        assert_eq!(empty, WorldConfig::default());

        let vector = WorldConfig::from_json(r#"{"gravity": [1, -3]}"#).unwrap();
        assert_eq!(vector.gravity, [1.0, -3.0]);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = WorldConfig::from_json(r#"{"drawRatio": "big"}"#).unwrap_err();
        assert!(matches!(err, PhysicsError::InvalidJson(_)));
    }

    #[test]
    fn test_validate() {
        assert!(WorldConfig::default().validate().is_ok());
        assert!(WorldConfig::default().with_draw_ratio(0.0).validate().is_err());
        assert!(WorldConfig::default().with_gravity(f32::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_gravity_update_merges_per_axis() {
        assert_eq!(GravityUpdate::x(5.0).apply_to([0.0, 9.8]), [5.0, 9.8]);
        assert_eq!(GravityUpdate::y(-1.0).apply_to([3.0, 9.8]), [3.0, -1.0]);
        assert_eq!(GravityUpdate::default().apply_to([1.0, 2.0]), [1.0, 2.0]);
    }
}
