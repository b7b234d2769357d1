//! Body option objects, resolved descriptions and handles

use crate::backend::PhysicsBackend;
use crate::error::{PhysicsError, Result};
use crate::events::{ContactEvent, SensorCallback};
use crate::material::PhysicsMaterial;
use crate::shape::{ShapeDesc, ShapeKind, Vertices};
use crate::units::{DrawRatio, Length};
use serde::Deserialize;
use std::fmt;

/// Width, height and radius used when a shape omits them (simulation units)
pub const DEFAULT_SHAPE_SIZE: f32 = 1.0;

/// Handle to a body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    /// Create from an engine's raw index and generation
    pub fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Raw index and generation
    pub fn into_raw_parts(self) -> (u32, u32) {
        (self.index, self.generation)
    }
}

/// Handle to a fixture (collider) attached to a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixtureHandle {
    index: u32,
    generation: u32,
}

impl FixtureHandle {
    /// Create from an engine's raw index and generation
    pub fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Raw index and generation
    pub fn into_raw_parts(self) -> (u32, u32) {
        (self.index, self.generation)
    }
}

/// Body option object. Every field is optional; `None` takes the default.
///
/// ```ignore
/// let config = BodyConfig::circle("16px")
///     .with_position("320px", "40px")
///     .dynamic()
///     .on_contact(|_contact, me, other| log::info!("{:?} hit {:?}", me.handle(), other.handle()));
/// ```
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BodyConfig {
    /// Shape tag (default: box). Ignored when `vertices` is non-empty.
    pub shape: Option<ShapeKind>,
    /// Static bodies never move (default: true)
    #[serde(rename = "static")]
    pub is_static: Option<bool>,
    /// Density (default: 1.0)
    pub density: Option<f32>,
    /// Friction (default: 0.5)
    pub friction: Option<f32>,
    /// Restitution (default: 0.3)
    pub restitution: Option<f32>,
    /// Initial X (default: 0)
    pub x: Option<Length>,
    /// Initial Y (default: 0)
    pub y: Option<Length>,
    /// Initial rotation in radians (default: 0)
    pub rotation: Option<f32>,
    /// Box width (default: 1 unit)
    pub width: Option<Length>,
    /// Box height (default: 1 unit)
    pub height: Option<Length>,
    /// Circle radius (default: 1 unit)
    pub radius: Option<Length>,
    /// Polygon vertices; forces a polygon shape when non-empty
    pub vertices: Option<Vertices>,
    /// Create the fixture as an engine sensor (default: false)
    pub sensor: Option<bool>,
    /// Caller metadata, never interpreted
    pub id: Option<serde_json::Value>,
    /// Called on every contact begin involving this body
    #[serde(skip)]
    pub on_contact: Option<SensorCallback>,
}

impl BodyConfig {
    /// Empty option object
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON option object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Box with full width and height
    pub fn rectangle(width: impl Into<Length>, height: impl Into<Length>) -> Self {
        Self {
            shape: Some(ShapeKind::Box),
            width: Some(width.into()),
            height: Some(height.into()),
            ..Default::default()
        }
    }

    /// Circle with radius
    pub fn circle(radius: impl Into<Length>) -> Self {
        Self {
            shape: Some(ShapeKind::Circle),
            radius: Some(radius.into()),
            ..Default::default()
        }
    }

    /// Polygon from vertices
    pub fn polygon(vertices: impl Into<Vertices>) -> Self {
        Self {
            shape: Some(ShapeKind::Polygon),
            vertices: Some(vertices.into()),
            ..Default::default()
        }
    }

    /// Set shape tag
    pub fn with_shape(mut self, shape: impl Into<ShapeKind>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    /// Set initial position
    pub fn with_position(mut self, x: impl Into<Length>, y: impl Into<Length>) -> Self {
        self.x = Some(x.into());
        self.y = Some(y.into());
        self
    }

    /// Set initial rotation (radians)
    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = Some(radians);
        self
    }

    /// Make the body dynamic
    pub fn dynamic(mut self) -> Self {
        self.is_static = Some(false);
        self
    }

    /// Make the body static
    pub fn fixed(mut self) -> Self {
        self.is_static = Some(true);
        self
    }

    /// Set density, friction and restitution together
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.density = Some(material.density);
        self.friction = Some(material.friction);
        self.restitution = Some(material.restitution);
        self
    }

    /// Set sensor fixture flag
    pub fn with_sensor(mut self, sensor: bool) -> Self {
        self.sensor = Some(sensor);
        self
    }

    /// Attach caller metadata
    pub fn with_id(mut self, id: impl Into<serde_json::Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach a contact-begin callback
    pub fn on_contact<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&ContactEvent, BodyRef<'_>, BodyRef<'_>) + Send + 'static,
    {
        self.on_contact = Some(Box::new(callback));
        self
    }

    /// True when no option at all was given
    pub fn is_empty(&self) -> bool {
        self.shape.is_none()
            && self.is_static.is_none()
            && self.density.is_none()
            && self.friction.is_none()
            && self.restitution.is_none()
            && self.x.is_none()
            && self.y.is_none()
            && self.rotation.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.radius.is_none()
            && self.vertices.is_none()
            && self.sensor.is_none()
            && self.id.is_none()
            && self.on_contact.is_none()
    }

    /// Fill defaults, convert units and pick the shape.
    ///
    /// All five length fields are checked even when the chosen shape does
    /// not use them.
    pub fn resolve(&self, ratio: &DrawRatio) -> Result<BodyDesc> {
        if self.is_empty() {
            return Err(PhysicsError::EmptyBodyConfig);
        }

        let length = |field: &str, value: &Option<Length>, default: f32| match value {
            Some(v) => ratio.resolve(field, v),
            None => Ok(default),
        };
        let x = length("x", &self.x, 0.0)?;
        let y = length("y", &self.y, 0.0)?;
        let width = length("width", &self.width, DEFAULT_SHAPE_SIZE)?;
        let height = length("height", &self.height, DEFAULT_SHAPE_SIZE)?;
        let radius = length("radius", &self.radius, DEFAULT_SHAPE_SIZE)?;

        let shape = match self.vertices.as_ref().filter(|v| !v.is_empty()) {
            Some(vertices) => ShapeDesc::Polygon {
                points: vertices.resolve(ratio)?,
            },
            None => match self.shape.clone().unwrap_or_default() {
                ShapeKind::Box => ShapeDesc::from_size(width, height),
                ShapeKind::Circle => ShapeDesc::Circle { radius },
                ShapeKind::Polygon => {
                    return Err(PhysicsError::UnknownShape("polygon without vertices".into()))
                }
                ShapeKind::Other(tag) => return Err(PhysicsError::UnknownShape(tag)),
            },
        };

        let defaults = PhysicsMaterial::default();
        Ok(BodyDesc {
            is_static: self.is_static.unwrap_or(true),
            position: [x, y],
            rotation: self.rotation.unwrap_or(0.0),
            fixture: FixtureDesc {
                shape,
                material: PhysicsMaterial {
                    density: self.density.unwrap_or(defaults.density),
                    friction: self.friction.unwrap_or(defaults.friction),
                    restitution: self.restitution.unwrap_or(defaults.restitution),
                },
                is_sensor: self.sensor.unwrap_or(false),
            },
        })
    }
}

impl fmt::Debug for BodyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyConfig")
            .field("shape", &self.shape)
            .field("is_static", &self.is_static)
            .field("density", &self.density)
            .field("friction", &self.friction)
            .field("restitution", &self.restitution)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("rotation", &self.rotation)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("radius", &self.radius)
            .field("vertices", &self.vertices)
            .field("sensor", &self.sensor)
            .field("id", &self.id)
            .field("on_contact", &self.on_contact.is_some())
            .finish()
    }
}

/// Fixture part of a resolved body
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureDesc {
    pub shape: ShapeDesc,
    pub material: PhysicsMaterial,
    pub is_sensor: bool,
}

/// Fully resolved body creation request, in simulation units
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub is_static: bool,
    pub position: [f32; 2],
    /// Applied after the body exists, never as part of its initial transform
    pub rotation: f32,
    pub fixture: FixtureDesc,
}

/// A body created through the world. Live state stays in the engine.
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) handle: BodyHandle,
    pub(crate) fixture: FixtureHandle,
    pub(crate) shape: ShapeDesc,
    pub(crate) is_static: bool,
    pub(crate) id: Option<serde_json::Value>,
}

impl Body {
    /// Engine handle
    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    /// Fixture handle
    pub fn fixture(&self) -> FixtureHandle {
        self.fixture
    }

    /// Resolved shape
    pub fn shape(&self) -> &ShapeDesc {
        &self.shape
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Caller metadata
    pub fn id(&self) -> Option<&serde_json::Value> {
        self.id.as_ref()
    }
}

/// Borrowed view of a body that reads position and angle from the engine
#[derive(Clone, Copy)]
pub struct BodyRef<'a> {
    pub(crate) body: &'a Body,
    pub(crate) engine: &'a dyn PhysicsBackend,
    pub(crate) ratio: DrawRatio,
}

impl<'a> BodyRef<'a> {
    /// Registry entry
    pub fn body(&self) -> &'a Body {
        self.body
    }

    pub fn handle(&self) -> BodyHandle {
        self.body.handle
    }

    pub fn id(&self) -> Option<&'a serde_json::Value> {
        self.body.id.as_ref()
    }

    pub fn shape(&self) -> &'a ShapeDesc {
        &self.body.shape
    }

    pub fn is_static(&self) -> bool {
        self.body.is_static
    }

    /// Current position in simulation units
    pub fn position(&self) -> Result<[f32; 2]> {
        self.engine.body_position(self.body.handle)
    }

    /// Current position in pixels
    pub fn position_px(&self) -> Result<[f32; 2]> {
        let [x, y] = self.position()?;
        let r = self.ratio.get();
        Ok([x * r, y * r])
    }

    /// Current angle in radians
    pub fn angle(&self) -> Result<f32> {
        self.engine.body_angle(self.body.handle)
    }

    /// Current linear velocity in simulation units per second
    pub fn linear_velocity(&self) -> Result<[f32; 2]> {
        self.engine.body_linear_velocity(self.body.handle)
    }
}

impl fmt::Debug for BodyRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyRef").field("body", self.body).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_rejected() {
        let err = BodyConfig::new().resolve(&DrawRatio::default()).unwrap_err();
        assert!(matches!(err, PhysicsError::EmptyBodyConfig));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_defaults_filled() {
        let desc = BodyConfig::new().with_id("crate").resolve(&DrawRatio::default()).unwrap();
        assert!(desc.is_static);
        assert_eq!(desc.position, [0.0, 0.0]);
        assert_eq!(desc.rotation, 0.0);
        assert_eq!(desc.fixture.shape, ShapeDesc::from_size(1.0, 1.0));
        assert_eq!(desc.fixture.material, PhysicsMaterial::new(1.0, 0.5, 0.3));
        assert!(!desc.fixture.is_sensor);
    }

    #[test]
    fn test_pixel_fields_converted() {
        let ratio = DrawRatio::new(20.0).unwrap();
        let desc = BodyConfig::rectangle("40px", 3.0_f32)
            .with_position("100px", "-20 px")
            .resolve(&ratio)
            .unwrap();
        assert_eq!(desc.position, [5.0, -1.0]);
        assert_eq!(desc.fixture.shape, ShapeDesc::from_size(2.0, 3.0));
    }

    #[test]
    fn test_unused_field_still_validated() {
        let mut config = BodyConfig::circle(1.0_f32);
        config.width = Some("nope".into());
        let err = config.resolve(&DrawRatio::default()).unwrap_err();
        assert!(matches!(err, PhysicsError::InvalidLength { ref field, .. } if field == "width"));
    }

    #[test]
    fn test_vertices_force_polygon() {
        let config = BodyConfig::from_json(r#"{"shape": "circle", "vertices": [0, 0, 1, 0, 0, 1]}"#).unwrap();
        let desc = config.resolve(&DrawRatio::default()).unwrap();
        assert_eq!(
            desc.fixture.shape,
            ShapeDesc::Polygon {
                points: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]
            }
        );
    }

    #[test]
    fn test_unknown_and_vertexless_polygon_rejected() {
        let ratio = DrawRatio::default();
        let unknown = BodyConfig::from_json(r#"{"shape": "triangle"}"#).unwrap();
        assert!(matches!(unknown.resolve(&ratio), Err(PhysicsError::UnknownShape(tag)) if tag == "triangle"));

        let bare = BodyConfig::new().with_shape("polygon");
        assert!(matches!(bare.resolve(&ratio), Err(PhysicsError::UnknownShape(_))));

        let empty_vertices = BodyConfig::from_json(r#"{"shape": "box", "vertices": []}"#).unwrap();
        assert!(matches!(
            empty_vertices.resolve(&ratio).unwrap().fixture.shape,
            ShapeDesc::Box { .. }
        ));
    }

    #[test]
    fn test_json_nulls_are_not_provided() {
        let config = BodyConfig::from_json(r#"{"static": false, "density": null, "x": null}"#).unwrap();
        let desc = config.resolve(&DrawRatio::default()).unwrap();
        assert!(!desc.is_static);
        assert_eq!(desc.fixture.material.density, 1.0);
        assert_eq!(desc.position[0], 0.0);
    }
}
