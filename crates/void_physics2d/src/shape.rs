//! Shape tags, vertex encodings and resolved collision shapes

use crate::error::{PhysicsError, Result};
use crate::units::{DrawRatio, Length};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape tag as written in a body option object
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeKind {
    /// Axis-aligned box from full width and height
    #[default]
    Box,
    /// Circle from radius
    Circle,
    /// Convex polygon from vertices
    Polygon,
    /// Anything else; rejected when the body is built
    Other(String),
}

impl From<String> for ShapeKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "box" => Self::Box,
            "circle" => Self::Circle,
            "polygon" => Self::Polygon,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for ShapeKind {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_owned())
    }
}

impl From<ShapeKind> for String {
    fn from(kind: ShapeKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box => f.write_str("box"),
            Self::Circle => f.write_str("circle"),
            Self::Polygon => f.write_str("polygon"),
            Self::Other(tag) => f.write_str(tag),
        }
    }
}

/// One polygon vertex: `[x, y]` or `{"x": .., "y": ..}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Vertex {
    Pair([Length; 2]),
    Point { x: Length, y: Length },
}

impl Vertex {
    fn coords(&self) -> (&Length, &Length) {
        match self {
            Self::Pair([x, y]) => (x, y),
            Self::Point { x, y } => (x, y),
        }
    }
}

impl From<[f32; 2]> for Vertex {
    fn from(p: [f32; 2]) -> Self {
        Self::Pair([Length::Units(p[0]), Length::Units(p[1])])
    }
}

/// Polygon vertex list in any of the accepted encodings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Vertices {
    /// Sequence of pair or record vertices
    Points(Vec<Vertex>),
    /// Alternating `x, y, x, y, ..` scalars
    Flat(Vec<Length>),
}

impl Vertices {
    /// Whether no vertex data was given
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Points(points) => points.is_empty(),
            Self::Flat(coords) => coords.is_empty(),
        }
    }

    /// Normalize to `(x, y)` pairs in simulation units, preserving order
    pub fn resolve(&self, ratio: &DrawRatio) -> Result<Vec<[f32; 2]>> {
        match self {
            Self::Points(points) => points
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let (x, y) = v.coords();
                    Ok([
                        ratio.resolve(&format!("vertices[{}].x", i), x)?,
                        ratio.resolve(&format!("vertices[{}].y", i), y)?,
                    ])
                })
                .collect(),
            Self::Flat(coords) => {
                if coords.len() % 2 != 0 {
                    return Err(PhysicsError::OddVertexList(coords.len()));
                }
                coords
                    .chunks_exact(2)
                    .enumerate()
                    .map(|(i, pair)| {
                        Ok([
                            ratio.resolve(&format!("vertices[{}]", 2 * i), &pair[0])?,
                            ratio.resolve(&format!("vertices[{}]", 2 * i + 1), &pair[1])?,
                        ])
                    })
                    .collect()
            }
        }
    }
}

impl From<Vec<[f32; 2]>> for Vertices {
    fn from(points: Vec<[f32; 2]>) -> Self {
        Self::Points(points.into_iter().map(Vertex::from).collect())
    }
}

/// Fully resolved collision shape, centered on the body origin
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeDesc {
    /// Box with half-extents
    Box { half_extents: [f32; 2] },
    /// Circle with radius
    Circle { radius: f32 },
    /// Convex polygon, points relative to the body origin
    Polygon { points: Vec<[f32; 2]> },
}

impl ShapeDesc {
    /// Box from full width and height
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::Box {
            half_extents: [width * 0.5, height * 0.5],
        }
    }

    /// Tag of this shape
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Box { .. } => ShapeKind::Box,
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Polygon { .. } => ShapeKind::Polygon,
        }
    }
}
