//! Error types for the 2D physics layer

use crate::body::BodyHandle;
use thiserror::Error;

/// Physics layer errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// `create_body` was called without a single option set
    #[error("Body configuration is empty: at least one option must be provided")]
    EmptyBodyConfig,

    /// Shape tag not recognized (or polygon requested without vertices)
    #[error("Unrecognized shape: {0}")]
    UnknownShape(String),

    /// A length string that is not a pixel literal
    #[error("Invalid length for `{field}`: {value:?} is not a number or pixel literal")]
    InvalidLength {
        /// Option field holding the value
        field: String,
        /// The rejected input
        value: String,
    },

    /// Flat vertex list with an unpaired coordinate
    #[error("Flat vertex list has an odd number of coordinates: {0}")]
    OddVertexList(usize),

    /// Random impulse options out of range
    #[error("Invalid impulse options: {0}")]
    InvalidImpulse(String),

    /// Invalid configuration
    #[error("Invalid physics configuration: {0}")]
    InvalidConfig(String),

    /// Option object could not be read from JSON
    #[error("Invalid option JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Handle does not belong to this world
    #[error("Body not found: {0:?}")]
    BodyNotFound(BodyHandle),

    /// Shape creation failed inside the engine
    #[error("Failed to create collision shape: {0}")]
    ShapeCreationFailed(String),
}

impl PhysicsError {
    /// Whether this error was caused by caller input rather than the engine
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::EmptyBodyConfig
                | Self::UnknownShape(_)
                | Self::InvalidLength { .. }
                | Self::OddVertexList(_)
                | Self::InvalidImpulse(_)
                | Self::InvalidConfig(_)
                | Self::InvalidJson(_)
        )
    }
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
