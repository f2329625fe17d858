//! Error types for solver initialization.

use std::fmt;

/// Errors reported when building a body from geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The geometry has no (or an empty) position attribute.
    MissingPositions,
    /// Position buffer length is not a multiple of 3.
    MalformedPositions { len: usize },
    /// Index buffer length is not a multiple of 3.
    MalformedIndices { len: usize },
    /// A triangle references a vertex that does not exist.
    IndexOutOfRange { index: u32, vertex_count: usize },
    /// Total mass must be positive and finite.
    InvalidMass,
    /// Edge stiffness must be in [0, 1].
    InvalidStiffness,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::MissingPositions => write!(f, "geometry has no position attribute"),
            SolverError::MalformedPositions { len } => {
                write!(f, "position buffer length {} is not a multiple of 3", len)
            }
            SolverError::MalformedIndices { len } => {
                write!(f, "index buffer length {} is not a multiple of 3", len)
            }
            SolverError::IndexOutOfRange { index, vertex_count } => {
                write!(f, "vertex index {} out of range (count: {})", index, vertex_count)
            }
            SolverError::InvalidMass => write!(f, "total mass must be positive and finite"),
            SolverError::InvalidStiffness => write!(f, "edge stiffness must be in [0, 1]"),
        }
    }
}

impl std::error::Error for SolverError {}
