//! Error and warning types shared by the mesh and physics modules.
//!
//! Hard failures are reported through [`GeometryError`]. Conditions that still
//! leave a usable (if approximate) result behind are reported as
//! [`GeometryWarning`] values next to that result.

use thiserror::Error;

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Failures that prevent a mesh or mass computation from producing a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The mesh has no triangles.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// The position buffer does not describe whole 3D points.
    #[error("position buffer length {len} is not a multiple of 3")]
    MalformedPositions {
        /// Length of the offending position buffer.
        len: usize,
    },

    /// The index buffer does not describe whole triangles.
    #[error("index buffer length {len} is not a multiple of 3")]
    MalformedIndices {
        /// Length of the offending index buffer.
        len: usize,
    },

    /// A triangle references a vertex that does not exist.
    #[error("vertex index {index} out of range (mesh has {vertex_count} vertices)")]
    IndexOutOfRange {
        /// The invalid index.
        index: u32,
        /// Number of vertices in the position array.
        vertex_count: usize,
    },

    /// A face list does not belong to the mesh it is written back into.
    #[error("{faces} faces cannot be applied to a mesh with {triangles} triangles")]
    FaceCountMismatch {
        /// Number of faces supplied.
        faces: usize,
        /// Number of triangles in the mesh.
        triangles: usize,
    },

    /// The enclosed volume accumulator is zero or not finite.
    #[error("enclosed volume is zero or not finite ({volume})")]
    DegenerateVolume {
        /// The raw volume accumulator.
        volume: f64,
    },

    /// Density must be a positive finite number.
    #[error("density must be positive and finite, got {density}")]
    NonPositiveDensity {
        /// The rejected density.
        density: f64,
    },

    /// The mesh encloses a negative volume and the caller asked to reject it.
    #[error("mesh is inside out (computed mass {mass})")]
    InvertedMesh {
        /// The negative mass that was computed.
        mass: f64,
    },
}

/// Recoverable conditions reported alongside a computed value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryWarning {
    /// Mass came out negative: the mesh is inverted or winding repair failed.
    #[error("computed mass {mass} is negative; the mesh is probably wound inside out")]
    InconsistentOrientation {
        /// The negative mass.
        mass: f64,
    },

    /// Winding correction could not reach some faces from the seed face.
    #[error("{unreached} faces are not connected to the seed face; their winding is unverified")]
    DisconnectedComponents {
        /// Number of faces left unverified.
        unreached: usize,
    },

    /// Some faces have fewer than three neighbours (boundary or non-manifold edges).
    #[error("{under_connected} faces have fewer than three neighbours; the mesh is not closed")]
    OpenMesh {
        /// Number of faces with fewer than three neighbours.
        under_connected: usize,
    },
}
