//! Mesh data structures: flat triangle meshes, faces and generated shapes.
//!
//! - `mesh` holds the flat position, index and normal arrays of a mesh
//! - `face` contains per-triangle faces and the edge adjacency graph over them
//! - `primitives` generates closed test solids and an open plane

pub mod face;
pub mod mesh;
pub mod primitives;
