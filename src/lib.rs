//! flow-solid
//!
//! Mesh topology repair and rigid-body mass properties for triangle meshes
//! loaded into a flow-ngin style sandbox. Meshes are linked into a face
//! adjacency graph, their winding is made consistent, and mass, centre of mass
//! and inertia tensor are computed with two independent closed-form methods.
//!
//! High-level modules
//! - `data_structures`: flat triangle meshes, faces and the face graph, primitives
//! - `winding`: breadth-first winding correction over the face graph
//! - `physics`: mass properties (tetrahedra and face integrals) and rigid bodies
//! - `intersect`: ray queries against faces, planes and disks
//! - `resources`: OBJ loading and GPU upload of corrected meshes
//! - `error`: error and warning types
//!

pub mod data_structures;
pub mod error;
pub mod intersect;
pub mod physics;
pub mod resources;
pub mod winding;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use cgmath::*;
pub use data_structures::{
    face::{Face, FaceGraph, FaceId},
    mesh::TriMesh,
};
pub use error::{GeometryError, GeometryResult, GeometryWarning};
pub use physics::{
    face_integrals::compute_mass_properties_by_integration,
    mass_properties::MassProperties,
    rigid_body::{IntegrationMethod, InvertedPolicy, RigidBody, RigidBodyDescriptor},
    tetrahedra::compute_mass_properties,
};
pub use winding::{OrientedMesh, WindingReport, correct_winding, orient};
