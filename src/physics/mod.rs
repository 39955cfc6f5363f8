//! Mass properties of closed triangle meshes.
//!
//! - `mass_properties` holds the result type shared by both methods
//! - `tetrahedra` sums signed tetrahedra against the origin
//! - `face_integrals` integrates over faces with the divergence theorem
//! - `rigid_body` ties a mesh, a density and its mass properties together

pub mod face_integrals;
pub mod mass_properties;
pub mod rigid_body;
pub mod tetrahedra;
