use std::sync::Arc;

use cgmath::{Matrix3, Vector3};

use crate::{
    data_structures::{face::build_faces, mesh::TriMesh},
    error::{GeometryError, GeometryResult, GeometryWarning},
    physics::{
        face_integrals::compute_mass_properties_by_integration,
        mass_properties::{MassProperties, check_density},
        tetrahedra::compute_mass_properties,
    },
    winding::OrientedMesh,
};

/// Which closed-form integration computes the mass properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegrationMethod {
    /// Signed tetrahedra against the origin.
    #[default]
    Tetrahedra,
    /// Divergence theorem face integrals.
    FaceIntegrals,
}

/// What to do when a body comes out with negative mass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InvertedPolicy {
    /// Keep the negative values and record a warning.
    #[default]
    Warn,
    /// Flip the sign of mass and inertia and record a warning.
    Negate,
    /// Fail with [`GeometryError::InvertedMesh`].
    Reject,
}

/// Describes how to build a [`RigidBody`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidBodyDescriptor<'a> {
    pub label: Option<&'a str>,
    pub density: f64,
    pub method: IntegrationMethod,
    pub inverted: InvertedPolicy,
}

impl Default for RigidBodyDescriptor<'_> {
    fn default() -> Self {
        Self {
            label: None,
            density: 1.0,
            method: IntegrationMethod::default(),
            inverted: InvertedPolicy::default(),
        }
    }
}

/// A solid with uniform density and the mass properties of its mesh.
///
/// The mass properties are computed once, when the body is created. The mesh
/// is shared read-only; to change the geometry build a new body.
#[derive(Clone, Debug)]
pub struct RigidBody {
    label: Option<String>,
    mesh: Arc<TriMesh>,
    density: f64,
    mass_properties: MassProperties,
    warnings: Vec<GeometryWarning>,
}

impl RigidBody {
    /// Create a body from a mesh that is already consistently wound.
    pub fn new(mesh: Arc<TriMesh>, desc: &RigidBodyDescriptor) -> GeometryResult<Self> {
        Self::with_warnings(mesh, desc, Vec::new())
    }

    /// Create a body from a winding-corrected mesh.
    ///
    /// Faces the correction could not reach and faces missing a neighbour are
    /// recorded as warnings; the mass properties are computed regardless.
    pub fn from_oriented(oriented: &OrientedMesh, desc: &RigidBodyDescriptor) -> GeometryResult<Self> {
        let mut warnings = Vec::new();
        if let Some(warning) = oriented.report.warning() {
            warnings.push(warning);
        }
        let under_connected = oriented.graph.under_connected();
        if under_connected > 0 {
            let warning = GeometryWarning::OpenMesh { under_connected };
            log::warn!("{}: {}", desc.label.unwrap_or("rigid body"), warning);
            warnings.push(warning);
        }
        Self::with_warnings(Arc::clone(&oriented.mesh), desc, warnings)
    }

    fn with_warnings(
        mesh: Arc<TriMesh>,
        desc: &RigidBodyDescriptor,
        mut warnings: Vec<GeometryWarning>,
    ) -> GeometryResult<Self> {
        check_density(desc.density)?;
        let name = desc.label.unwrap_or(mesh.name.as_str());

        let mut mass_properties = match desc.method {
            IntegrationMethod::Tetrahedra => {
                compute_mass_properties(mesh.positions(), mesh.indices(), desc.density)?
            }
            IntegrationMethod::FaceIntegrals => {
                let faces = build_faces(mesh.positions(), mesh.indices())?;
                compute_mass_properties_by_integration(&faces, desc.density)?
            }
        };

        if let Some(warning) = mass_properties.orientation_warning() {
            match desc.inverted {
                InvertedPolicy::Reject => {
                    log::error!("{}: {}", name, warning);
                    return Err(GeometryError::InvertedMesh {
                        mass: mass_properties.mass,
                    });
                }
                InvertedPolicy::Warn => {
                    log::warn!("{}: {}", name, warning);
                }
                InvertedPolicy::Negate => {
                    log::warn!("{}: {}, negating", name, warning);
                    mass_properties = mass_properties.negated();
                }
            }
            warnings.push(warning);
        }

        log::debug!(
            "{}: mass {} centroid {:?}",
            name,
            mass_properties.mass,
            mass_properties.centroid
        );
        Ok(Self {
            label: desc.label.map(str::to_owned),
            mesh,
            density: desc.density,
            mass_properties,
            warnings,
        })
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn mesh(&self) -> &Arc<TriMesh> {
        &self.mesh
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn mass_properties(&self) -> &MassProperties {
        &self.mass_properties
    }

    pub fn mass(&self) -> f64 {
        self.mass_properties.mass
    }

    pub fn centroid(&self) -> Vector3<f64> {
        self.mass_properties.centroid
    }

    pub fn inertia(&self) -> Matrix3<f64> {
        self.mass_properties.inertia
    }

    /// Conditions found while building the body. Empty for a clean solid.
    pub fn warnings(&self) -> &[GeometryWarning] {
        &self.warnings
    }
}
