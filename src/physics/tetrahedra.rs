//! Mass properties by signed tetrahedron decomposition.
//!
//! Every triangle forms a tetrahedron with the origin. Tetrahedra whose
//! triangle faces away from the origin add to the solid, those facing it
//! subtract, and for a closed mesh the over-counted volume cancels exactly.
//! This holds for concave and even non star-shaped solids, and the origin
//! does not need to lie inside the mesh.
//!
//! Reference: M. Kallay, "Computing the Moment of Inertia of a Solid Defined
//! by a Triangle Mesh", Journal of Graphics Tools 11(2), 2006.

use cgmath::{InnerSpace, Vector3};

use crate::{
    data_structures::mesh::{read_vec3, validate_buffers, widen},
    error::{GeometryError, GeometryResult},
    physics::mass_properties::{MassProperties, VolumeMoments},
};

/// Running sums over all tetrahedra, kept in double precision.
///
/// Each sum is six times (volume), 24 times (first moments) or 120 times
/// (second moments) the corresponding integral.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TetrahedronSums {
    volume: f64,
    first: [f64; 3],
    second: [f64; 3],
    products: [f64; 3],
}

impl TetrahedronSums {
    /// Add the tetrahedron between the origin and an outward wound triangle.
    pub fn add_triangle(&mut self, p1: Vector3<f64>, p2: Vector3<f64>, p3: Vector3<f64>) {
        let normal = (p2 - p1).cross(p3 - p1);
        let center = (p1 + p2 + p3) / 3.0;
        // Swapping two corners and negating the sign leaves the signed volume
        // of the stored winding unchanged. A plain swap without the sign would
        // break cancellation on non-convex meshes.
        if normal.dot(-center) > 0.0 {
            self.add_tetrahedron(p1, p3, p2, -1.0);
        } else {
            self.add_tetrahedron(p1, p2, p3, 1.0);
        }
    }

    fn add_tetrahedron(&mut self, p1: Vector3<f64>, p2: Vector3<f64>, p3: Vector3<f64>, sign: f64) {
        let (x1, y1, z1) = (p1.x, p1.y, p1.z);
        let (x2, y2, z2) = (p2.x, p2.y, p2.z);
        let (x3, y3, z3) = (p3.x, p3.y, p3.z);

        let v = sign
            * (x1 * y2 * z3 + y1 * z2 * x3 + x2 * y3 * z1
                - (x3 * y2 * z1 + x2 * y1 * z3 + y3 * z2 * x1));
        self.volume += v;

        let x4 = x1 + x2 + x3;
        let y4 = y1 + y2 + y3;
        let z4 = z1 + z2 + z3;
        self.first[0] += v * x4;
        self.first[1] += v * y4;
        self.first[2] += v * z4;

        self.second[0] += v * (x1 * x1 + x2 * x2 + x3 * x3 + x4 * x4);
        self.second[1] += v * (y1 * y1 + y2 * y2 + y3 * y3 + y4 * y4);
        self.second[2] += v * (z1 * z1 + z2 * z2 + z3 * z3 + z4 * z4);
        self.products[0] += v * (y1 * x1 + y2 * x2 + y3 * x3 + y4 * x4);
        self.products[1] += v * (z1 * y1 + z2 * y2 + z3 * y3 + z4 * y4);
        self.products[2] += v * (z1 * x1 + z2 * x2 + z3 * x3 + z4 * x4);
    }

    /// Combine two partial sums. Order does not matter.
    pub fn merge(self, other: Self) -> Self {
        let add = |a: [f64; 3], b: [f64; 3]| [a[0] + b[0], a[1] + b[1], a[2] + b[2]];
        Self {
            volume: self.volume + other.volume,
            first: add(self.first, other.first),
            second: add(self.second, other.second),
            products: add(self.products, other.products),
        }
    }

    /// Six times the signed enclosed volume.
    pub fn volume_sum(&self) -> f64 {
        self.volume
    }

    pub fn finish(self, density: f64) -> GeometryResult<MassProperties> {
        let scale = |a: [f64; 3], s: f64| a.map(|x| x / s);
        let moments = VolumeMoments {
            volume: self.volume / 6.0,
            first: scale(self.first, 24.0),
            second: scale(self.second, 120.0),
            products: scale(self.products, 120.0),
        };
        MassProperties::from_integrals(moments, density)
    }
}

/// Mass properties of the closed, outward wound mesh given by flat arrays.
///
/// Inverted or inconsistently wound input is not rejected: it shows up as a
/// negative or otherwise meaningless mass (see
/// [`MassProperties::orientation_warning`]).
pub fn compute_mass_properties(
    positions: &[f32],
    indices: &[u32],
    density: f64,
) -> GeometryResult<MassProperties> {
    validate_buffers(positions, indices)?;
    if indices.is_empty() {
        return Err(GeometryError::EmptyMesh);
    }
    let corner = |i: u32| widen(read_vec3(positions, i));
    let sums = indices
        .chunks_exact(3)
        .fold(TetrahedronSums::default(), |mut sums, c| {
            sums.add_triangle(corner(c[0]), corner(c[1]), corner(c[2]));
            sums
        });
    sums.finish(density)
}
