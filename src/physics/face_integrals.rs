//! Mass properties by divergence-theorem face integration.
//!
//! The volume integrals of a polyhedron are rewritten as surface integrals
//! over its faces, each face integral is reduced to an integral over the
//! face's projection onto a coordinate plane, and that in turn to closed-form
//! sums over the projected edges. This path is independent from
//! [`crate::physics::tetrahedra`] and serves as its cross-check.
//!
//! Reference: B. Mirtich, "Fast and Accurate Computation of Polyhedral Mass
//! Properties", Journal of Graphics Tools 1(2), 1996.

use cgmath::{InnerSpace, Vector3};

use crate::{
    data_structures::{face::Face, mesh::widen},
    error::{GeometryError, GeometryResult},
    physics::mass_properties::{MassProperties, VolumeMoments},
};

/// Projection axes for one face. `c` is the axis along the largest normal
/// component; `a` and `b` span the plane the face is projected onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Axes {
    a: usize,
    b: usize,
    c: usize,
}

impl Axes {
    fn for_normal(n: Vector3<f64>) -> Self {
        let (nx, ny, nz) = (n.x.abs(), n.y.abs(), n.z.abs());
        let c = if nx > ny && nx > nz {
            0
        } else if ny > nz {
            1
        } else {
            2
        };
        let a = (c + 1) % 3;
        let b = (a + 1) % 3;
        Self { a, b, c }
    }
}

/// Integrals of monomials up to degree 3 over the projected face.
#[derive(Clone, Copy, Debug, Default)]
struct ProjectionIntegrals {
    p1: f64,
    pa: f64,
    pb: f64,
    paa: f64,
    pab: f64,
    pbb: f64,
    paaa: f64,
    paab: f64,
    pabb: f64,
    pbbb: f64,
}

impl ProjectionIntegrals {
    fn over(corners: &[Vector3<f64>; 3], axes: Axes) -> Self {
        let mut p = Self::default();
        for i in 0..3 {
            let (a0, b0) = (corners[i][axes.a], corners[i][axes.b]);
            let (a1, b1) = (corners[(i + 1) % 3][axes.a], corners[(i + 1) % 3][axes.b]);
            let da = a1 - a0;
            let db = b1 - b0;

            let (a0_2, b0_2) = (a0 * a0, b0 * b0);
            let (a0_3, b0_3) = (a0_2 * a0, b0_2 * b0);
            let (a0_4, b0_4) = (a0_3 * a0, b0_3 * b0);
            let (a1_2, b1_2) = (a1 * a1, b1 * b1);
            let (a1_3, b1_3) = (a1_2 * a1, b1_2 * b1);

            let c1 = a1 + a0;
            let ca = a1 * c1 + a0_2;
            let caa = a1 * ca + a0_3;
            let caaa = a1 * caa + a0_4;
            let cb = b1 * (b1 + b0) + b0_2;
            let cbb = b1 * cb + b0_3;
            let cbbb = b1 * cbb + b0_4;
            let cab = 3.0 * a1_2 + 2.0 * a1 * a0 + a0_2;
            let kab = a1_2 + 2.0 * a1 * a0 + 3.0 * a0_2;
            let caab = a0 * cab + 4.0 * a1_3;
            let kaab = a1 * kab + 4.0 * a0_3;
            let cabb = 4.0 * b1_3 + 3.0 * b1_2 * b0 + 2.0 * b1 * b0_2 + b0_3;
            let kabb = b1_3 + 2.0 * b1_2 * b0 + 3.0 * b1 * b0_2 + 4.0 * b0_3;

            p.p1 += db * c1;
            p.pa += db * ca;
            p.paa += db * caa;
            p.paaa += db * caaa;
            p.pb += da * cb;
            p.pbb += da * cbb;
            p.pbbb += da * cbbb;
            p.pab += db * (b1 * cab + b0 * kab);
            p.paab += db * (b1 * caab + b0 * kaab);
            p.pabb += da * (a1 * cabb + a0 * kabb);
        }

        p.p1 /= 2.0;
        p.pa /= 6.0;
        p.paa /= 12.0;
        p.paaa /= 20.0;
        p.pb /= -6.0;
        p.pbb /= -12.0;
        p.pbbb /= -20.0;
        p.pab /= 24.0;
        p.paab /= 60.0;
        p.pabb /= -60.0;
        p
    }
}

/// Integrals of monomials up to degree 3 over the face itself, expressed in
/// the `a`, `b`, `c` axes of its projection.
#[derive(Clone, Copy, Debug, Default)]
struct FaceIntegrals {
    fa: f64,
    fb: f64,
    fc: f64,
    faa: f64,
    fbb: f64,
    fcc: f64,
    faaa: f64,
    fbbb: f64,
    fccc: f64,
    faab: f64,
    fbbc: f64,
    fcca: f64,
}

impl FaceIntegrals {
    fn over(corners: &[Vector3<f64>; 3], normal: Vector3<f64>, w: f64, axes: Axes) -> Self {
        let p = ProjectionIntegrals::over(corners, axes);
        let (na, nb) = (normal[axes.a], normal[axes.b]);
        let k1 = 1.0 / normal[axes.c];
        let k2 = k1 * k1;
        let k3 = k2 * k1;
        let k4 = k3 * k1;

        Self {
            fa: k1 * p.pa,
            fb: k1 * p.pb,
            fc: -k2 * (na * p.pa + nb * p.pb + w * p.p1),

            faa: k1 * p.paa,
            fbb: k1 * p.pbb,
            fcc: k3
                * (na * na * p.paa
                    + 2.0 * na * nb * p.pab
                    + nb * nb * p.pbb
                    + w * (2.0 * (na * p.pa + nb * p.pb) + w * p.p1)),

            faaa: k1 * p.paaa,
            fbbb: k1 * p.pbbb,
            fccc: -k4
                * (na * na * na * p.paaa
                    + 3.0 * na * na * nb * p.paab
                    + 3.0 * na * nb * nb * p.pabb
                    + nb * nb * nb * p.pbbb
                    + 3.0 * w * (na * na * p.paa + 2.0 * na * nb * p.pab + nb * nb * p.pbb)
                    + w * w * (3.0 * (na * p.pa + nb * p.pb) + w * p.p1)),

            faab: k1 * p.paab,
            fbbc: -k2 * (na * p.pabb + nb * p.pbbb + w * p.pbb),
            fcca: k3
                * (na * na * p.paaa
                    + 2.0 * na * nb * p.paab
                    + nb * nb * p.pabb
                    + w * (2.0 * (na * p.paa + nb * p.pab) + w * p.pa)),
        }
    }
}

/// Running volume integrals over all faces seen so far.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VolumeIntegrals {
    t0: f64,
    t1: [f64; 3],
    t2: [f64; 3],
    tp: [f64; 3],
}

impl VolumeIntegrals {
    /// Add the contribution of one outward wound face.
    ///
    /// The plane is rebuilt in double precision from the corner positions;
    /// zero-area faces enclose nothing and are skipped.
    pub fn add_face(&mut self, face: &Face) {
        let corners = face.vertices.map(widen);
        let normal = (corners[1] - corners[0]).cross(corners[2] - corners[1]);
        let length = normal.magnitude();
        if !(length > 0.0 && length.is_finite()) {
            return;
        }
        let normal = normal / length;
        let w = -normal.dot(corners[0]);

        let axes = Axes::for_normal(normal);
        let f = FaceIntegrals::over(&corners, normal, w, axes);
        let Axes { a, b, c } = axes;

        self.t0 += normal.x
            * if a == 0 {
                f.fa
            } else if b == 0 {
                f.fb
            } else {
                f.fc
            };

        self.t1[a] += normal[a] * f.faa;
        self.t1[b] += normal[b] * f.fbb;
        self.t1[c] += normal[c] * f.fcc;
        self.t2[a] += normal[a] * f.faaa;
        self.t2[b] += normal[b] * f.fbbb;
        self.t2[c] += normal[c] * f.fccc;
        self.tp[a] += normal[a] * f.faab;
        self.tp[b] += normal[b] * f.fbbc;
        self.tp[c] += normal[c] * f.fcca;
    }

    /// The signed enclosed volume.
    pub fn volume(&self) -> f64 {
        self.t0
    }

    pub fn finish(self, density: f64) -> GeometryResult<MassProperties> {
        let moments = VolumeMoments {
            volume: self.t0,
            first: self.t1.map(|t| t / 2.0),
            second: self.t2.map(|t| t / 3.0),
            products: self.tp.map(|t| t / 2.0),
        };
        MassProperties::from_integrals(moments, density)
    }
}

/// Mass properties of a closed, outward wound mesh given as faces.
///
/// Agrees with [`crate::physics::tetrahedra::compute_mass_properties`] up to
/// rounding for every valid input.
pub fn compute_mass_properties_by_integration(
    faces: &[Face],
    density: f64,
) -> GeometryResult<MassProperties> {
    if faces.is_empty() {
        return Err(GeometryError::EmptyMesh);
    }
    let integrals = faces.iter().fold(VolumeIntegrals::default(), |mut acc, face| {
        acc.add_face(face);
        acc
    });
    integrals.finish(density)
}
