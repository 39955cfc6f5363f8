//! Mass, centre of mass and inertia tensor of a solid.

use approx::{AbsDiffEq, RelativeEq};
use cgmath::{Matrix3, Vector3};

use crate::error::{GeometryError, GeometryResult, GeometryWarning};

/// Mass properties of a uniformly dense solid.
///
/// The inertia tensor is taken about the centre of mass and follows the usual
/// convention: moments on the diagonal, negated products of inertia off it.
/// A value describes one mesh snapshot; recompute it if the mesh changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassProperties {
    pub mass: f64,
    pub centroid: Vector3<f64>,
    pub inertia: Matrix3<f64>,
}

/// Volume integrals of a unit density solid, taken about the origin.
///
/// Both integration methods reduce to these ten numbers, and
/// [`MassProperties::from_integrals`] turns them into the final result.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct VolumeMoments {
    /// ∫ 1
    pub volume: f64,
    /// ∫ x, ∫ y, ∫ z
    pub first: [f64; 3],
    /// ∫ x², ∫ y², ∫ z²
    pub second: [f64; 3],
    /// ∫ xy, ∫ yz, ∫ zx
    pub products: [f64; 3],
}

impl MassProperties {
    pub fn new(mass: f64, centroid: Vector3<f64>, inertia: Matrix3<f64>) -> Self {
        Self {
            mass,
            centroid,
            inertia,
        }
    }

    pub(crate) fn from_integrals(moments: VolumeMoments, density: f64) -> GeometryResult<Self> {
        check_density(density)?;
        let VolumeMoments {
            volume,
            first,
            second,
            products,
        } = moments;
        if volume == 0.0 || !volume.is_finite() {
            return Err(GeometryError::DegenerateVolume { volume });
        }

        let mass = density * volume;
        let c = [first[0] / volume, first[1] / volume, first[2] / volume];

        // second moments and products about the centre of mass
        let [xx, yy, zz] = [0usize, 1, 2].map(|i| density * second[i] - mass * c[i] * c[i]);
        let xy = density * products[0] - mass * c[0] * c[1];
        let yz = density * products[1] - mass * c[1] * c[2];
        let zx = density * products[2] - mass * c[2] * c[0];

        #[rustfmt::skip]
        let inertia = Matrix3::new(
            yy + zz, -xy,     -zx,
            -xy,     zz + xx, -yz,
            -zx,     -yz,     xx + yy,
        );
        Ok(Self::new(mass, Vector3::new(c[0], c[1], c[2]), inertia))
    }

    /// Entry `(row, col)` of the inertia tensor.
    pub fn inertia_entry(&self, row: usize, col: usize) -> f64 {
        // cgmath matrices are indexed column first
        self.inertia[col][row]
    }

    /// The same body with the sign of mass and inertia reversed.
    ///
    /// An inside-out mesh yields negative mass and inertia with the correct
    /// centroid, so negating recovers the properties of the intended solid.
    pub fn negated(&self) -> Self {
        Self::new(-self.mass, self.centroid, -self.inertia)
    }

    pub fn orientation_warning(&self) -> Option<GeometryWarning> {
        (self.mass < 0.0).then_some(GeometryWarning::InconsistentOrientation { mass: self.mass })
    }

    fn scalars(&self) -> [f64; 13] {
        let m = &self.inertia;
        [
            self.mass,
            self.centroid.x,
            self.centroid.y,
            self.centroid.z,
            m.x.x,
            m.x.y,
            m.x.z,
            m.y.x,
            m.y.y,
            m.y.z,
            m.z.x,
            m.z.y,
            m.z.z,
        ]
    }
}

pub(crate) fn check_density(density: f64) -> GeometryResult<()> {
    if density > 0.0 && density.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonPositiveDensity { density })
    }
}

impl AbsDiffEq for MassProperties {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.scalars()
            .iter()
            .zip(other.scalars().iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for MassProperties {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.scalars()
            .iter()
            .zip(other.scalars().iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
