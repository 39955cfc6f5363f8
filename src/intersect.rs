//! Ray queries against faces, planes and disks.

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::face::Face;

const EPS: f32 = 1.0e-10;

/// Direction used by [`contains_point`]. Skewed so that rays from typical
/// query points do not run along the edges of axis aligned meshes.
const PARITY_DIRECTION: Vector3<f32> = Vector3 {
    x: 0.9,
    y: 0.37,
    z: 0.23,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Distance along `ray` at which it hits `face`, if it does.
///
/// Hits from either side count. Rays parallel to the face never hit.
pub fn ray_face(face: &Face, ray: &Ray) -> Option<f32> {
    let n = face.normal;
    let denom = n.dot(ray.direction);
    if denom.abs() < EPS {
        return None;
    }
    let t = -(n.dot(ray.origin) + face.offset) / denom;
    if t < 0.0 {
        return None;
    }

    let p = ray.at(t);
    let [p0, p1, p2] = face.vertices;
    let inside = [(p0, p1), (p1, p2), (p2, p0)]
        .iter()
        .all(|&(from, to)| n.dot((to - from).cross(p - from)) >= 0.0);
    inside.then_some(t)
}

/// Distance along `ray` to the plane through `plane_origin` with unit normal
/// `n`. Only planes whose normal points along the ray are hit.
pub fn ray_plane(n: Vector3<f32>, plane_origin: Vector3<f32>, ray: &Ray) -> Option<f32> {
    let denom = n.dot(ray.direction);
    if denom <= EPS {
        return None;
    }
    let t = (plane_origin - ray.origin).dot(n) / denom;
    (t >= 0.0).then_some(t)
}

pub fn ray_disk(n: Vector3<f32>, center: Vector3<f32>, radius: f32, ray: &Ray) -> bool {
    ray_plane(n, center, ray)
        .map(|t| (ray.at(t) - center).magnitude2() <= radius * radius)
        .unwrap_or(false)
}

/// Whether `point` lies inside the closed surface formed by `faces`.
///
/// Counts crossings of a ray leaving the point; an odd count means inside.
/// Works regardless of winding. Points on the surface give no reliable answer.
pub fn contains_point(faces: &[Face], point: Vector3<f32>) -> bool {
    let ray = Ray::new(point, PARITY_DIRECTION);
    let crossings = faces
        .iter()
        .filter(|face| ray_face(face, &ray).is_some_and(|t| t > 0.0))
        .count();
    crossings % 2 == 1
}
