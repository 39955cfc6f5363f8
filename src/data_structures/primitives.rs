//! Procedurally generated meshes.
//!
//! All closed shapes are emitted with counter-clockwise (outward) winding and
//! shared vertices, so they link into a closed face graph without welding.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Vector3};

use crate::{data_structures::mesh::TriMesh, error::GeometryResult};

/// Axis aligned box around `center`.
pub fn cuboid(center: Vector3<f32>, half_extents: Vector3<f32>) -> GeometryResult<TriMesh> {
    let mut positions = Vec::with_capacity(8 * 3);
    // corner `i` sits on the max side of x, y, z for bits 0, 1, 2
    for i in 0..8 {
        let pick = |bit: u32, c: f32, h: f32| if i & (1 << bit) == 0 { c - h } else { c + h };
        positions.extend_from_slice(&[
            pick(0, center.x, half_extents.x),
            pick(1, center.y, half_extents.y),
            pick(2, center.z, half_extents.z),
        ]);
    }
    let quads: [[u32; 4]; 6] = [
        [0, 4, 6, 2], // -x
        [1, 3, 7, 5], // +x
        [0, 1, 5, 4], // -y
        [2, 6, 7, 3], // +y
        [0, 2, 3, 1], // -z
        [4, 5, 7, 6], // +z
    ];
    let indices = quads
        .iter()
        .flat_map(|&[a, b, c, d]| [a, b, c, a, c, d])
        .collect();
    Ok(TriMesh::new(positions, indices)?.with_name("cuboid"))
}

/// Cube with edge length `size` centred on the origin.
pub fn cube(size: f32) -> GeometryResult<TriMesh> {
    let h = size * 0.5;
    Ok(cuboid(Vector3::new(0.0, 0.0, 0.0), Vector3::new(h, h, h))?.with_name("cube"))
}

/// Tetrahedron spanned by four points, with every face wound away from the
/// opposite corner.
pub fn tetrahedron(points: [Vector3<f32>; 4]) -> GeometryResult<TriMesh> {
    let faces: [([u32; 3], usize); 4] = [
        ([0, 1, 2], 3),
        ([0, 1, 3], 2),
        ([0, 2, 3], 1),
        ([1, 2, 3], 0),
    ];
    let mut indices = Vec::with_capacity(12);
    for ([a, b, c], opposite) in faces {
        let [pa, pb, pc] = [a, b, c].map(|i| points[i as usize]);
        let normal = (pb - pa).cross(pc - pa);
        if normal.dot(points[opposite] - pa) > 0.0 {
            indices.extend_from_slice(&[a, c, b]);
        } else {
            indices.extend_from_slice(&[a, b, c]);
        }
    }
    let positions = points.iter().flat_map(|p| [p.x, p.y, p.z]).collect();
    Ok(TriMesh::new(positions, indices)?.with_name("tetrahedron"))
}

/// Latitude/longitude sphere centred on the origin.
///
/// Both poles are single vertices and the seam is closed, so the result is a
/// closed 2-manifold. `sectors` is clamped to at least 3 and `stacks` to at least 2.
pub fn uv_sphere(radius: f32, sectors: u32, stacks: u32) -> GeometryResult<TriMesh> {
    let sectors = sectors.max(3);
    let stacks = stacks.max(2);
    let rings = stacks - 1;

    let mut positions = Vec::with_capacity(((rings * sectors + 2) * 3) as usize);
    positions.extend_from_slice(&[0.0, 0.0, radius]);
    for i in 1..stacks {
        let phi = PI / 2.0 - i as f32 * PI / stacks as f32;
        let (z, xy) = (radius * phi.sin(), radius * phi.cos());
        for j in 0..sectors {
            let theta = j as f32 * 2.0 * PI / sectors as f32;
            positions.extend_from_slice(&[xy * theta.cos(), xy * theta.sin(), z]);
        }
    }
    positions.extend_from_slice(&[0.0, 0.0, -radius]);

    let top = 0;
    let bottom = rings * sectors + 1;
    let ring = |i: u32, j: u32| 1 + (i - 1) * sectors + j % sectors;

    let mut indices = Vec::with_capacity((sectors * (rings * 2) * 3) as usize);
    for j in 0..sectors {
        indices.extend_from_slice(&[top, ring(1, j), ring(1, j + 1)]);
    }
    for i in 1..rings {
        for j in 0..sectors {
            let (a, b, c, d) = (ring(i, j), ring(i + 1, j), ring(i + 1, j + 1), ring(i, j + 1));
            indices.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }
    for j in 0..sectors {
        indices.extend_from_slice(&[ring(rings, j), bottom, ring(rings, j + 1)]);
    }
    Ok(TriMesh::new(positions, indices)?.with_name("uv_sphere"))
}

/// Square in the xz-plane facing +y. This is an open mesh.
pub fn plane(size: f32) -> GeometryResult<TriMesh> {
    let h = size * 0.5;
    let positions = vec![
        -h, 0.0, -h, //
        -h, 0.0, h, //
        h, 0.0, h, //
        h, 0.0, -h,
    ];
    Ok(TriMesh::new(positions, vec![0, 1, 2, 0, 2, 3])?.with_name("plane"))
}
