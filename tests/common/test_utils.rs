use flow_solid::{
    TriMesh,
    cgmath::Vector3,
    data_structures::primitives::{cuboid, tetrahedron},
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Tetrahedron on the origin and the three unit axis points.
pub fn unit_tetrahedron() -> TriMesh {
    tetrahedron([
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
    ])
    .unwrap()
}

/// The same triangles with three fresh vertices each, as exporters emit for
/// hard edges. Positions still coincide, so adjacency must be found by position.
pub fn unwelded(mesh: &TriMesh) -> TriMesh {
    let positions = mesh
        .triangles()
        .flat_map(|t| t.map(|i| mesh.position(i)))
        .flat_map(|p| [p.x, p.y, p.z])
        .collect();
    let indices = (0..mesh.indices().len() as u32).collect();
    TriMesh::new(positions, indices).unwrap().with_name("unwelded")
}

/// Copy of `mesh` with the corner order of triangle `t` reversed.
pub fn flip_triangle(mesh: &TriMesh, t: usize) -> TriMesh {
    let mut indices = mesh.indices().to_vec();
    indices.swap(t * 3 + 1, t * 3 + 2);
    TriMesh::new(mesh.positions().to_vec(), indices).unwrap()
}

/// Both meshes in one, without any shared vertex.
pub fn merged(a: &TriMesh, b: &TriMesh) -> TriMesh {
    let offset = a.vertex_count() as u32;
    let mut positions = a.positions().to_vec();
    positions.extend_from_slice(b.positions());
    let mut indices = a.indices().to_vec();
    indices.extend(b.indices().iter().map(|i| i + offset));
    TriMesh::new(positions, indices).unwrap()
}

/// Two unit cubes far apart.
pub fn two_cubes() -> TriMesh {
    let half = Vector3::new(0.5, 0.5, 0.5);
    merged(
        &cuboid(Vector3::new(0.0, 0.0, 0.0), half).unwrap(),
        &cuboid(Vector3::new(5.0, 0.0, 0.0), half).unwrap(),
    )
}

/// Prism over an L-shaped footprint made of three unit squares, extruded
/// from z = 0 to z = `height`. Not convex and not star-shaped about the origin.
pub fn l_prism(height: f32) -> TriMesh {
    let outline: [(f32, f32); 6] = [
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 1.0),
        (1.0, 1.0),
        (1.0, 2.0),
        (0.0, 2.0),
    ];
    let mut positions = Vec::with_capacity(12 * 3);
    for z in [0.0, height] {
        for (x, y) in outline {
            positions.extend_from_slice(&[x, y, z]);
        }
    }

    // caps fanned from the reflex corner
    let fan: [[u32; 3]; 4] = [[3, 4, 5], [3, 5, 0], [3, 0, 1], [3, 1, 2]];
    let mut indices = Vec::new();
    for [a, b, c] in fan {
        indices.extend_from_slice(&[a + 6, b + 6, c + 6]);
        indices.extend_from_slice(&[a, c, b]);
    }
    for i in 0..6 {
        let j = (i + 1) % 6;
        let (bi, bj, ti, tj) = (i, j, i + 6, j + 6);
        indices.extend_from_slice(&[bi, bj, tj, bi, tj, ti]);
    }
    TriMesh::new(positions, indices).unwrap().with_name("l_prism")
}

/// Corners of the worked example in Tonon (2005), "Explicit Exact Formulas
/// for the 3-D Tetrahedron Inertia Tensor in Terms of its Vertex Coordinates".
pub const TONON_CORNERS: [[f32; 3]; 4] = [
    [8.33220, -11.86875, 0.93355],
    [0.75523, 5.00000, 16.37072],
    [52.61236, 5.00000, -5.38580],
    [2.00000, 5.00000, 3.00000],
];

/// Mass and inertia tensor (row major, about the centroid) of a single
/// tetrahedron from Tonon's closed form.
pub fn tonon_inertia(corners: [[f64; 3]; 4], density: f64) -> (f64, [[f64; 3]; 3]) {
    let mut centroid = [0.0; 3];
    for c in &corners {
        for k in 0..3 {
            centroid[k] += c[k] / 4.0;
        }
    }
    let column = |k: usize| corners.map(|c| c[k] - centroid[k]);
    let (x, y, z) = (column(0), column(1), column(2));

    let e = |k: usize| [0usize, 1, 2].map(|i| corners[k][i] - corners[0][i]);
    let (e1, e2, e3) = (e(1), e(2), e(3));
    let det = e1[0] * (e2[1] * e3[2] - e2[2] * e3[1]) - e1[1] * (e2[0] * e3[2] - e2[2] * e3[0])
        + e1[2] * (e2[0] * e3[1] - e2[1] * e3[0]);
    let mu_det = density * det.abs();

    let poly = |v: [f64; 4]| {
        let mut sum = 0.0;
        for i in 0..4 {
            for j in i..4 {
                sum += v[i] * v[j];
            }
        }
        sum
    };
    let poly_prime = |v: [f64; 4], w: [f64; 4]| {
        let mut sum = 0.0;
        for i in 0..4 {
            for j in 0..4 {
                let weight = if i == j { 2.0 } else { 1.0 };
                sum += weight * v[i] * w[j];
            }
        }
        sum
    };

    let a = mu_det * (poly(y) + poly(z)) / 60.0;
    let b = mu_det * (poly(x) + poly(z)) / 60.0;
    let c = mu_det * (poly(x) + poly(y)) / 60.0;
    let a_prime = mu_det * poly_prime(y, z) / 120.0;
    let b_prime = mu_det * poly_prime(x, z) / 120.0;
    let c_prime = mu_det * poly_prime(x, y) / 120.0;

    (
        mu_det / 6.0,
        [
            [a, -c_prime, -b_prime],
            [-c_prime, b, -a_prime],
            [-b_prime, -a_prime, c],
        ],
    )
}
