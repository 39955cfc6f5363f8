use approx::{assert_abs_diff_eq, assert_relative_eq};
use flow_solid::{
    GeometryError, MassProperties, TriMesh, compute_mass_properties,
    compute_mass_properties_by_integration,
    cgmath::Vector3,
    data_structures::{
        face::build_faces,
        primitives::{cube, cuboid, plane, tetrahedron, uv_sphere},
    },
};

use crate::common::test_utils::{
    TONON_CORNERS, init_logger, l_prism, tonon_inertia, unit_tetrahedron, unwelded,
};
mod common;

fn method_a(mesh: &TriMesh, density: f64) -> MassProperties {
    compute_mass_properties(mesh.positions(), mesh.indices(), density).unwrap()
}

fn method_b(mesh: &TriMesh, density: f64) -> MassProperties {
    let faces = build_faces(mesh.positions(), mesh.indices()).unwrap();
    compute_mass_properties_by_integration(&faces, density).unwrap()
}

fn assert_inertia(props: &MassProperties, expected: [[f64; 3]; 3], epsilon: f64) {
    for row in 0..3 {
        for col in 0..3 {
            assert_abs_diff_eq!(
                props.inertia_entry(row, col),
                expected[row][col],
                epsilon = epsilon
            );
        }
    }
}

#[test]
fn unit_tetrahedron_matches_closed_form() {
    init_logger();
    let mesh = unit_tetrahedron();
    let expected = [
        [1.0 / 80.0, 1.0 / 480.0, 1.0 / 480.0],
        [1.0 / 480.0, 1.0 / 80.0, 1.0 / 480.0],
        [1.0 / 480.0, 1.0 / 480.0, 1.0 / 80.0],
    ];

    for props in [method_a(&mesh, 1.0), method_b(&mesh, 1.0)] {
        assert_abs_diff_eq!(props.mass, 1.0 / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(props.centroid.x, 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(props.centroid.y, 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(props.centroid.z, 0.25, epsilon = 1e-12);
        assert_inertia(&props, expected, 1e-12);
    }
}

#[test]
fn cube_about_its_centre() {
    init_logger();
    let mesh = cube(2.0).unwrap();
    let i = 16.0 / 3.0;
    let expected = [[i, 0.0, 0.0], [0.0, i, 0.0], [0.0, 0.0, i]];

    for props in [method_a(&mesh, 1.0), method_b(&mesh, 1.0)] {
        assert_abs_diff_eq!(props.mass, 8.0, epsilon = 1e-12);
        assert_abs_diff_eq!(props.centroid.x, 0.0, epsilon = 1e-12);
        assert_inertia(&props, expected, 1e-12);
    }

    let dense = method_a(&mesh, 2.5);
    assert_abs_diff_eq!(dense.mass, 20.0, epsilon = 1e-12);
    assert_abs_diff_eq!(dense.inertia_entry(1, 1), 2.5 * i, epsilon = 1e-12);
}

#[test]
fn non_convex_prism_matches_stacked_cubes() {
    init_logger();
    // three unit cubes and the parallel axis theorem
    let expected = [
        [7.0 / 6.0, 1.0 / 3.0, 0.0],
        [1.0 / 3.0, 7.0 / 6.0, 0.0],
        [0.0, 0.0, 11.0 / 6.0],
    ];
    let mut mesh = l_prism(1.0);
    mesh.translate(Vector3::new(-3.0, 2.0, -1.0));

    for props in [method_a(&mesh, 1.0), method_b(&mesh, 1.0)] {
        assert_abs_diff_eq!(props.mass, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(props.centroid.x, 2.5 / 3.0 - 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(props.centroid.y, 2.5 / 3.0 + 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(props.centroid.z, 0.5 - 1.0, epsilon = 1e-12);
        assert_inertia(&props, expected, 1e-10);
    }
}

#[test]
fn methods_agree_on_closed_meshes() {
    init_logger();
    let mut shifted = uv_sphere(0.75, 20, 10).unwrap();
    shifted.translate(Vector3::new(4.0, -1.5, 2.25));

    let meshes = [
        unit_tetrahedron(),
        cube(1.0).unwrap(),
        unwelded(&cube(3.0).unwrap()),
        cuboid(Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.5, 1.5, 0.25)).unwrap(),
        uv_sphere(1.0, 32, 16).unwrap(),
        l_prism(2.5),
        shifted,
    ];
    for mesh in &meshes {
        let a = method_a(mesh, 1.3);
        let b = method_b(mesh, 1.3);
        assert_relative_eq!(a, b, epsilon = 1e-9, max_relative = 1e-9);
    }
}

#[test]
fn sphere_mass_approaches_the_analytic_value() {
    init_logger();
    let mesh = uv_sphere(1.0, 64, 32).unwrap();
    let props = method_a(&mesh, 2.0);

    let analytic = 2.0 * 4.0 / 3.0 * std::f64::consts::PI;
    assert_relative_eq!(props.mass, 8.37758041, max_relative = 0.01);
    assert_relative_eq!(analytic, 8.37758041, max_relative = 1e-8);
    assert!(props.mass < analytic);

    // solid sphere: I = 2/5 m r^2 on every axis
    for axis in 0..3 {
        assert_relative_eq!(
            props.inertia_entry(axis, axis),
            0.4 * props.mass,
            max_relative = 0.02
        );
    }
    // positions come from f32 trigonometry, so products of inertia are only
    // zero relative to the moments
    let tolerance = 1e-6 * props.inertia_entry(0, 0);
    for (row, col) in [(0, 1), (0, 2), (1, 2)] {
        assert_abs_diff_eq!(props.inertia_entry(row, col), 0.0, epsilon = tolerance);
    }
}

#[test]
fn single_tetrahedron_matches_tonon() {
    init_logger();
    let mesh = tetrahedron(TONON_CORNERS.map(Vector3::from)).unwrap();
    let (mass, expected) = tonon_inertia(TONON_CORNERS.map(|c| c.map(f64::from)), 1.0);

    for props in [method_a(&mesh, 1.0), method_b(&mesh, 1.0)] {
        assert_relative_eq!(props.mass, mass, max_relative = 1e-9);
        for row in 0..3 {
            for col in 0..3 {
                assert_relative_eq!(
                    props.inertia_entry(row, col),
                    expected[row][col],
                    epsilon = 1e-6,
                    max_relative = 1e-8
                );
            }
        }
    }
}

#[test]
fn scaling_follows_volume_and_moment_laws() {
    init_logger();
    let mesh = l_prism(1.0);
    let mut scaled = mesh.clone();
    scaled.scale(3.0);

    for (base, big) in [
        (method_a(&mesh, 1.0), method_a(&scaled, 1.0)),
        (method_b(&mesh, 1.0), method_b(&scaled, 1.0)),
    ] {
        assert_relative_eq!(big.mass, 27.0 * base.mass, max_relative = 1e-10);
        assert_relative_eq!(big.centroid.x, 3.0 * base.centroid.x, max_relative = 1e-10);
        assert_relative_eq!(big.centroid.z, 3.0 * base.centroid.z, max_relative = 1e-10);
        for row in 0..3 {
            for col in 0..3 {
                assert_relative_eq!(
                    big.inertia_entry(row, col),
                    243.0 * base.inertia_entry(row, col),
                    epsilon = 1e-9,
                    max_relative = 1e-10
                );
            }
        }
    }
}

#[test]
fn translation_moves_only_the_centroid() {
    init_logger();
    let mesh = l_prism(1.5);
    let offset = Vector3::new(10.0, -4.0, 7.0);
    let mut moved = mesh.clone();
    moved.translate(offset);

    for (here, there) in [
        (method_a(&mesh, 1.0), method_a(&moved, 1.0)),
        (method_b(&mesh, 1.0), method_b(&moved, 1.0)),
    ] {
        assert_relative_eq!(there.mass, here.mass, max_relative = 1e-10);
        assert_abs_diff_eq!(there.centroid.x, here.centroid.x + 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(there.centroid.y, here.centroid.y - 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(there.centroid.z, here.centroid.z + 7.0, epsilon = 1e-9);
        for row in 0..3 {
            for col in 0..3 {
                assert_abs_diff_eq!(
                    there.inertia_entry(row, col),
                    here.inertia_entry(row, col),
                    epsilon = 1e-8
                );
            }
        }
    }
}

#[test]
fn inverted_mesh_gives_negated_result() {
    init_logger();
    let mesh = cube(2.0).unwrap();
    let mut inverted = mesh.clone();
    inverted.invert_winding();

    for (out, inside_out) in [
        (method_a(&mesh, 1.0), method_a(&inverted, 1.0)),
        (method_b(&mesh, 1.0), method_b(&inverted, 1.0)),
    ] {
        assert_relative_eq!(inside_out, out.negated(), epsilon = 1e-12);
        assert!(inside_out.orientation_warning().is_some());
        assert!(out.orientation_warning().is_none());
    }
}

#[test]
fn degenerate_input_is_rejected() {
    init_logger();
    assert_eq!(
        compute_mass_properties(&[], &[], 1.0),
        Err(GeometryError::EmptyMesh)
    );
    assert_eq!(
        compute_mass_properties_by_integration(&[], 1.0),
        Err(GeometryError::EmptyMesh)
    );

    // a single open quad encloses nothing
    let flat = plane(2.0).unwrap();
    assert!(matches!(
        compute_mass_properties(flat.positions(), flat.indices(), 1.0),
        Err(GeometryError::DegenerateVolume { .. })
    ));
    let faces = build_faces(flat.positions(), flat.indices()).unwrap();
    assert!(matches!(
        compute_mass_properties_by_integration(&faces, 1.0),
        Err(GeometryError::DegenerateVolume { .. })
    ));

    // zero-area triangles only
    let collapsed = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0];
    assert!(matches!(
        compute_mass_properties(&collapsed, &[0, 1, 2, 0, 2, 1], 1.0),
        Err(GeometryError::DegenerateVolume { .. })
    ));
    let faces = build_faces(&collapsed, &[0, 1, 2, 0, 2, 1]).unwrap();
    assert!(matches!(
        compute_mass_properties_by_integration(&faces, 1.0),
        Err(GeometryError::DegenerateVolume { .. })
    ));
}

#[test]
fn density_must_be_positive() {
    let mesh = cube(1.0).unwrap();
    for density in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            compute_mass_properties(mesh.positions(), mesh.indices(), density),
            Err(GeometryError::NonPositiveDensity { .. })
        ));
    }
}

#[test]
fn malformed_buffers_are_rejected() {
    assert_eq!(
        compute_mass_properties(&[0.0; 9], &[0, 1, 7], 1.0),
        Err(GeometryError::IndexOutOfRange {
            index: 7,
            vertex_count: 3
        })
    );
    assert_eq!(
        compute_mass_properties(&[0.0; 9], &[0, 1, 2, 0], 1.0),
        Err(GeometryError::MalformedIndices { len: 4 })
    );
}

#[test]
fn partial_sums_merge_in_any_order() {
    use flow_solid::{cgmath::Vector3 as V, physics::tetrahedra::TetrahedronSums};

    let mesh = l_prism(1.0);
    let corners: Vec<[V<f64>; 3]> = (0..mesh.triangle_count())
        .map(|t| mesh.face_positions(t).map(|p| V::new(p.x as f64, p.y as f64, p.z as f64)))
        .collect();
    let (front, back) = corners.split_at(7);
    let sum = |part: &[[V<f64>; 3]]| {
        part.iter().fold(TetrahedronSums::default(), |mut acc, [a, b, c]| {
            acc.add_triangle(*a, *b, *c);
            acc
        })
    };

    let whole = sum(&corners);
    let merged = sum(back).merge(sum(front));
    assert_abs_diff_eq!(whole.volume_sum(), 18.0, epsilon = 1e-12);
    assert_abs_diff_eq!(merged.volume_sum(), whole.volume_sum(), epsilon = 1e-12);
    assert_relative_eq!(
        merged.finish(1.0).unwrap(),
        method_a(&mesh, 1.0),
        epsilon = 1e-12
    );
}

#[test]
fn face_integrals_report_signed_volume() {
    use flow_solid::physics::face_integrals::VolumeIntegrals;

    let mut mesh = cube(2.0).unwrap();
    let mut integrals = VolumeIntegrals::default();
    for face in build_faces(mesh.positions(), mesh.indices()).unwrap() {
        integrals.add_face(&face);
    }
    assert_abs_diff_eq!(integrals.volume(), 8.0, epsilon = 1e-12);

    mesh.invert_winding();
    let mut inverted = VolumeIntegrals::default();
    for face in build_faces(mesh.positions(), mesh.indices()).unwrap() {
        inverted.add_face(&face);
    }
    assert_abs_diff_eq!(inverted.volume(), -8.0, epsilon = 1e-12);
}
