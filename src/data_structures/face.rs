//! Faces and the face adjacency graph.
//!
//! A [`FaceGraph`] is an arena: every [`Face`] lives by value in one `Vec` and
//! neighbours are stored as indices ([`FaceId`]) into that `Vec`. Two faces are
//! neighbours when exactly two of their corner *positions* coincide, so meshes
//! that duplicate vertices for hard-edge shading still link up.

use cgmath::{InnerSpace, Vector3};

use crate::{
    data_structures::mesh::{TriMesh, read_vec3, validate_buffers},
    error::GeometryResult,
};

/// Index of a face inside its [`FaceGraph`].
pub type FaceId = usize;

/// One triangle with cached geometry and up to three edge neighbours.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    /// Corner positions, copied from the mesh for fast access.
    pub vertices: [Vector3<f32>; 3],
    /// Corner indices into the mesh position array.
    pub indices: [u32; 3],
    /// Unit normal following the right-hand rule over `vertices`.
    /// NaN for zero-area triangles.
    pub normal: Vector3<f32>,
    /// Plane offset `d` with `normal · x + d = 0` on the face plane.
    pub offset: f32,
    neighbors: [Option<FaceId>; 3],
}

impl Face {
    pub fn new(vertices: [Vector3<f32>; 3], indices: [u32; 3]) -> Self {
        let (normal, offset) = plane(&vertices);
        Self {
            vertices,
            indices,
            normal,
            offset,
            neighbors: [None; 3],
        }
    }

    pub fn neighbors(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.neighbors.iter().flatten().copied()
    }

    pub fn neighbor_count(&self) -> usize {
        self.neighbors.iter().flatten().count()
    }

    /// A triangle has three edges, so three neighbours is the maximum.
    pub fn is_saturated(&self) -> bool {
        self.neighbors.iter().all(Option::is_some)
    }

    pub fn centroid(&self) -> Vector3<f32> {
        (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
    }

    pub fn area(&self) -> f32 {
        (self.vertices[1] - self.vertices[0])
            .cross(self.vertices[2] - self.vertices[0])
            .magnitude()
            * 0.5
    }

    /// For every corner of `self`, the corner of `other` at the same position.
    pub fn match_pattern(&self, other: &Face) -> [Option<usize>; 3] {
        self.vertices
            .map(|v| other.vertices.iter().position(|&w| w == v))
    }

    /// True when exactly two corner positions coincide.
    pub fn shares_edge_with(&self, other: &Face) -> bool {
        self.match_pattern(other).iter().flatten().count() == 2
    }

    /// Reverse the winding by swapping the last two corners, then rebuild the plane.
    pub fn flip(&mut self) {
        self.vertices.swap(1, 2);
        self.indices.swap(1, 2);
        let (normal, offset) = plane(&self.vertices);
        self.normal = normal;
        self.offset = offset;
    }

    fn add_neighbor(&mut self, id: FaceId) {
        if let Some(slot) = self.neighbors.iter_mut().find(|n| n.is_none()) {
            *slot = Some(id);
        }
    }
}

fn plane(vertices: &[Vector3<f32>; 3]) -> (Vector3<f32>, f32) {
    let normal = (vertices[1] - vertices[0])
        .cross(vertices[2] - vertices[1])
        .normalize();
    (normal, -normal.dot(vertices[0]))
}

/// Turn flat triangle data into faces, one per triangle, in index order.
/// The returned faces carry no neighbours yet.
pub fn build_faces(positions: &[f32], indices: &[u32]) -> GeometryResult<Vec<Face>> {
    validate_buffers(positions, indices)?;
    Ok(indices
        .chunks_exact(3)
        .map(|c| {
            let corners = [c[0], c[1], c[2]];
            Face::new(corners.map(|i| read_vec3(positions, i)), corners)
        })
        .collect())
}

/// All faces of a mesh together with their edge adjacency.
#[derive(Clone, Debug, Default)]
pub struct FaceGraph {
    faces: Vec<Face>,
}

impl FaceGraph {
    /// Build faces for every triangle of `mesh` and discover their neighbours.
    pub fn build(mesh: &TriMesh) -> GeometryResult<Self> {
        let faces = build_faces(mesh.positions(), mesh.indices())?;
        Ok(Self::from_faces(faces))
    }

    /// Link a list of faces into a graph.
    ///
    /// This compares every pair of faces (quadratic in the face count), which
    /// is fine for the small meshes of a sandbox scene but not for scans.
    pub fn from_faces(mut faces: Vec<Face>) -> Self {
        let mut links = 0;
        for i in 0..faces.len() {
            if faces[i].is_saturated() {
                continue;
            }
            for j in (i + 1)..faces.len() {
                if faces[j].is_saturated() || !faces[i].shares_edge_with(&faces[j]) {
                    continue;
                }
                faces[i].add_neighbor(j);
                faces[j].add_neighbor(i);
                links += 1;
                if faces[i].is_saturated() {
                    break;
                }
            }
        }
        log::debug!("linked {} faces with {} shared edges", faces.len(), links);
        Self { faces }
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub(crate) fn faces_mut(&mut self) -> &mut [Face] {
        &mut self.faces
    }

    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id]
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn into_faces(self) -> Vec<Face> {
        self.faces
    }

    /// Number of faces with fewer than three neighbours.
    ///
    /// Non-zero means the mesh has boundary or non-manifold edges.
    pub fn under_connected(&self) -> usize {
        self.faces.iter().filter(|f| !f.is_saturated()).count()
    }

    /// A closed 2-manifold triangle mesh gives every face three neighbours.
    pub fn is_closed(&self) -> bool {
        !self.faces.is_empty() && self.under_connected() == 0
    }
}
