//! Flat triangle mesh storage.
//!
//! [`TriMesh`] owns the three arrays the rest of the crate works on: positions
//! (3 floats per vertex), triangle indices (3 per face) and per-vertex normals
//! (3 floats per vertex). The layout matches what an OBJ loader or a GPU vertex
//! buffer expects, so the same data can be repaired, measured and drawn.

use cgmath::Vector3;

use crate::{
    data_structures::face::Face,
    error::{GeometryError, GeometryResult},
};

/// A triangle mesh stored as flat position, index and normal arrays.
///
/// Positions are never moved by the repair and physics passes. Indices and
/// normals are rewritten by winding correction (see [`crate::winding`]).
/// Normals start out zeroed until a correction pass fills them in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriMesh {
    pub name: String,
    positions: Vec<f32>,
    indices: Vec<u32>,
    normals: Vec<f32>,
}

impl TriMesh {
    /// Create a mesh from flat arrays, checking that every index is in range.
    pub fn new(positions: Vec<f32>, indices: Vec<u32>) -> GeometryResult<Self> {
        validate_buffers(&positions, &indices)?;
        let normals = vec![0.0; positions.len()];
        Ok(Self {
            name: String::new(),
            positions,
            indices,
            normals,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of vertex `i`. Panics if `i` is out of range.
    pub fn position(&self, i: u32) -> Vector3<f32> {
        read_vec3(&self.positions, i)
    }

    /// Normal of vertex `i`. Panics if `i` is out of range.
    pub fn normal(&self, i: u32) -> Vector3<f32> {
        read_vec3(&self.normals, i)
    }

    /// Vertex indices of triangle `t`. Panics if `t` is out of range.
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        [
            self.indices[t * 3],
            self.indices[t * 3 + 1],
            self.indices[t * 3 + 2],
        ]
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// The three corner positions of triangle `t`.
    pub fn face_positions(&self, t: usize) -> [Vector3<f32>; 3] {
        self.triangle(t).map(|i| self.position(i))
    }

    /// Write face indices and face normals back into the flat arrays.
    ///
    /// `faces[t]` must describe triangle `t`. Every face writes its normal to
    /// all three of its vertices, so a vertex shared by several faces keeps the
    /// normal of the last face written: the result is faceted, not averaged.
    /// Nothing is written unless every face fits this mesh.
    pub fn apply_faces(&mut self, faces: &[Face]) -> GeometryResult<()> {
        if faces.len() != self.triangle_count() {
            return Err(GeometryError::FaceCountMismatch {
                faces: faces.len(),
                triangles: self.triangle_count(),
            });
        }
        let vertex_count = self.vertex_count();
        if let Some(&index) = faces
            .iter()
            .flat_map(|f| f.indices.iter())
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(GeometryError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        for (chunk, face) in self.indices.chunks_exact_mut(3).zip(faces) {
            chunk.copy_from_slice(&face.indices);
        }
        for face in faces {
            for &i in &face.indices {
                let i = i as usize * 3;
                self.normals[i..i + 3].copy_from_slice(&[face.normal.x, face.normal.y, face.normal.z]);
            }
        }
        Ok(())
    }

    /// Reverse the winding of every triangle and negate the vertex normals.
    pub fn invert_winding(&mut self) {
        for chunk in self.indices.chunks_exact_mut(3) {
            chunk.swap(1, 2);
        }
        self.normals.iter_mut().for_each(|n| *n = -*n);
    }

    pub fn translate(&mut self, offset: Vector3<f32>) {
        for p in self.positions.chunks_exact_mut(3) {
            p[0] += offset.x;
            p[1] += offset.y;
            p[2] += offset.z;
        }
    }

    /// Uniformly scale all positions about the origin.
    pub fn scale(&mut self, factor: f32) {
        self.positions.iter_mut().for_each(|p| *p *= factor);
    }

    /// Axis aligned bounding box as `(min, max)`, `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<(Vector3<f32>, Vector3<f32>)> {
        let mut points = self
            .positions
            .chunks_exact(3)
            .map(|p| Vector3::new(p[0], p[1], p[2]));
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| {
            (
                Vector3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Vector3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        }))
    }

    /// Centre of the bounding box.
    pub fn bounds_center(&self) -> Option<Vector3<f32>> {
        self.bounds().map(|(min, max)| (min + max) * 0.5)
    }
}

/// Check that flat position and index buffers describe whole points and triangles
/// and that every index refers to an existing vertex.
pub fn validate_buffers(positions: &[f32], indices: &[u32]) -> GeometryResult<()> {
    if positions.len() % 3 != 0 {
        return Err(GeometryError::MalformedPositions {
            len: positions.len(),
        });
    }
    if indices.len() % 3 != 0 {
        return Err(GeometryError::MalformedIndices { len: indices.len() });
    }
    let vertex_count = positions.len() / 3;
    if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(GeometryError::IndexOutOfRange {
            index,
            vertex_count,
        });
    }
    Ok(())
}

pub(crate) fn read_vec3(buffer: &[f32], i: u32) -> Vector3<f32> {
    let i = i as usize * 3;
    Vector3::new(buffer[i], buffer[i + 1], buffer[i + 2])
}

pub(crate) fn widen(v: Vector3<f32>) -> Vector3<f64> {
    Vector3::new(v.x as f64, v.y as f64, v.z as f64)
}
