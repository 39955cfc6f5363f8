use wgpu::util::DeviceExt;

use crate::{data_structures::mesh::TriMesh, error::GeometryResult};

/// Merge the meshes of all OBJ models into one, offsetting each model's
/// indices past the vertices of the models before it.
pub fn flatten_models(models: &[tobj::Model]) -> GeometryResult<TriMesh> {
    let mut positions = Vec::new();
    let mut indices = Vec::new();
    for m in models {
        let offset = (positions.len() / 3) as u32;
        positions.extend_from_slice(&m.mesh.positions);
        indices.extend(m.mesh.indices.iter().map(|i| i + offset));
    }
    TriMesh::new(positions, indices)
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

impl TriMesh {
    /// Interleave positions and normals for a vertex buffer.
    pub fn to_vertices(&self) -> Vec<MeshVertex> {
        self.positions()
            .chunks_exact(3)
            .zip(self.normals().chunks_exact(3))
            .map(|(p, n)| MeshVertex {
                position: [p[0], p[1], p[2]],
                normal: [n[0], n[1], n[2]],
            })
            .collect()
    }
}

/// A mesh uploaded to the GPU.
#[derive(Debug)]
pub struct GpuMesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl GpuMesh {
    /// Upload a mesh. Use the winding-corrected mesh so that back-face culling
    /// and lighting see consistent normals.
    pub fn new(device: &wgpu::Device, mesh: &TriMesh) -> Self {
        let vertices = mesh.to_vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", mesh.name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", mesh.name)),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            name: mesh.name.clone(),
            vertex_buffer,
            index_buffer,
            num_elements: mesh.indices().len() as u32,
        }
    }
}
