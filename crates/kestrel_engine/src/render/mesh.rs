//! Mesh and vertex value types
//!
//! A [`Mesh`] is a move-once value: the loader produces it, the application
//! owns it, and draw calls borrow it for the duration of the submission only.
//! Backends never retain references to it.

use bytemuck::{Pod, Zeroable};

/// A single mesh vertex: position, normal, texture coordinate
///
/// Plain-old-data so backends can upload vertex buffers byte-wise.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Surface normal
    pub normal: [f32; 3],
    /// Texture coordinate
    pub texcoord: [f32; 2],
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from vertex and index buffers
    ///
    /// Every index must reference a vertex in `vertices`; the loader
    /// guarantees this, so violations are programming errors.
    #[must_use]
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        debug_assert!(
            indices.iter().all(|&i| (i as usize) < vertices.len()),
            "mesh index out of bounds"
        );
        Self { vertices, indices }
    }

    /// Vertex buffer
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Index buffer (triangle list)
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles in the mesh
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32, y: f32, z: f32) -> Vertex {
        Vertex {
            position: [x, y, z],
            normal: [0.0, 1.0, 0.0],
            texcoord: [0.0, 0.0],
        }
    }

    #[test]
    fn test_mesh_accessors() {
        let mesh = Mesh::new(
            vec![vertex(0.0, 0.0, 0.0), vertex(1.0, 0.0, 0.0), vertex(0.0, 1.0, 0.0)],
            vec![0, 1, 2],
        );
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.indices(), &[0, 1, 2]);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_vertex_is_pod() {
        let vertices = [vertex(1.0, 2.0, 3.0)];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), std::mem::size_of::<Vertex>());
    }
}
