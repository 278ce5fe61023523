//! Mesh representation for glyph quads
//!
//! Glyph meshes are flat quads. The only thing that differs between two
//! glyph meshes of the same style is their texture coordinates, which select
//! one cell of the font atlas.

use crate::foundation::math::{uv, Mat3};

/// Vertex with position and texture coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in mesh space
    pub position: [f32; 3],
    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self { position, tex_coord }
    }
}

/// Named triangle mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Unique name within the scene
    pub name: String,
    /// Vertex data
    pub vertices: Vec<Vertex>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from raw data
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            vertices,
            indices,
        }
    }

    /// Unit quad whose UVs cover the whole texture
    ///
    /// Counter-clockwise when viewed from +Z.
    pub fn quad(name: impl Into<String>) -> Self {
        let vertices = vec![
            Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0]), // Bottom-left
            Vertex::new([1.0, 0.0, 0.0], [1.0, 0.0]), // Bottom-right
            Vertex::new([1.0, 1.0, 0.0], [1.0, 1.0]), // Top-right
            Vertex::new([0.0, 1.0, 0.0], [0.0, 1.0]), // Top-left
        ];
        Self::new(name, vertices, vec![0, 1, 2, 0, 2, 3])
    }

    /// Apply a UV transform to every vertex
    pub fn transform_uv(&mut self, matrix: &Mat3) {
        for vertex in &mut self.vertices {
            vertex.tex_coord = uv::apply(matrix, vertex.tex_coord);
        }
    }

    /// Component-wise minimum and maximum texture coordinates
    pub fn uv_bounds(&self) -> Option<([f32; 2], [f32; 2])> {
        let first = self.vertices.first()?.tex_coord;
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            (
                [min[0].min(v.tex_coord[0]), min[1].min(v.tex_coord[1])],
                [max[0].max(v.tex_coord[0]), max[1].max(v.tex_coord[1])],
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quad_uv_bounds() {
        let quad = Mesh::quad("q");
        assert_eq!(quad.uv_bounds(), Some(([0.0, 0.0], [1.0, 1.0])));
        assert_eq!(quad.indices.len(), 6);
    }

    #[test]
    fn test_transform_uv_scales_footprint() {
        let mut quad = Mesh::quad("q");
        quad.transform_uv(&uv::scale(0.5, 0.25));
        let (min, max) = quad.uv_bounds().unwrap();
        assert_relative_eq!(min[0], 0.0);
        assert_relative_eq!(max[0], 0.5);
        assert_relative_eq!(max[1], 0.25);
    }

    #[test]
    fn test_empty_mesh_has_no_bounds() {
        let mesh = Mesh::new("empty", Vec::new(), Vec::new());
        assert!(mesh.uv_bounds().is_none());
    }
}
