//! Water mesh: static grid triangulation plus a per-frame vertex snapshot.

use bytemuck::{Pod, Zeroable};

use super::grid::WaveGrid;

/// Vertex data for the water mesh (position + normal + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct WaveVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Renderer-facing copy of a [`WaveGrid`]
///
/// Indices are built once from the grid topology; only vertex heights,
/// normals and UVs are refreshed each frame.
pub struct WaveMesh {
    pub vertices: Vec<WaveVertex>,
    pub indices: Vec<u32>,
}

impl WaveMesh {
    /// Triangulate the grid and take an initial snapshot
    pub fn new(grid: &WaveGrid) -> Self {
        let rows = grid.row_count();
        let cols = grid.column_count();

        let mut indices = Vec::with_capacity(grid.triangle_count() * 3);

        // Two triangles per quad, counter-clockwise when viewed from above
        for i in 0..rows - 1 {
            for j in 0..cols - 1 {
                let top_left = (i * cols + j) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((i + 1) * cols + j) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    top_right,
                    bottom_left,
                    bottom_left,
                    top_right,
                    bottom_right,
                ]);
            }
        }

        let mut mesh = Self {
            vertices: vec![WaveVertex::default(); grid.vertex_count()],
            indices,
        };
        mesh.refresh(grid);
        mesh
    }

    /// Copy the grid's current positions and normals into the vertex array
    ///
    /// Texture coordinates map `[-width/2, width/2]` to `[0, 1]` in U and
    /// `[depth/2, -depth/2]` to `[0, 1]` in V.
    pub fn refresh(&mut self, grid: &WaveGrid) {
        debug_assert_eq!(self.vertices.len(), grid.vertex_count());

        let width = grid.width();
        let depth = grid.depth();

        for (vertex, (position, normal)) in self.vertices.iter_mut().zip(grid.samples()) {
            vertex.position = position.to_array();
            vertex.normal = normal.to_array();
            vertex.uv = [0.5 + position.x / width, 0.5 - position.z / depth];
        }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
