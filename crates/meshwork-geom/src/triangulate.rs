//! Polygon mesh to triangle mesh conversion for rendering.

use crate::MeshGeometry;

/// Output triangle mesh for rendering and export.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
    /// Flat array of vertex normals: `[nx0, ny0, nz0, ...]` (f32). Same length as vertices.
    pub normals: Vec<f32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Total surface area.
    pub fn surface_area(&self) -> f64 {
        let p = |i: u32| {
            let i = i as usize * 3;
            nalgebra::Vector3::new(
                self.vertices[i] as f64,
                self.vertices[i + 1] as f64,
                self.vertices[i + 2] as f64,
            )
        };
        self.indices
            .chunks_exact(3)
            .map(|t| {
                let (v0, v1, v2) = (p(t[0]), p(t[1]), p(t[2]));
                (v1 - v0).cross(&(v2 - v0)).norm() / 2.0
            })
            .sum()
    }
}

impl MeshGeometry {
    /// Fan-triangulate every face into a render-ready [`TriangleMesh`].
    ///
    /// Vertex positions are shared, not split per face. Normals are the
    /// area-weighted sum of adjacent face normals, normalized; a vertex used
    /// by no face gets a zero normal.
    pub fn triangulate(&self) -> TriangleMesh {
        let mut acc = vec![nalgebra::Vector3::<f64>::zeros(); self.vertex_count()];
        let mut indices = Vec::new();

        for (face_idx, face) in self.faces().iter().enumerate() {
            let idx = face.indices();
            for k in 1..idx.len() - 1 {
                indices.extend_from_slice(&[idx[0], idx[k], idx[k + 1]]);
            }
            if let Some(n) = self.face_normal(face_idx) {
                for &i in idx {
                    acc[i as usize] += n.to_na();
                }
            }
        }

        let vertices = self
            .vertices()
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect();
        let normals = acc
            .into_iter()
            .flat_map(|n| {
                let n = n.try_normalize(1e-15).unwrap_or_else(nalgebra::Vector3::zeros);
                [n.x as f32, n.y as f32, n.z as f32]
            })
            .collect();

        TriangleMesh {
            vertices,
            indices,
            normals,
        }
    }
}
