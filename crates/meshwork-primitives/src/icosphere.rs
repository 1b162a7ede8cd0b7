//! Icosphere construction by recursive icosahedron refinement.

use std::collections::HashMap;

use meshwork_geom::{Face, MeshGeometry, Vector3};
use nalgebra::Vector3 as V3;

use crate::error::Result;

/// Icosahedron corners before normalization, from the three orthogonal
/// golden rectangles `(±1, ±φ, 0)`, `(0, ±1, ±φ)`, `(±φ, 0, ±1)`.
fn base_vertices() -> [V3<f64>; 12] {
    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    [
        V3::new(-1.0, t, 0.0),
        V3::new(1.0, t, 0.0),
        V3::new(-1.0, -t, 0.0),
        V3::new(1.0, -t, 0.0),
        V3::new(0.0, -1.0, t),
        V3::new(0.0, 1.0, t),
        V3::new(0.0, -1.0, -t),
        V3::new(0.0, 1.0, -t),
        V3::new(t, 0.0, -1.0),
        V3::new(t, 0.0, 1.0),
        V3::new(-t, 0.0, -1.0),
        V3::new(-t, 0.0, 1.0),
    ]
}

/// Icosahedron faces, CCW seen from outside.
const BASE_FACES: [[u32; 3]; 20] = [
    // 5 faces around vertex 0
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    // 5 adjacent faces
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    // 5 faces around vertex 3
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    // 5 adjacent faces
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Build an icosphere of `radius` refined `subdivisions` times.
///
/// Each pass replaces every triangle `(a, b, c)` with
/// `(a, ab, ca) (b, bc, ab) (c, ca, bc) (ab, bc, ca)`, where midpoints are
/// shared between the two triangles on an edge and pushed out to the sphere.
/// Yields `20 * 4^n` faces and `10 * 4^n + 2` vertices.
///
/// Refinement runs on the unit sphere; `radius` is applied once at the end
/// so any finite radius stays finite.
pub(crate) fn build(radius: f64, subdivisions: u32) -> Result<MeshGeometry> {
    let mut vertices: Vec<V3<f64>> = base_vertices().iter().map(|v| v.normalize()).collect();
    let mut triangles: Vec<[u32; 3]> = BASE_FACES.to_vec();

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::with_capacity(triangles.len() * 3 / 2);
        let mut refined = Vec::with_capacity(triangles.len() * 4);

        for &[a, b, c] in &triangles {
            let ab = midpoint(&mut vertices, &mut midpoints, a, b);
            let bc = midpoint(&mut vertices, &mut midpoints, b, c);
            let ca = midpoint(&mut vertices, &mut midpoints, c, a);

            refined.push([a, ab, ca]);
            refined.push([b, bc, ab]);
            refined.push([c, ca, bc]);
            refined.push([ab, bc, ca]);
        }

        triangles = refined;
    }

    let faces = triangles
        .into_iter()
        .map(|[a, b, c]| Face::triangle(a, b, c))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let vertices = vertices
        .into_iter()
        .map(|v| Vector3::from_na(v * radius))
        .collect();

    Ok(MeshGeometry::new(vertices, faces)?)
}

/// Index of the unit-length midpoint of edge `(a, b)`, creating it on first use.
fn midpoint(
    vertices: &mut Vec<V3<f64>>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    *cache.entry(key).or_insert_with(|| {
        let mid = (vertices[a as usize] + vertices[b as usize]) / 2.0;
        vertices.push(mid.normalize());
        (vertices.len() - 1) as u32
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_base_icosahedron() {
        let mesh = build(1.0, 0).unwrap();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 20);
    }

    #[test]
    fn test_counts_per_level() {
        for n in 0..=4u32 {
            let mesh = build(2.5, n).unwrap();
            assert_eq!(mesh.face_count(), 20 * 4usize.pow(n));
            assert_eq!(mesh.vertex_count(), 10 * 4usize.pow(n) + 2);
        }
    }

    #[test]
    fn test_vertices_on_sphere() {
        let mesh = build(3.0, 3).unwrap();
        for v in mesh.vertices() {
            assert_abs_diff_eq!(v.length(), 3.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_edges_shared_once() {
        // A closed triangle mesh has E = 3F/2 and V - E + F = 2
        let mesh = build(1.0, 2).unwrap();
        let mut edges = std::collections::HashSet::new();
        for f in mesh.faces() {
            let i = f.indices();
            for k in 0..3 {
                let (a, b) = (i[k], i[(k + 1) % 3]);
                edges.insert((a.min(b), a.max(b)));
            }
        }
        assert_eq!(edges.len() * 2, mesh.face_count() * 3);
        assert_eq!(
            mesh.vertex_count() as i64 - edges.len() as i64 + mesh.face_count() as i64,
            2
        );
    }

    #[test]
    fn test_huge_radius_stays_on_sphere() {
        for radius in [1e200, 1.7e308] {
            let mesh = build(radius, 2).unwrap();
            for v in mesh.vertices() {
                assert!(v.to_array().iter().all(|c| c.is_finite()), "{v:?}");
                let unit = Vector3::new(v.x / radius, v.y / radius, v.z / radius);
                assert_abs_diff_eq!(unit.length(), 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(build(1.0, 3).unwrap(), build(1.0, 3).unwrap());
    }
}
