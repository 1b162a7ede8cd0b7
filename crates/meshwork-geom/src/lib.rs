#![warn(missing_docs)]

//! Indexed polygon mesh types for meshwork.
//!
//! A [`MeshGeometry`] is an ordered list of vertex positions plus an ordered
//! list of polygonal [`Face`]s that index into it. Meshes are validated when
//! they are built and are read-only afterwards, so any `MeshGeometry` value
//! in hand satisfies:
//!
//! - every vertex coordinate is finite
//! - every face has at least 3 distinct indices
//! - every face index is `< vertex_count()`
//!
//! Coincident vertices are never merged.

mod error;
mod triangulate;

pub use error::{GeometryError, Result};
pub use triangulate::TriangleMesh;

use serde::{Deserialize, Serialize};

/// 3D position with f64 components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vector3 {
    /// Create a new Vector3.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Euclidean distance from the origin.
    pub fn length(&self) -> f64 {
        self.to_na().norm()
    }

    /// Components as an array.
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Convert to an nalgebra vector for arithmetic.
    pub fn to_na(&self) -> nalgebra::Vector3<f64> {
        nalgebra::Vector3::new(self.x, self.y, self.z)
    }

    /// Convert from an nalgebra vector.
    pub fn from_na(v: nalgebra::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// True if all components are within `tol` of `other`'s.
    pub fn approx_eq(&self, other: &Vector3, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol
            && (self.y - other.y).abs() <= tol
            && (self.z - other.z).abs() <= tol
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3 {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self::from_na(v)
    }
}

impl From<Vector3> for nalgebra::Vector3<f64> {
    fn from(v: Vector3) -> Self {
        v.to_na()
    }
}

/// A polygon given as 0-based indices into the owning mesh's vertex list.
///
/// The winding order is significant: counter-clockwise when seen from the
/// side the face points towards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Face(Vec<u32>);

impl Face {
    /// Build a face, rejecting polygons with fewer than 3 distinct indices.
    pub fn new(indices: Vec<u32>) -> Result<Self> {
        let distinct = distinct_count(&indices);
        if distinct < 3 {
            return Err(GeometryError::DegenerateFace { indices, distinct });
        }
        Ok(Self(indices))
    }

    /// Triangle shorthand.
    pub fn triangle(a: u32, b: u32, c: u32) -> Result<Self> {
        Self::new(vec![a, b, c])
    }

    /// Quad shorthand.
    pub fn quad(a: u32, b: u32, c: u32, d: u32) -> Result<Self> {
        Self::new(vec![a, b, c, d])
    }

    /// The vertex indices in winding order.
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Number of corners.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the face has no corners.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<u32>> for Face {
    type Error = GeometryError;

    fn try_from(indices: Vec<u32>) -> Result<Self> {
        Self::new(indices)
    }
}

impl From<Face> for Vec<u32> {
    fn from(face: Face) -> Self {
        face.0
    }
}

fn distinct_count(indices: &[u32]) -> usize {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len()
}

/// Vertex and face counts of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeshStats {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of faces.
    pub faces: usize,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner.
    pub min: Vector3,
    /// Maximum corner.
    pub max: Vector3,
}

impl Bounds {
    /// Extent along each axis.
    pub fn size(&self) -> Vector3 {
        Vector3::new(
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    /// Center point.
    pub fn center(&self) -> Vector3 {
        Vector3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }
}

/// An immutable indexed polygon mesh.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawMesh")]
pub struct MeshGeometry {
    vertices: Vec<Vector3>,
    faces: Vec<Face>,
}

/// Unvalidated wire form used by deserialization.
#[derive(Deserialize)]
struct RawMesh {
    vertices: Vec<Vector3>,
    faces: Vec<Face>,
}

impl TryFrom<RawMesh> for MeshGeometry {
    type Error = GeometryError;

    fn try_from(raw: RawMesh) -> Result<Self> {
        Self::new(raw.vertices, raw.faces)
    }
}

impl MeshGeometry {
    /// Build a mesh, checking coordinates are finite and every face index
    /// lies within the vertex list.
    pub fn new(vertices: Vec<Vector3>, faces: Vec<Face>) -> Result<Self> {
        if let Some(index) = vertices
            .iter()
            .position(|v| !v.to_array().iter().all(|c| c.is_finite()))
        {
            return Err(GeometryError::NonFiniteVertex { index });
        }
        let vertex_count = vertices.len();
        for (face_idx, face) in faces.iter().enumerate() {
            if let Some(&index) = face
                .indices()
                .iter()
                .find(|&&i| i as usize >= vertex_count)
            {
                return Err(GeometryError::IndexOutOfRange {
                    face: face_idx,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// A mesh with no vertices and no faces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Vertex positions in index order.
    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    /// Faces in insertion order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True if the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex and face counts.
    pub fn stats(&self) -> MeshStats {
        MeshStats {
            vertices: self.vertex_count(),
            faces: self.face_count(),
        }
    }

    /// Bounding box of all vertices, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = *self.vertices.first()?;
        let (min, max) = self
            .vertices
            .iter()
            .fold((first, first), |(lo, hi), v| {
                (
                    Vector3::new(lo.x.min(v.x), lo.y.min(v.y), lo.z.min(v.z)),
                    Vector3::new(hi.x.max(v.x), hi.y.max(v.y), hi.z.max(v.z)),
                )
            });
        Some(Bounds { min, max })
    }

    /// Unnormalized Newell normal of face `face_idx`.
    ///
    /// Its length is twice the polygon's area and its direction follows the
    /// winding (right-hand rule). Returns `None` if the index is out of range.
    pub fn face_normal(&self, face_idx: usize) -> Option<Vector3> {
        let face = self.faces.get(face_idx)?;
        let idx = face.indices();
        let mut n = nalgebra::Vector3::<f64>::zeros();
        for (k, &i) in idx.iter().enumerate() {
            let a = self.vertices[i as usize];
            let b = self.vertices[idx[(k + 1) % idx.len()] as usize];
            n.x += (a.y - b.y) * (a.z + b.z);
            n.y += (a.z - b.z) * (a.x + b.x);
            n.z += (a.x - b.x) * (a.y + b.y);
        }
        Some(Vector3::from_na(n))
    }

    /// Centroid of the corners of face `face_idx`.
    pub fn face_centroid(&self, face_idx: usize) -> Option<Vector3> {
        let face = self.faces.get(face_idx)?;
        let sum = face
            .indices()
            .iter()
            .fold(nalgebra::Vector3::<f64>::zeros(), |acc, &i| {
                acc + self.vertices[i as usize].to_na()
            });
        Some(Vector3::from_na(sum / face.len() as f64))
    }

    /// Structural equality with coordinate tolerance.
    ///
    /// Vertex order, face order and winding must match exactly.
    pub fn approx_eq(&self, other: &MeshGeometry, tol: f64) -> bool {
        self.faces == other.faces
            && self.vertices.len() == other.vertices.len()
            && self
                .vertices
                .iter()
                .zip(&other.vertices)
                .all(|(a, b)| a.approx_eq(b, tol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_square() -> MeshGeometry {
        MeshGeometry::new(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(1.0, 1.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            vec![Face::quad(0, 1, 2, 3).unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn test_face_rejects_repeated_indices() {
        let err = Face::new(vec![0, 1, 1]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::DegenerateFace {
                indices: vec![0, 1, 1],
                distinct: 2
            }
        );
        assert!(Face::new(vec![0, 1]).is_err());
        // Repeats are fine as long as 3 distinct corners remain
        assert!(Face::new(vec![0, 1, 2, 1]).is_ok());
    }

    #[test]
    fn test_mesh_rejects_out_of_range_index() {
        let err = MeshGeometry::new(
            vec![Vector3::zero(), Vector3::new(1.0, 0.0, 0.0)],
            vec![Face::triangle(0, 1, 2).unwrap()],
        )
        .unwrap_err();
        assert_eq!(
            err,
            GeometryError::IndexOutOfRange {
                face: 0,
                index: 2,
                vertex_count: 2
            }
        );
    }

    #[test]
    fn test_mesh_rejects_non_finite_vertex() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = MeshGeometry::new(
                vec![Vector3::zero(), Vector3::new(1.0, bad, 0.0), Vector3::zero()],
                vec![],
            )
            .unwrap_err();
            assert_eq!(err, GeometryError::NonFiniteVertex { index: 1 });
        }
        // Large but finite coordinates are fine
        assert!(MeshGeometry::new(vec![Vector3::new(f64::MAX, -f64::MAX, 0.0)], vec![]).is_ok());
    }

    #[test]
    fn test_coincident_vertices_are_kept() {
        let mesh = MeshGeometry::new(vec![Vector3::zero(); 3], vec![]).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_stats() {
        let mesh = unit_square();
        assert_eq!(
            mesh.stats(),
            MeshStats {
                vertices: 4,
                faces: 1
            }
        );
        assert_eq!(MeshGeometry::empty().stats(), MeshStats::default());
    }

    #[test]
    fn test_bounds() {
        let b = unit_square().bounds().unwrap();
        assert_eq!(b.min, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(b.max, Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(b.center(), Vector3::new(0.5, 0.5, 0.0));
        assert!(MeshGeometry::empty().bounds().is_none());
    }

    #[test]
    fn test_face_normal_follows_winding() {
        let n = unit_square().face_normal(0).unwrap();
        assert_abs_diff_eq!(n.x, 0.0);
        assert_abs_diff_eq!(n.y, 0.0);
        // Twice the area, pointing +Z for CCW seen from +Z
        assert_abs_diff_eq!(n.z, 2.0);
        assert!(unit_square().face_normal(1).is_none());
    }

    #[test]
    fn test_face_centroid() {
        let c = unit_square().face_centroid(0).unwrap();
        assert!(c.approx_eq(&Vector3::new(0.5, 0.5, 0.0), 1e-12));
    }

    #[test]
    fn test_serde_validates() {
        let mesh = unit_square();
        let json = serde_json::to_string(&mesh).unwrap();
        let restored: MeshGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(mesh, restored);

        let bad = r#"{"vertices":[{"x":0,"y":0,"z":0}],"faces":[[0,1,2]]}"#;
        assert!(serde_json::from_str::<MeshGeometry>(bad).is_err());
        let degenerate = r#"{"vertices":[],"faces":[[0,0,0]]}"#;
        assert!(serde_json::from_str::<MeshGeometry>(degenerate).is_err());
    }

    #[test]
    fn test_approx_eq() {
        let a = unit_square();
        let b = MeshGeometry::new(
            a.vertices()
                .iter()
                .map(|v| Vector3::new(v.x + 1e-9, v.y, v.z))
                .collect(),
            a.faces().to_vec(),
        )
        .unwrap();
        assert!(a.approx_eq(&b, 1e-6));
        assert!(!a.approx_eq(&b, 1e-12));
    }
}
