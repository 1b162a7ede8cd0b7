#![warn(missing_docs)]

//! Procedural mesh generation and Wavefront OBJ interchange.
//!
//! This crate ties together the geometry types in `meshwork-geom`, the
//! primitive generators in `meshwork-primitives` and the OBJ codec in
//! `meshwork-obj` behind one error type.
//!
//! ```
//! use serde_json::json;
//!
//! let cube = meshwork::generate("cube", &json!({ "size": 2.0 })).unwrap();
//! assert_eq!(cube.stats().vertices, 8);
//!
//! let text = meshwork::serialize_obj(&cube);
//! let back = meshwork::parse_obj(&text).unwrap();
//! assert_eq!(back, cube);
//! ```
//!
//! Stored meshes travel as [`MeshRecord`]s, which keep the file body as
//! base64 next to its counts.

pub mod config;
pub mod error;
pub mod format;
pub mod operation;
pub mod record;

pub use config::Config;
pub use error::{ErrorKind, MeshError, Result};
pub use format::{parse_mesh_data, MeshFileType};
pub use operation::MeshOperation;
pub use record::MeshRecord;

pub use meshwork_geom::{Bounds, Face, MeshGeometry, MeshStats, TriangleMesh, Vector3};
pub use meshwork_obj::WriteOptions;
pub use meshwork_primitives::{
    CubeParams, CylinderParams, Limits, PlaneParams, Primitive, PrimitiveKind, SphereParams,
};

/// Generate a primitive of the named type with default limits.
///
/// Missing parameters take their defaults; `null` means all defaults.
pub fn generate(kind: &str, params: &serde_json::Value) -> Result<MeshGeometry> {
    Ok(meshwork_primitives::generate(kind, params)?)
}

/// Parse Wavefront OBJ text.
pub fn parse_obj(text: &str) -> Result<MeshGeometry> {
    Ok(meshwork_obj::parse_obj(text)?)
}

/// Serialize a mesh as OBJ text using shortest round-trip numbers.
pub fn serialize_obj(mesh: &MeshGeometry) -> String {
    meshwork_obj::serialize_obj(mesh)
}
