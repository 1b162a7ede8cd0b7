//! Mesh file types and import dispatch.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use meshwork_geom::MeshGeometry;
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// File types a mesh record may declare.
///
/// Only OBJ has an importer; STL and PLY are recognized so that they can be
/// rejected explicitly instead of producing empty geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshFileType {
    /// Wavefront OBJ.
    Obj,
    /// Stereolithography.
    Stl,
    /// Polygon File Format.
    Ply,
}

impl MeshFileType {
    /// Detect the type from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        ext.parse().ok()
    }

    /// Canonical lowercase extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Stl => "stl",
            Self::Ply => "ply",
        }
    }

    /// True if meshes of this type can be imported.
    pub fn is_importable(&self) -> bool {
        matches!(self, Self::Obj)
    }
}

impl fmt::Display for MeshFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for MeshFileType {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "obj" => Ok(Self::Obj),
            "stl" => Ok(Self::Stl),
            "ply" => Ok(Self::Ply),
            _ => Err(MeshError::UnsupportedFileFormat(s.to_string())),
        }
    }
}

/// Parse mesh text of the given declared type (case-insensitive).
pub fn parse_mesh_data(data: &str, file_type: &str) -> Result<MeshGeometry> {
    parse_as(data, file_type.parse()?)
}

/// Parse mesh text of a known type.
pub fn parse_as(data: &str, file_type: MeshFileType) -> Result<MeshGeometry> {
    match file_type {
        MeshFileType::Obj => Ok(meshwork_obj::parse_obj(data)?),
        MeshFileType::Stl | MeshFileType::Ply => {
            Err(MeshError::UnsupportedFileFormat(file_type.to_string()))
        }
    }
}

/// Parse raw mesh bytes of a known type.
pub fn parse_bytes_as(data: &[u8], file_type: MeshFileType) -> Result<MeshGeometry> {
    match file_type {
        MeshFileType::Obj => Ok(meshwork_obj::parse_obj_bytes(data)?),
        MeshFileType::Stl | MeshFileType::Ply => {
            Err(MeshError::UnsupportedFileFormat(file_type.to_string()))
        }
    }
}
