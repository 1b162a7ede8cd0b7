//! Stored mesh records.
//!
//! A record carries the mesh file itself as base64 text next to the
//! summary counts shown to users. Identifiers and timestamps belong to
//! whatever store holds the record and are not modeled here.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use meshwork_geom::{MeshGeometry, MeshStats};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::format::{parse_bytes_as, MeshFileType};
use crate::operation::MeshOperation;

/// A mesh file plus its metadata, in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshRecord {
    /// Display name.
    pub name: String,
    /// Original or synthesized file name.
    pub file_name: String,
    /// Declared file type.
    pub file_type: MeshFileType,
    /// Size of the decoded file in bytes.
    pub file_size: usize,
    /// Vertex count of the stored mesh.
    pub vertices: usize,
    /// Face count of the stored mesh.
    pub faces: usize,
    /// Base64 of the file contents.
    pub data: String,
}

impl MeshRecord {
    /// Build a record from an uploaded file.
    ///
    /// `data` is the base64 file body. The file is decoded and parsed so the
    /// counts reflect its real contents; files that cannot be imported are
    /// rejected rather than stored with zero counts.
    pub fn from_upload(file_name: &str, file_type: &str, data: &str) -> Result<Self> {
        let file_type: MeshFileType = file_type.parse()?;
        let bytes = STANDARD.decode(data.trim())?;
        let mesh = parse_bytes_as(&bytes, file_type)?;
        let stats = mesh.stats();
        debug!(
            file_name,
            %file_type,
            bytes = bytes.len(),
            vertices = stats.vertices,
            faces = stats.faces,
            "accepted mesh upload"
        );
        Ok(Self {
            name: file_name.to_string(),
            file_name: file_name.to_string(),
            file_type,
            file_size: bytes.len(),
            vertices: stats.vertices,
            faces: stats.faces,
            data: data.trim().to_string(),
        })
    }

    /// Build an OBJ record for an in-memory mesh.
    pub fn from_geometry(
        name: impl Into<String>,
        file_name: impl Into<String>,
        mesh: &MeshGeometry,
        config: &Config,
    ) -> Self {
        let text = config.serialize_obj(mesh);
        let stats = mesh.stats();
        Self {
            name: name.into(),
            file_name: file_name.into(),
            file_type: MeshFileType::Obj,
            file_size: text.len(),
            vertices: stats.vertices,
            faces: stats.faces,
            data: STANDARD.encode(text.as_bytes()),
        }
    }

    /// Generate a primitive and wrap it as a record named after its type
    /// unless `name` is given.
    pub fn generate(
        kind: &str,
        params: &serde_json::Value,
        name: Option<&str>,
        config: &Config,
    ) -> Result<Self> {
        let mesh = config.generate(kind, params)?;
        Ok(Self::from_geometry(
            name.unwrap_or(kind),
            format!("{kind}.obj"),
            &mesh,
            config,
        ))
    }

    /// Vertex and face counts as stored.
    pub fn stats(&self) -> MeshStats {
        MeshStats {
            vertices: self.vertices,
            faces: self.faces,
        }
    }

    /// Raw file bytes.
    pub fn file_bytes(&self) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(&self.data)?)
    }

    /// Decode and parse the stored mesh.
    pub fn decode(&self) -> Result<MeshGeometry> {
        parse_bytes_as(&self.file_bytes()?, self.file_type)
    }

    /// Apply `op` to the stored mesh and return the updated record.
    pub fn apply_operation(&self, op: MeshOperation, config: &Config) -> Result<Self> {
        let mesh = op.apply(&self.decode()?)?;
        Ok(Self::from_geometry(
            self.name.clone(),
            self.file_name.clone(),
            &mesh,
            config,
        ))
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
