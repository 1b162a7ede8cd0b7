//! Runtime configuration loaded from TOML.
//!
//! ```toml
//! [limits]
//! max_subdivisions = 6
//! max_segments = 1024
//!
//! [obj]
//! precision = 6
//! header = "generated by meshwork"
//! ```
//!
//! Every key is optional; unknown keys are rejected.

use std::path::Path;

use meshwork_geom::MeshGeometry;
use meshwork_obj::WriteOptions;
use meshwork_primitives::Limits;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Generation limits and OBJ output options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Upper bounds on generation parameters.
    pub limits: Limits,
    /// OBJ writer options.
    pub obj: WriteOptions,
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Generate a primitive under these limits.
    pub fn generate(&self, kind: &str, params: &serde_json::Value) -> Result<MeshGeometry> {
        Ok(meshwork_primitives::generate_with_limits(
            kind,
            params,
            &self.limits,
        )?)
    }

    /// Serialize a mesh with these OBJ options.
    pub fn serialize_obj(&self, mesh: &MeshGeometry) -> String {
        meshwork_obj::serialize_obj_with(mesh, &self.obj)
    }
}
