//! Named mesh operations.
//!
//! Subdivision, decimation and smoothing are part of the request vocabulary
//! but have no geometry algorithm behind them yet; applying one reports
//! [`MeshError::OperationUnavailable`] and leaves the input untouched.

use std::fmt;
use std::str::FromStr;

use meshwork_geom::MeshGeometry;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MeshError, Result};

/// A mesh-to-mesh operation requested by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshOperation {
    /// Refine faces into smaller faces.
    Subdivision,
    /// Reduce face count.
    Decimation,
    /// Relax vertex positions.
    Smoothing,
}

impl MeshOperation {
    /// Lowercase request name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subdivision => "subdivision",
            Self::Decimation => "decimation",
            Self::Smoothing => "smoothing",
        }
    }

    /// Apply the operation, producing a new mesh.
    pub fn apply(&self, mesh: &MeshGeometry) -> Result<MeshGeometry> {
        warn!(
            operation = self.as_str(),
            vertices = mesh.vertex_count(),
            "mesh operation requested but not implemented"
        );
        Err(MeshError::OperationUnavailable(*self))
    }
}

impl fmt::Display for MeshOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeshOperation {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "subdivision" => Ok(Self::Subdivision),
            "decimation" => Ok(Self::Decimation),
            "smoothing" => Ok(Self::Smoothing),
            other => Err(MeshError::UnknownOperation(other.to_string())),
        }
    }
}
