//! Generation parameters and limits.
//!
//! Every parameter struct deserializes with defaults for missing keys and
//! ignores unknown keys, matching how loosely-typed clients send them.

use serde::{Deserialize, Serialize};

use crate::error::{PrimitiveError, Result};

/// Upper bounds applied on top of each primitive's own constraints.
///
/// Sphere size grows as `4^subdivisions`, so the subdivision cap is what
/// bounds memory for hostile input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Maximum icosphere subdivision level.
    pub max_subdivisions: u32,
    /// Maximum cylinder segment count.
    pub max_segments: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_subdivisions: 6,
            max_segments: 1024,
        }
    }
}

/// Parameters for [`Primitive::Cube`](crate::Primitive::Cube).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeParams {
    /// Edge length.
    pub size: f64,
}

impl Default for CubeParams {
    fn default() -> Self {
        Self { size: 1.0 }
    }
}

/// Parameters for [`Primitive::Sphere`](crate::Primitive::Sphere).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereParams {
    /// Distance of every vertex from the origin.
    pub radius: f64,
    /// Number of icosahedron refinement passes.
    pub subdivisions: i64,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            subdivisions: 3,
        }
    }
}

/// Parameters for [`Primitive::Cylinder`](crate::Primitive::Cylinder).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderParams {
    /// Ring radius.
    pub radius: f64,
    /// Distance between the two caps.
    pub height: f64,
    /// Points per ring.
    pub segments: i64,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            height: 2.0,
            segments: 8,
        }
    }
}

/// Parameters for [`Primitive::Plane`](crate::Primitive::Plane).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneParams {
    /// Edge length of the square.
    pub size: f64,
}

impl Default for PlaneParams {
    fn default() -> Self {
        Self { size: 1.0 }
    }
}

impl CubeParams {
    pub(crate) fn validate(&self) -> Result<()> {
        positive("size", self.size)
    }
}

impl PlaneParams {
    pub(crate) fn validate(&self) -> Result<()> {
        positive("size", self.size)
    }
}

impl SphereParams {
    pub(crate) fn validate(&self, limits: &Limits) -> Result<u32> {
        positive("radius", self.radius)?;
        if self.subdivisions < 0 {
            return Err(PrimitiveError::invalid(
                "subdivisions",
                format!("must be >= 0, got {}", self.subdivisions),
            ));
        }
        if self.subdivisions > i64::from(limits.max_subdivisions) {
            return Err(PrimitiveError::invalid(
                "subdivisions",
                format!(
                    "{} exceeds the limit of {}",
                    self.subdivisions, limits.max_subdivisions
                ),
            ));
        }
        Ok(self.subdivisions as u32)
    }
}

impl CylinderParams {
    pub(crate) fn validate(&self, limits: &Limits) -> Result<u32> {
        positive("radius", self.radius)?;
        positive("height", self.height)?;
        if self.segments < 3 {
            return Err(PrimitiveError::invalid(
                "segments",
                format!("must be >= 3, got {}", self.segments),
            ));
        }
        if self.segments > i64::from(limits.max_segments) {
            return Err(PrimitiveError::invalid(
                "segments",
                format!(
                    "{} exceeds the limit of {}",
                    self.segments, limits.max_segments
                ),
            ));
        }
        Ok(self.segments as u32)
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PrimitiveError::invalid(
            name,
            format!("must be a positive finite number, got {value}"),
        ))
    }
}
