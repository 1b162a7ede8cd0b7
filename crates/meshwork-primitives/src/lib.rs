#![warn(missing_docs)]

//! Procedural primitive mesh generation for meshwork.
//!
//! Builds closed-form polygon meshes for four primitives: cube, plane,
//! icosphere and cylinder. Output is deterministic: identical parameters
//! always yield identical vertex order and face layout.
//!
//! # Example
//!
//! ```
//! use meshwork_primitives::generate;
//! use serde_json::json;
//!
//! let cube = generate("cube", &json!({ "size": 2.0 })).unwrap();
//! assert_eq!(cube.vertex_count(), 8);
//! assert_eq!(cube.face_count(), 6);
//! ```

mod error;
mod icosphere;
mod params;

pub use error::{PrimitiveError, Result};
pub use params::{CubeParams, CylinderParams, Limits, PlaneParams, SphereParams};

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use meshwork_geom::{Face, MeshGeometry, Vector3};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

/// The primitive shapes that can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// Axis-aligned cube centered at origin.
    Cube,
    /// Icosphere centered at origin.
    Sphere,
    /// Cylinder along the Y axis, centered at origin.
    Cylinder,
    /// Square in the XZ plane at `y = 0`.
    Plane,
}

impl PrimitiveKind {
    /// All kinds, in a fixed order.
    pub const ALL: [PrimitiveKind; 4] = [Self::Cube, Self::Sphere, Self::Cylinder, Self::Plane];

    /// Lowercase name as used in requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Sphere => "sphere",
            Self::Cylinder => "cylinder",
            Self::Plane => "plane",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimitiveKind {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cube" => Ok(Self::Cube),
            "sphere" => Ok(Self::Sphere),
            "cylinder" => Ok(Self::Cylinder),
            "plane" => Ok(Self::Plane),
            other => Err(PrimitiveError::UnsupportedPrimitiveType(other.to_string())),
        }
    }
}

/// A primitive together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    /// Cube with edge length `size`.
    Cube(CubeParams),
    /// Icosphere.
    Sphere(SphereParams),
    /// Cylinder with polygonal caps.
    Cylinder(CylinderParams),
    /// Single-quad plane.
    Plane(PlaneParams),
}

impl Primitive {
    /// Default parameters for `kind`.
    pub fn default_for(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Cube => Self::Cube(CubeParams::default()),
            PrimitiveKind::Sphere => Self::Sphere(SphereParams::default()),
            PrimitiveKind::Cylinder => Self::Cylinder(CylinderParams::default()),
            PrimitiveKind::Plane => Self::Plane(PlaneParams::default()),
        }
    }

    /// Resolve a type name and a loosely-typed parameter object.
    ///
    /// `null` means all defaults. Missing keys take defaults, unknown keys
    /// are ignored, and a value of the wrong JSON type is an
    /// [`PrimitiveError::InvalidParameter`].
    pub fn from_json(kind: &str, params: &serde_json::Value) -> Result<Self> {
        let kind: PrimitiveKind = kind.parse()?;
        Ok(match kind {
            PrimitiveKind::Cube => Self::Cube(params_from_json(params)?),
            PrimitiveKind::Sphere => Self::Sphere(params_from_json(params)?),
            PrimitiveKind::Cylinder => Self::Cylinder(params_from_json(params)?),
            PrimitiveKind::Plane => Self::Plane(params_from_json(params)?),
        })
    }

    /// Which shape this is.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Cube(_) => PrimitiveKind::Cube,
            Self::Sphere(_) => PrimitiveKind::Sphere,
            Self::Cylinder(_) => PrimitiveKind::Cylinder,
            Self::Plane(_) => PrimitiveKind::Plane,
        }
    }

    /// Validate the parameters against `limits` and build the mesh.
    pub fn generate(&self, limits: &Limits) -> Result<MeshGeometry> {
        let mesh = match self {
            Self::Cube(p) => {
                p.validate()?;
                build_cube(p.size)?
            }
            Self::Plane(p) => {
                p.validate()?;
                build_plane(p.size)?
            }
            Self::Sphere(p) => {
                let subdivisions = p.validate(limits)?;
                icosphere::build(p.radius, subdivisions)?
            }
            Self::Cylinder(p) => {
                let segments = p.validate(limits)?;
                build_cylinder(p.radius, p.height, segments)?
            }
        };
        debug!(
            kind = %self.kind(),
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "generated primitive"
        );
        Ok(mesh)
    }
}

fn params_from_json<T: DeserializeOwned + Default>(value: &serde_json::Value) -> Result<T> {
    match value {
        serde_json::Value::Null => Ok(T::default()),
        serde_json::Value::Object(_) => serde_json::from_value(value.clone())
            .map_err(|e| PrimitiveError::invalid("parameters", e.to_string())),
        other => Err(PrimitiveError::invalid(
            "parameters",
            format!("expected an object, got {other}"),
        )),
    }
}

/// Generate a primitive by name with the default [`Limits`].
pub fn generate(kind: &str, params: &serde_json::Value) -> Result<MeshGeometry> {
    generate_with_limits(kind, params, &Limits::default())
}

/// Generate a primitive by name with explicit limits.
pub fn generate_with_limits(
    kind: &str,
    params: &serde_json::Value,
    limits: &Limits,
) -> Result<MeshGeometry> {
    Primitive::from_json(kind, params)?.generate(limits)
}

/// Build a cube of edge `size` centered at origin.
///
/// Vertex layout (`s = size / 2`):
/// ```text
///     v7----v6
///    /|    /|
///   v4----v5|    y
///   | v3--|-v2   | z
///   |/    |/     |/
///   v0----v1     +---x
/// ```
/// `v0..v3` lie on `z = -s`, `v4..v7` on `z = +s`, each ring ordered
/// `(-x,-y) (+x,-y) (+x,+y) (-x,+y)`.
fn build_cube(size: f64) -> Result<MeshGeometry> {
    let s = size / 2.0;
    let vertices = vec![
        Vector3::new(-s, -s, -s),
        Vector3::new(s, -s, -s),
        Vector3::new(s, s, -s),
        Vector3::new(-s, s, -s),
        Vector3::new(-s, -s, s),
        Vector3::new(s, -s, s),
        Vector3::new(s, s, s),
        Vector3::new(-s, s, s),
    ];

    // CCW when viewed from outside
    let faces = vec![
        // Bottom (z = -s), normal -Z
        Face::quad(0, 3, 2, 1)?,
        // Top (z = +s), normal +Z
        Face::quad(4, 5, 6, 7)?,
        // Front (y = -s), normal -Y
        Face::quad(0, 1, 5, 4)?,
        // Back (y = +s), normal +Y
        Face::quad(2, 3, 7, 6)?,
        // Left (x = -s), normal -X
        Face::quad(0, 4, 7, 3)?,
        // Right (x = +s), normal +X
        Face::quad(1, 2, 6, 5)?,
    ];

    Ok(MeshGeometry::new(vertices, faces)?)
}

/// Build a square of edge `size` in the XZ plane, facing +Y.
fn build_plane(size: f64) -> Result<MeshGeometry> {
    let s = size / 2.0;
    let vertices = vec![
        Vector3::new(-s, 0.0, -s),
        Vector3::new(s, 0.0, -s),
        Vector3::new(s, 0.0, s),
        Vector3::new(-s, 0.0, s),
    ];
    Ok(MeshGeometry::new(vertices, vec![Face::quad(0, 3, 2, 1)?])?)
}

/// Build a cylinder along Y with polygonal caps.
///
/// Vertices `0..n` form the top ring at `y = height/2` and `n..2n` the
/// bottom ring at `y = -height/2`, both at angles `2πi/n` measured from +X
/// towards +Z. Faces: top cap, bottom cap, then `n` side quads, for
/// `n + 2` faces in total.
fn build_cylinder(radius: f64, height: f64, segments: u32) -> Result<MeshGeometry> {
    let n = segments;
    let half = height / 2.0;

    let ring = |y: f64| {
        (0..n).map(move |i| {
            let theta = TAU * i as f64 / n as f64;
            Vector3::new(radius * theta.cos(), y, radius * theta.sin())
        })
    };
    let vertices: Vec<Vector3> = ring(half).chain(ring(-half)).collect();

    let mut faces = Vec::with_capacity(n as usize + 2);
    // Increasing angle runs clockwise seen from +Y, so the top cap is reversed
    faces.push(Face::new((0..n).rev().collect())?);
    faces.push(Face::new((n..2 * n).collect())?);
    for i in 0..n {
        let j = (i + 1) % n;
        faces.push(Face::quad(i, j, n + j, n + i)?);
    }

    Ok(MeshGeometry::new(vertices, faces)?)
}
