//! OBJ writer.

use std::fmt;
use std::io;

use meshwork_geom::MeshGeometry;
use serde::{Deserialize, Serialize};

/// Output options for the OBJ writer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriteOptions {
    /// Fixed number of decimals per coordinate. `None` writes the shortest
    /// text that parses back to the identical `f64`.
    pub precision: Option<usize>,
    /// Comment emitted before the geometry, one `#` line per text line.
    pub header: Option<String>,
}

/// Display adapter that renders a mesh as OBJ text.
pub struct ObjDisplay<'a> {
    mesh: &'a MeshGeometry,
    options: &'a WriteOptions,
}

impl<'a> ObjDisplay<'a> {
    /// Wrap `mesh` for display with `options`.
    pub fn new(mesh: &'a MeshGeometry, options: &'a WriteOptions) -> Self {
        Self { mesh, options }
    }
}

impl fmt::Display for ObjDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(header) = &self.options.header {
            for line in header.lines() {
                writeln!(f, "# {line}")?;
            }
        }

        for v in self.mesh.vertices() {
            match self.options.precision {
                Some(p) => writeln!(f, "v {:.p$} {:.p$} {:.p$}", v.x, v.y, v.z)?,
                None => writeln!(f, "v {} {} {}", v.x, v.y, v.z)?,
            }
        }

        for face in self.mesh.faces() {
            f.write_str("f")?;
            for &i in face.indices() {
                write!(f, " {}", u64::from(i) + 1)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Serialize a mesh to OBJ text with default options.
///
/// Vertices come first in index order, then faces with 1-based indices.
/// `parse_obj(&serialize_obj(&m))` reproduces `m` exactly.
pub fn serialize_obj(mesh: &MeshGeometry) -> String {
    serialize_obj_with(mesh, &WriteOptions::default())
}

/// Serialize a mesh to OBJ text.
pub fn serialize_obj_with(mesh: &MeshGeometry, options: &WriteOptions) -> String {
    ObjDisplay::new(mesh, options).to_string()
}

/// Write a mesh as OBJ to any byte sink.
pub fn write_obj<W: io::Write>(
    mesh: &MeshGeometry,
    options: &WriteOptions,
    mut out: W,
) -> io::Result<()> {
    write!(out, "{}", ObjDisplay::new(mesh, options))?;
    out.flush()
}
