#![warn(missing_docs)]

//! Wavefront OBJ import/export for meshwork.
//!
//! Only vertex positions and polygon faces are carried; texture
//! coordinates, normals, groups and materials are dropped on import.
//!
//! # Example
//!
//! ```
//! use meshwork_obj::{parse_obj, serialize_obj};
//!
//! let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
//! assert_eq!(serialize_obj(&mesh), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
//! ```

mod error;
mod reader;
mod writer;

pub use error::{ObjError, Result};
pub use reader::{parse_obj, parse_obj_bytes};
pub use writer::{serialize_obj, serialize_obj_with, write_obj, ObjDisplay, WriteOptions};
