//! OBJ reader.
//!
//! Reads the geometric subset of Wavefront OBJ: `v` and `f` directives.
//! Everything else (`vn`, `vt`, `o`, `g`, `s`, `usemtl`, `mtllib`, ...) is
//! skipped.
//!
//! Face indices are range-checked only after the whole input has been read,
//! so a face may refer to a vertex that appears later in the file. Relative
//! (negative) indices resolve against the vertices read so far, as in the
//! reference format.

use meshwork_geom::{Face, MeshGeometry, Vector3};
use tracing::{debug, trace};

use crate::error::{ObjError, Result};

/// A face waiting for the deferred range check, with its source line.
struct PendingFace<'a> {
    face: Face,
    line: usize,
    raw: &'a str,
}

/// Parse OBJ text into a mesh.
///
/// All-or-nothing: the first malformed line aborts the parse.
pub fn parse_obj(text: &str) -> Result<MeshGeometry> {
    let mut vertices = Vec::new();
    let mut pending = Vec::new();
    let mut skipped = 0usize;

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let body = raw.find('#').map_or(raw, |pos| &raw[..pos]);
        let mut tokens = body.split_whitespace();

        match tokens.next() {
            None => {}
            Some("v") => vertices.push(parse_vertex(tokens, line, raw)?),
            Some("f") => {
                let face = parse_face(tokens, vertices.len(), line, raw)?;
                pending.push(PendingFace { face, line, raw });
            }
            Some(directive) => {
                trace!(line, directive, "skipping OBJ directive");
                skipped += 1;
            }
        }
    }

    let vertex_count = vertices.len();
    for p in &pending {
        if let Some(&index) = p
            .face
            .indices()
            .iter()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(ObjError::malformed(
                p.line,
                p.raw,
                format!(
                    "vertex index {} out of range, file has {vertex_count} vertices",
                    u64::from(index) + 1
                ),
            ));
        }
    }

    let faces = pending.into_iter().map(|p| p.face).collect();
    let mesh = MeshGeometry::new(vertices, faces)?;
    debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        skipped,
        "parsed OBJ"
    );
    Ok(mesh)
}

/// Parse OBJ bytes, which must be UTF-8.
pub fn parse_obj_bytes(bytes: &[u8]) -> Result<MeshGeometry> {
    parse_obj(std::str::from_utf8(bytes)?)
}

fn parse_vertex<'a>(
    tokens: impl Iterator<Item = &'a str>,
    line: usize,
    raw: &str,
) -> Result<Vector3> {
    let mut coords = [0.0f64; 3];
    let mut found = 0;
    // A trailing w component and anything after it is ignored
    for (slot, token) in coords.iter_mut().zip(tokens) {
        let value: f64 = token
            .parse()
            .map_err(|_| ObjError::malformed(line, raw, format!("non-numeric coordinate `{token}`")))?;
        if !value.is_finite() {
            return Err(ObjError::malformed(
                line,
                raw,
                format!("non-finite coordinate `{token}`"),
            ));
        }
        *slot = value;
        found += 1;
    }
    if found < 3 {
        return Err(ObjError::malformed(
            line,
            raw,
            format!("vertex needs 3 coordinates, found {found}"),
        ));
    }
    Ok(Vector3::from(coords))
}

fn parse_face<'a>(
    tokens: impl Iterator<Item = &'a str>,
    vertices_so_far: usize,
    line: usize,
    raw: &str,
) -> Result<Face> {
    let indices = tokens
        .map(|token| resolve_index(token, vertices_so_far, line, raw))
        .collect::<Result<Vec<u32>>>()?;

    if indices.len() < 3 {
        return Err(ObjError::malformed(
            line,
            raw,
            format!("face needs at least 3 vertices, found {}", indices.len()),
        ));
    }

    Face::new(indices)
        .map_err(|_| ObjError::malformed(line, raw, "face needs at least 3 distinct vertices"))
}

/// Convert one `v[/vt[/vn]]` token to a 0-based vertex index.
fn resolve_index(token: &str, vertices_so_far: usize, line: usize, raw: &str) -> Result<u32> {
    let head = token.split('/').next().unwrap_or_default();
    let n: i64 = head
        .parse()
        .map_err(|_| ObjError::malformed(line, raw, format!("non-numeric vertex index `{token}`")))?;

    let resolved = match n {
        0 => {
            return Err(ObjError::malformed(
                line,
                raw,
                "vertex index 0 is invalid, indices are 1-based",
            ))
        }
        n if n > 0 => n - 1,
        n => vertices_so_far as i64 + n,
    };

    if resolved < 0 {
        return Err(ObjError::malformed(
            line,
            raw,
            format!("relative index {n} reaches before the first vertex"),
        ));
    }
    u32::try_from(resolved)
        .map_err(|_| ObjError::malformed(line, raw, format!("vertex index {n} is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed_line(err: ObjError) -> usize {
        match err {
            ObjError::MalformedLine { line, .. } => line,
            other => panic!("expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn test_triangle() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.faces()[0].indices(), &[0, 1, 2]);
        assert_eq!(mesh.vertices()[1], Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_slash_tokens_keep_vertex_index() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2//1 3/1 4\n";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.faces()[0].indices(), &[0, 1, 2, 3]);
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn test_comments_blank_and_other_directives() {
        let src = "# header\n\no cube\ng side\nusemtl red\ns off\nv 0 0 0 # origin\nv 1 0 0\r\nv 0 1 0\n\n  f 1 2 3  \n";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_extra_vertex_component_ignored() {
        let mesh = parse_obj("v 1 2 3 0.5\n").unwrap();
        assert_eq!(mesh.vertices()[0], Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_short_vertex() {
        let err = parse_obj("v 1 2 3\nv 1 2\n").unwrap_err();
        assert_eq!(
            err,
            ObjError::malformed(2, "v 1 2", "vertex needs 3 coordinates, found 2")
        );
    }

    #[test]
    fn test_non_numeric_vertex() {
        assert_eq!(malformed_line(parse_obj("v 1 two 3\n").unwrap_err()), 1);
        assert_eq!(malformed_line(parse_obj("v 1 nan 3\n").unwrap_err()), 1);
        assert_eq!(malformed_line(parse_obj("v inf 0 0\n").unwrap_err()), 1);
    }

    #[test]
    fn test_non_numeric_face_index() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 b 3\n").unwrap_err();
        assert_eq!(malformed_line(err), 4);
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 /2 3\n").unwrap_err();
        assert_eq!(malformed_line(err), 4);
    }

    #[test]
    fn test_zero_index_rejected() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert_eq!(malformed_line(err), 4);
    }

    #[test]
    fn test_repeated_index_is_strict() {
        let err = parse_obj("v 1 2 3\nv 4 5 6\nf 1 2 2\n").unwrap_err();
        assert_eq!(
            err,
            ObjError::malformed(3, "f 1 2 2", "face needs at least 3 distinct vertices")
        );
    }

    #[test]
    fn test_too_few_face_tokens() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert_eq!(malformed_line(err), 3);
    }

    #[test]
    fn test_forward_reference_accepted() {
        let mesh = parse_obj("f 1 2 3\nv 0 0 0\nv 1 0 0\nv 0 1 0\n").unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_out_of_range_reported_after_full_read() {
        let src = "v 0 0 0\nv 1 0 0\nf 1 2 3\nv 0 1 0\nf 1 2 4\n";
        let err = parse_obj(src).unwrap_err();
        assert_eq!(
            err,
            ObjError::malformed(
                5,
                "f 1 2 4",
                "vertex index 4 out of range, file has 3 vertices"
            )
        );
    }

    #[test]
    fn test_relative_indices() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap();
        assert_eq!(mesh.faces()[0].indices(), &[0, 1, 2]);
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf -3 -2 -1\n").unwrap_err();
        assert_eq!(malformed_line(err), 3);
    }

    #[test]
    fn test_empty_input() {
        let mesh = parse_obj("").unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            parse_obj_bytes(&[b'v', b' ', 0xff, 0xfe]),
            Err(ObjError::Utf8(_))
        ));
        assert_eq!(parse_obj_bytes(b"v 1 2 3\n").unwrap().vertex_count(), 1);
    }
}
