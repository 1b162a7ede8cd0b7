//! Shape properties that must hold across parameter ranges.

use approx::assert_abs_diff_eq;
use meshwork_primitives::{generate, generate_with_limits, Limits, PrimitiveError};
use serde_json::json;

#[test]
fn cube_is_eight_vertices_six_quads() {
    for size in [0.001, 0.5, 1.0, 7.25, 1000.0] {
        let mesh = generate("cube", &json!({ "size": size })).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 6);
        assert!(mesh.faces().iter().all(|f| f.len() == 4));
        let h = size / 2.0;
        for v in mesh.vertices() {
            for c in v.to_array() {
                assert!(c == h || c == -h, "coordinate {c} not in {{±{h}}}");
            }
        }
    }
}

#[test]
fn sphere_face_count_and_radius() {
    for radius in [0.25, 1.0, 10.0] {
        for n in 0..=5u32 {
            let mesh = generate("sphere", &json!({ "radius": radius, "subdivisions": n })).unwrap();
            assert_eq!(mesh.face_count(), 20 * 4usize.pow(n));
            for v in mesh.vertices() {
                assert_abs_diff_eq!(v.length(), radius, epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn cylinder_eight_segments() {
    let mesh = generate("cylinder", &json!({ "segments": 8 })).unwrap();
    assert_eq!(mesh.vertex_count(), 16);
    // Two octagon caps plus eight side quads
    assert_eq!(mesh.face_count(), 10);
}

#[test]
fn cylinder_face_count_tracks_segments() {
    for segments in [3, 4, 17, 64] {
        let mesh = generate("cylinder", &json!({ "segments": segments })).unwrap();
        assert_eq!(mesh.vertex_count(), 2 * segments as usize);
        assert_eq!(mesh.face_count(), segments as usize + 2);
    }
}

#[test]
fn unknown_type_is_unsupported() {
    assert_eq!(
        generate("torus", &json!({})).unwrap_err(),
        PrimitiveError::UnsupportedPrimitiveType("torus".to_string())
    );
}

#[test]
fn invalid_parameters_are_rejected() {
    let cases = [
        ("cube", json!({ "size": -1 })),
        ("cube", json!({ "size": 0 })),
        ("plane", json!({ "size": -0.5 })),
        ("sphere", json!({ "radius": 0 })),
        ("sphere", json!({ "subdivisions": -1 })),
        ("sphere", json!({ "subdivisions": 7 })),
        ("cylinder", json!({ "segments": 2 })),
        ("cylinder", json!({ "height": -2 })),
        ("cylinder", json!({ "radius": -1 })),
    ];
    for (kind, params) in cases {
        let err = generate(kind, &params).unwrap_err();
        assert!(
            matches!(err, PrimitiveError::InvalidParameter { .. }),
            "{kind} {params}: {err:?}"
        );
    }
}

#[test]
fn limits_are_configurable() {
    let tight = Limits {
        max_subdivisions: 1,
        max_segments: 16,
    };
    assert!(generate_with_limits("sphere", &json!({ "subdivisions": 1 }), &tight).is_ok());
    assert!(generate_with_limits("sphere", &json!({ "subdivisions": 2 }), &tight).is_err());
    assert!(generate_with_limits("cylinder", &json!({ "segments": 17 }), &tight).is_err());
}

#[test]
fn identical_inputs_identical_output() {
    for (kind, params) in [
        ("cube", json!({ "size": 3 })),
        ("sphere", json!({ "subdivisions": 2 })),
        ("cylinder", json!({ "segments": 12 })),
        ("plane", json!({})),
    ] {
        assert_eq!(generate(kind, &params).unwrap(), generate(kind, &params).unwrap());
    }
}
