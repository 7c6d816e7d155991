#![allow(missing_docs)]

use multipart_feed::{
    extract_boundary, extract_boundary_with, parser::Boundary, BoundaryMode, ParseError,
};

#[test]
fn extracts_boundary_from_content_type() {
    let boundary = extract_boundary("multipart/x-mixed-replace; boundary=myboundary")
        .expect("boundary should parse");
    assert_eq!(boundary, "myboundary");

    let boundary = extract_boundary("multipart/form-data; boundary=--abc--123")
        .expect("any multipart subtype is accepted");
    assert_eq!(boundary, "--abc--123");
}

#[test]
fn keeps_remainder_verbatim_by_default() {
    let boundary = extract_boundary("multipart/x-mixed-replace; boundary=X; charset=utf-8")
        .expect("boundary should parse");
    assert_eq!(boundary, "X; charset=utf-8");

    let boundary = extract_boundary("multipart/x-mixed-replace; boundary=\"quoted\"")
        .expect("quotes are not stripped");
    assert_eq!(boundary, "\"quoted\"");
}

#[test]
fn trim_parameters_mode_stops_at_next_parameter() {
    let boundary = extract_boundary_with(
        "multipart/x-mixed-replace; boundary=X ; charset=utf-8",
        BoundaryMode::TrimParameters,
    )
    .expect("boundary should parse");
    assert_eq!(boundary, "X");

    let boundary = extract_boundary_with(
        "multipart/x-mixed-replace; boundary=frame",
        BoundaryMode::TrimParameters,
    )
    .expect("boundary should parse");
    assert_eq!(boundary, "frame");
}

#[test]
fn rejects_non_multipart_content_type() {
    let err = extract_boundary("image/jpeg; boundary=X").expect_err("must fail");
    assert_eq!(
        err,
        ParseError::InvalidContentType {
            content_type: "image/jpeg; boundary=X".to_owned()
        }
    );

    assert!(extract_boundary("Multipart/x-mixed-replace; boundary=X").is_err());
    assert!(extract_boundary(" multipart/x-mixed-replace; boundary=X").is_err());
}

#[test]
fn rejects_missing_boundary_parameter() {
    for content_type in [
        "multipart/x-mixed-replace",
        "multipart/x-mixed-replace;boundary=X",
        "multipart/x-mixed-replace; charset=utf-8",
        "multipart/x-mixed-replace; boundary=",
    ] {
        let err = extract_boundary(content_type).expect_err("must fail");
        assert!(matches!(err, ParseError::InvalidContentType { .. }), "{content_type}");
        assert_err_contains(&err.to_string(), "invalid multipart Content-Type");
    }

    assert!(extract_boundary_with(
        "multipart/x-mixed-replace; boundary=; charset=utf-8",
        BoundaryMode::TrimParameters
    )
    .is_err());
}

#[test]
fn derives_part_and_end_delimiters() {
    let boundary = Boundary::new("frame");
    assert_eq!(boundary.token(), "frame");
    assert_eq!(boundary.part_delimiter(), b"--frame\r\n");
    assert_eq!(boundary.end_delimiter(), b"--frame--");

    let boundary = Boundary::from_content_type(
        "multipart/x-mixed-replace; boundary=frame",
        BoundaryMode::Verbatim,
    )
    .expect("boundary should parse");
    assert_eq!(boundary, Boundary::new("frame"));
}

fn assert_err_contains(actual: &str, expected_fragment: &str) {
    assert!(
        actual.contains(expected_fragment),
        "expected `{actual}` to contain `{expected_fragment}`"
    );
}
