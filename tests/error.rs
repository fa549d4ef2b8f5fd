//! Tests for error module

use trailmerge::ConsolidateError;

#[test]
fn test_error_display() {
    let err = ConsolidateError::EmptyGroup {
        key: "PR8-PS".to_string(),
    };
    assert!(err.to_string().contains("PR8-PS"));

    let err = ConsolidateError::InputMalformed {
        reason: "missing \"features\" array".to_string(),
    };
    assert!(err.to_string().contains("features"));
}

#[test]
fn test_input_missing_keeps_source() {
    use std::error::Error;

    let err = ConsolidateError::InputMissing {
        path: "data/routes.geojson".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert!(err.to_string().contains("routes.geojson"));
    assert!(err.source().is_some());
}
