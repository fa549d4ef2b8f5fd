//! Tests for the merging module

use serde_json::{Map, Value};
use trailmerge::{
    merge_group, ConsolidateError, GroupKey, Island, LineGeometry, RouteSegment, NAME_PLACEHOLDER,
};

fn segment(name: Option<&str>, geometry: LineGeometry) -> RouteSegment {
    let mut properties = Map::new();
    properties.insert("ref".to_string(), Value::String("PR8".to_string()));
    if let Some(name) = name {
        properties.insert("name".to_string(), Value::String(name.to_string()));
    }
    RouteSegment {
        properties,
        geometry,
    }
}

fn madeira_key(reference: &str) -> GroupKey {
    GroupKey {
        reference: reference.to_string(),
        island: Island::Madeira,
    }
}

#[test]
fn test_single_line_string_stays_line_string() {
    let coords = vec![vec![-17.0, 32.75], vec![-17.01, 32.76]];
    let members = vec![segment(None, LineGeometry::LineString(coords.clone()))];

    let route = merge_group(&madeira_key("PR8"), &members).unwrap();

    assert_eq!(route.geometry, LineGeometry::LineString(coords));
    assert_eq!(route.id, "PR8");
}

#[test]
fn test_multiple_members_become_multi_line_string() {
    let a = vec![vec![-17.0, 32.75]];
    let b = vec![vec![-17.1, 32.70]];
    let members = vec![
        segment(None, LineGeometry::LineString(a.clone())),
        segment(None, LineGeometry::LineString(b.clone())),
    ];

    let route = merge_group(&madeira_key("PR8"), &members).unwrap();

    assert_eq!(route.geometry, LineGeometry::MultiLineString(vec![a, b]));
}

#[test]
fn test_sequence_counts_are_preserved_in_order() {
    let a = vec![vec![-17.0, 32.75]];
    let b = vec![vec![-17.1, 32.70]];
    let c = vec![vec![-17.2, 32.65]];
    let members = vec![
        segment(None, LineGeometry::MultiLineString(vec![a.clone(), b.clone()])),
        segment(None, LineGeometry::LineString(c.clone())),
    ];

    let route = merge_group(&madeira_key("PR8"), &members).unwrap();

    // 2 sequences from the MultiLineString member + 1 from the LineString,
    // in contribution order.
    assert_eq!(
        route.geometry,
        LineGeometry::MultiLineString(vec![a, b, c])
    );
    assert_eq!(route.geometry.sequence_count(), 3);
}

#[test]
fn test_representative_skips_placeholder_names() {
    let members = vec![
        segment(Some(NAME_PLACEHOLDER), LineGeometry::LineString(vec![vec![-17.0, 32.75]])),
        segment(None, LineGeometry::LineString(vec![vec![-17.1, 32.70]])),
        segment(Some("Vereda do Areeiro"), LineGeometry::LineString(vec![vec![-17.2, 32.65]])),
    ];

    let route = merge_group(&madeira_key("PR8"), &members).unwrap();

    assert_eq!(route.name, "Vereda do Areeiro");
}

#[test]
fn test_falls_back_to_first_member_properties() {
    let mut first = segment(None, LineGeometry::LineString(vec![vec![-17.0, 32.75]]));
    first
        .properties
        .insert("surface".to_string(), Value::String("gravel".to_string()));
    let members = vec![
        first,
        segment(None, LineGeometry::LineString(vec![vec![-17.1, 32.70]])),
    ];

    let route = merge_group(&madeira_key("PR8"), &members).unwrap();

    assert_eq!(route.name, NAME_PLACEHOLDER);
    assert_eq!(
        route.properties.get("surface"),
        Some(&Value::String("gravel".to_string()))
    );
}

#[test]
fn test_porto_santo_identity_suffixes() {
    let key = GroupKey {
        reference: "PR1".to_string(),
        island: Island::PortoSanto,
    };
    let members = vec![segment(
        Some("Vereda do Pico Branco"),
        LineGeometry::LineString(vec![vec![-16.33, 33.06]]),
    )];

    let route = merge_group(&key, &members).unwrap();

    assert_eq!(route.id, "PR1-PS");
    assert_eq!(route.name, "Vereda do Pico Branco (Porto Santo)");
    assert_eq!(route.island, Island::PortoSanto);
}

#[test]
fn test_porto_santo_placeholder_name_gets_no_suffix() {
    let key = GroupKey {
        reference: "PR1".to_string(),
        island: Island::PortoSanto,
    };
    let members = vec![segment(
        None,
        LineGeometry::LineString(vec![vec![-16.33, 33.06]]),
    )];

    let route = merge_group(&key, &members).unwrap();

    assert_eq!(route.name, NAME_PLACEHOLDER);
}

#[test]
fn test_empty_sequence_group_fails_loudly() {
    // A lone MultiLineString with no sequences contributes nothing; the
    // merger must refuse rather than emit invalid geometry.
    let members = vec![segment(None, LineGeometry::MultiLineString(vec![]))];

    let err = merge_group(&madeira_key("PR9"), &members).unwrap_err();

    assert!(matches!(err, ConsolidateError::EmptyGroup { .. }));
    assert!(err.to_string().contains("PR9"));
}

#[test]
fn test_merge_is_deterministic() {
    let members = vec![
        segment(Some("A"), LineGeometry::LineString(vec![vec![-17.0, 32.75]])),
        segment(Some("B"), LineGeometry::LineString(vec![vec![-17.1, 32.70]])),
    ];

    let first = merge_group(&madeira_key("PR8"), &members).unwrap();
    let second = merge_group(&madeira_key("PR8"), &members).unwrap();

    assert_eq!(first, second);
}
