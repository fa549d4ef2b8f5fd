//! Tests for the island module

use trailmerge::{Island, LineGeometry};

#[test]
fn test_madeira_longitude() {
    let geometry = LineGeometry::LineString(vec![vec![-17.1, 32.75], vec![-17.0, 32.74]]);
    assert_eq!(Island::from_geometry(&geometry), Island::Madeira);
}

#[test]
fn test_porto_santo_longitude() {
    let geometry = LineGeometry::LineString(vec![vec![-16.33, 33.06], vec![-16.32, 33.05]]);
    assert_eq!(Island::from_geometry(&geometry), Island::PortoSanto);
}

#[test]
fn test_multi_line_uses_first_sequence_first_coordinate() {
    let geometry = LineGeometry::MultiLineString(vec![
        vec![vec![-16.34, 33.07]],
        vec![vec![-17.2, 32.7]],
    ]);
    assert_eq!(Island::from_geometry(&geometry), Island::PortoSanto);
}

#[test]
fn test_empty_geometry_defaults_to_madeira() {
    assert_eq!(
        Island::from_geometry(&LineGeometry::LineString(vec![])),
        Island::Madeira
    );
    assert_eq!(
        Island::from_geometry(&LineGeometry::MultiLineString(vec![])),
        Island::Madeira
    );
}

#[test]
fn test_classification_depends_only_on_geometry() {
    // Identical geometry always classifies identically, whatever else the
    // feature carried.
    let geometry = LineGeometry::LineString(vec![vec![-16.4, 33.0]]);
    let first = Island::from_geometry(&geometry);
    let second = Island::from_geometry(&geometry.clone());
    assert_eq!(first, second);
}

#[test]
fn test_labels_and_suffixes() {
    assert_eq!(Island::Madeira.label(), "Madeira");
    assert_eq!(Island::PortoSanto.label(), "Porto Santo");
    assert_eq!(Island::Madeira.id_suffix(), "");
    assert_eq!(Island::PortoSanto.id_suffix(), "-PS");
    assert_eq!(Island::PortoSanto.to_string(), "Porto Santo");
}
