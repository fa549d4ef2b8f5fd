//! Segment filtering and grouping.
//!
//! Partitions raw GeoJSON features into groups keyed by
//! (normalized reference, island). Only line geometries with a PR-prefixed
//! `ref` property survive the filter; everything else is dropped silently
//! and counted in [`SkipCounts`].

use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

use crate::island::Island;
use crate::normalize::normalize_ref;
use crate::{LineGeometry, RouteSegment};

/// Grouping key: one logical route on one island.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    /// Normalized reference code, e.g. `"PR6.1"`.
    pub reference: String,
    pub island: Island,
}

impl GroupKey {
    /// Route id used in output features and authority lookups.
    pub fn route_id(&self) -> String {
        format!("{}{}", self.reference, self.island.id_suffix())
    }
}

/// Features dropped during filtering, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    /// Geometry type other than `LineString`/`MultiLineString`.
    pub unsupported_geometry: usize,
    /// Missing, empty or non-string `ref` property.
    pub missing_ref: usize,
    /// A `ref` that does not start with `PR`.
    pub non_pr_ref: usize,
    /// Coordinates that do not parse as line coordinates.
    pub malformed_geometry: usize,
}

impl SkipCounts {
    /// Total number of dropped features.
    pub fn total(&self) -> usize {
        self.unsupported_geometry + self.missing_ref + self.non_pr_ref + self.malformed_geometry
    }
}

/// Grouped segments in first-seen key order, plus skip diagnostics.
///
/// The map is insertion-ordered on purpose: merge output order (and the
/// order of sub-sequences inside a merged `MultiLineString`) follows input
/// encounter order, which keeps reruns byte-for-byte identical.
#[derive(Debug, Default)]
pub struct SegmentGroups {
    pub groups: IndexMap<GroupKey, Vec<RouteSegment>>,
    pub skipped: SkipCounts,
}

impl SegmentGroups {
    /// Number of segments that survived the filter.
    pub fn segment_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Partition raw features into per-route groups.
///
/// Every surviving feature lands in exactly one group; within a group,
/// segments keep their input order.
pub fn group_segments(features: &[Value]) -> SegmentGroups {
    let mut out = SegmentGroups::default();

    for feature in features {
        let geometry_type = feature
            .pointer("/geometry/type")
            .and_then(Value::as_str)
            .unwrap_or("");
        if !matches!(geometry_type, "LineString" | "MultiLineString") {
            out.skipped.unsupported_geometry += 1;
            continue;
        }

        let raw_ref = feature
            .pointer("/properties/ref")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or("");
        if raw_ref.is_empty() {
            out.skipped.missing_ref += 1;
            continue;
        }
        if !is_pr_ref(raw_ref) {
            out.skipped.non_pr_ref += 1;
            continue;
        }

        // A missing coordinates key degrades to an empty sequence; anything
        // that is present but not line-shaped is counted and dropped.
        let coordinates = feature
            .pointer("/geometry/coordinates")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        let geometry = match geometry_type {
            "LineString" => serde_json::from_value(coordinates)
                .ok()
                .map(LineGeometry::LineString),
            _ => serde_json::from_value(coordinates)
                .ok()
                .map(LineGeometry::MultiLineString),
        };
        let Some(geometry) = geometry else {
            out.skipped.malformed_geometry += 1;
            continue;
        };

        let properties = feature
            .pointer("/properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let key = GroupKey {
            reference: normalize_ref(raw_ref),
            island: Island::from_geometry(&geometry),
        };
        out.groups
            .entry(key)
            .or_default()
            .push(RouteSegment { properties, geometry });
    }

    debug!(
        "grouped {} segments into {} routes, skipped {}",
        out.segment_count(),
        out.groups.len(),
        out.skipped.total()
    );

    out
}

/// Case-insensitive check for the `PR` route prefix.
fn is_pr_ref(raw: &str) -> bool {
    raw.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("PR"))
}
