//! # Trailmerge
//!
//! Consolidates raw Madeira trail-segment geometry (GeoJSON `LineString` and
//! `MultiLineString` features tagged with a PR reference code) into one
//! canonical feature per logical route, annotated with a payment-requirement
//! flag from the official paid-route list.
//!
//! This library provides:
//! - Reference-code normalization (`"PR 8"`, `"PR8 | Vereda do Areeiro"` → `"PR8"`)
//! - Island classification from geometry (Madeira vs Porto Santo)
//! - Order-preserving segment grouping and merging
//! - Payment annotation from an external authority, with an explicit
//!   all-paid fallback when the authority is unavailable
//!
//! ## Quick Start
//! ```
//! use trailmerge::consolidate;
//! use serde_json::json;
//!
//! let collection = json!({
//!     "type": "FeatureCollection",
//!     "features": [{
//!         "type": "Feature",
//!         "properties": { "ref": "PR 8", "name": "Vereda da Ponta de São Lourenço" },
//!         "geometry": { "type": "LineString", "coordinates": [[-16.70, 32.75], [-16.69, 32.74]] }
//!     }]
//! });
//!
//! let output = consolidate(&collection, None).unwrap();
//! assert_eq!(output.summary.merged_routes, 1);
//! assert_eq!(output.routes[0].id, "PR8");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

// Unified error handling
pub mod error;
pub use error::{ConsolidateError, Result};

// Reference-code normalization
pub mod normalize;
pub use normalize::normalize_ref;

// Island classification
pub mod island;
pub use island::Island;

// Segment filtering and grouping
pub mod grouping;
pub use grouping::{group_segments, GroupKey, SegmentGroups, SkipCounts};

// Per-group merging
pub mod merging;
pub use merging::{merge_group, NAME_PLACEHOLDER};

// Payment annotation
pub mod annotate;
pub use annotate::{annotate_routes, AnnotationReport};

// Paid-route authority providers (HTML portal and JSON status API)
pub mod authority;
pub use authority::{AuthoritySource, SimplificaPortal, StatusApi};

// Consolidation pipeline
pub mod pipeline;
pub use pipeline::{consolidate, ConsolidationOutput, RunSummary};

// FeatureCollection file I/O
pub mod io;
pub use io::{read_collection, write_collection};

// ============================================================================
// Core Types
// ============================================================================

/// A GeoJSON position: `[longitude, latitude]`, optionally with elevation.
pub type Position = Vec<f64>;

/// Line geometry of a trail segment or merged route.
///
/// Only the two line types take part in consolidation; features with any
/// other geometry type are filtered out before grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum LineGeometry {
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
}

impl LineGeometry {
    /// Longitude of the first coordinate, if any coordinate exists.
    ///
    /// For `MultiLineString` this is the first coordinate of the first
    /// sequence.
    pub fn first_longitude(&self) -> Option<f64> {
        match self {
            LineGeometry::LineString(coords) => coords.first(),
            LineGeometry::MultiLineString(sequences) => {
                sequences.first().and_then(|seq| seq.first())
            }
        }
        .and_then(|position| position.first().copied())
    }

    /// Number of coordinate sequences this geometry contributes to a merge.
    pub fn sequence_count(&self) -> usize {
        match self {
            LineGeometry::LineString(_) => 1,
            LineGeometry::MultiLineString(sequences) => sequences.len(),
        }
    }
}

/// One surveyed trail segment that survived the input filter.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    /// Passthrough properties from the source feature.
    pub properties: Map<String, Value>,
    pub geometry: LineGeometry,
}

impl RouteSegment {
    /// The segment's `name` property, when it is a string.
    pub fn name(&self) -> Option<&str> {
        self.properties.get("name").and_then(Value::as_str)
    }
}

/// One canonical route produced by a consolidation run.
///
/// Created once per group and never mutated afterwards, except for the
/// payment flag the annotator fills in.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRoute {
    /// Normalized reference code, `-PS`-suffixed for Porto Santo.
    pub id: String,
    /// Best available label (`"N/A"` when no segment carried one).
    pub name: String,
    pub island: Island,
    pub requires_payment: bool,
    /// Passthrough properties of the representative segment.
    pub properties: Map<String, Value>,
    pub geometry: LineGeometry,
}

impl MergedRoute {
    /// Render as a GeoJSON feature.
    ///
    /// `id`, `name`, `island` and `requiresPayment` override any passthrough
    /// properties of the same name.
    pub fn to_feature(&self) -> Value {
        let mut properties = self.properties.clone();
        properties.insert("id".to_string(), Value::String(self.id.clone()));
        properties.insert("name".to_string(), Value::String(self.name.clone()));
        properties.insert(
            "island".to_string(),
            Value::String(self.island.label().to_string()),
        );
        properties.insert(
            "requiresPayment".to_string(),
            Value::Bool(self.requires_payment),
        );

        json!({
            "type": "Feature",
            "properties": properties,
            "geometry": &self.geometry,
        })
    }
}
