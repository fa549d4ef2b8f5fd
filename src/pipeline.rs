//! Consolidation pipeline.
//!
//! Single linear pass over the input collection:
//! Load → Filter → Group → Merge → Annotate → Emit. A malformed input fails
//! the whole run; a missing authority degrades to the all-paid fallback.
//! Given identical inputs and authority data the run is idempotent and its
//! output ordering is stable (first-seen group order).

use std::collections::HashSet;

use log::info;
use serde_json::{json, Value};

use crate::annotate::annotate_routes;
use crate::error::{ConsolidateError, Result};
use crate::grouping::{group_segments, SkipCounts};
use crate::merging::merge_group;
use crate::MergedRoute;

/// Summary of one consolidation run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Segments that survived the filter and took part in merging.
    pub input_segments: usize,
    pub merged_routes: usize,
    pub paid_routes: usize,
    pub free_routes: usize,
    /// Features excluded before grouping, by reason.
    pub skipped: SkipCounts,
    /// Authority entries that matched no produced route.
    pub unmatched_authority: Vec<String>,
    /// Whether the all-paid fallback was applied.
    pub fallback_used: bool,
}

/// Output of one consolidation run.
#[derive(Debug)]
pub struct ConsolidationOutput {
    /// GeoJSON FeatureCollection with one feature per route.
    pub collection: Value,
    /// The merged routes, in output order.
    pub routes: Vec<MergedRoute>,
    pub summary: RunSummary,
}

/// Run the whole consolidation over an in-memory FeatureCollection.
///
/// `authority` is the externally fetched paid-route set; pass `None` when
/// the fetch failed or was skipped to apply the fallback policy.
pub fn consolidate(
    collection: &Value,
    authority: Option<&HashSet<String>>,
) -> Result<ConsolidationOutput> {
    let features = features_of(collection)?;
    let grouped = group_segments(features);
    info!(
        "found {} PR segments across {} routes ({} features excluded)",
        grouped.segment_count(),
        grouped.groups.len(),
        grouped.skipped.total()
    );

    let mut routes = Vec::with_capacity(grouped.groups.len());
    for (key, members) in &grouped.groups {
        routes.push(merge_group(key, members)?);
    }

    let report = annotate_routes(&mut routes, authority);

    let paid_routes = routes.iter().filter(|route| route.requires_payment).count();
    let summary = RunSummary {
        input_segments: grouped.segment_count(),
        merged_routes: routes.len(),
        paid_routes,
        free_routes: routes.len() - paid_routes,
        skipped: grouped.skipped,
        unmatched_authority: report.unmatched_authority,
        fallback_used: report.fallback_used,
    };
    info!(
        "consolidated {} routes: {} paid, {} free",
        summary.merged_routes, summary.paid_routes, summary.free_routes
    );

    let features: Vec<Value> = routes.iter().map(MergedRoute::to_feature).collect();
    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    Ok(ConsolidationOutput {
        collection,
        routes,
        summary,
    })
}

/// Validate the input collection shape and borrow its features.
fn features_of(collection: &Value) -> Result<&[Value]> {
    let object = collection
        .as_object()
        .ok_or_else(|| ConsolidateError::InputMalformed {
            reason: "root is not a JSON object".to_string(),
        })?;

    if object.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        return Err(ConsolidateError::InputMalformed {
            reason: "root \"type\" is not \"FeatureCollection\"".to_string(),
        });
    }

    object
        .get("features")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| ConsolidateError::InputMalformed {
            reason: "missing \"features\" array".to_string(),
        })
}
