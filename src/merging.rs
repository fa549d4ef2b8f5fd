//! Segment merging.
//!
//! Reduces each (reference, island) group to a single output route:
//! representative properties, combined geometry, island-suffixed identity.

use crate::error::{ConsolidateError, Result};
use crate::grouping::GroupKey;
use crate::island::Island;
use crate::{LineGeometry, MergedRoute, Position, RouteSegment};

/// Placeholder the source data uses for segments without a usable name.
pub const NAME_PLACEHOLDER: &str = "N/A";

/// Merge one group of segments into a single route.
///
/// Representative properties come from the first member with a real name
/// (present and not `"N/A"`), falling back to the first member. Coordinate
/// sequences are concatenated in member order; a single sequence stays a
/// `LineString`, more than one becomes a `MultiLineString`.
///
/// Returns [`ConsolidateError::EmptyGroup`] when the group contributes no
/// coordinate sequence at all, which the grouper must never produce.
pub fn merge_group(key: &GroupKey, members: &[RouteSegment]) -> Result<MergedRoute> {
    // First member with a real name wins; otherwise the first member.
    let representative = members
        .iter()
        .find(|member| member.name().is_some_and(|name| name != NAME_PLACEHOLDER))
        .or_else(|| members.first())
        .ok_or_else(|| ConsolidateError::EmptyGroup {
            key: key.route_id(),
        })?;

    let mut sequences: Vec<Vec<Position>> = Vec::new();
    for member in members {
        match &member.geometry {
            LineGeometry::LineString(coords) => sequences.push(coords.clone()),
            LineGeometry::MultiLineString(seqs) => sequences.extend(seqs.iter().cloned()),
        }
    }

    let geometry = match sequences.len() {
        0 => {
            return Err(ConsolidateError::EmptyGroup {
                key: key.route_id(),
            })
        }
        1 => LineGeometry::LineString(sequences.remove(0)),
        _ => LineGeometry::MultiLineString(sequences),
    };

    let raw_name = representative.name().unwrap_or(NAME_PLACEHOLDER);
    let name = if key.island == Island::PortoSanto && raw_name != NAME_PLACEHOLDER {
        format!("{raw_name} (Porto Santo)")
    } else {
        raw_name.to_string()
    };

    Ok(MergedRoute {
        id: key.route_id(),
        name,
        island: key.island,
        requires_payment: false,
        properties: representative.properties.clone(),
        geometry,
    })
}
