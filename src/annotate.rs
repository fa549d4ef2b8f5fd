//! Payment annotation.
//!
//! Applies the authoritative paid-route set to merged routes. When no
//! authority is available the fallback policy marks every route as paid,
//! which matches the current regime where all recommended routes require a
//! permit; the fallback is always logged, never silent.

use std::collections::HashSet;

use log::warn;

use crate::MergedRoute;

/// Diagnostics from an annotation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationReport {
    /// Authority entries that matched no produced route, sorted.
    ///
    /// Non-empty lists signal drift between the authority source and the
    /// geometry source.
    pub unmatched_authority: Vec<String>,
    /// Whether the all-paid fallback was applied.
    pub fallback_used: bool,
}

/// Set the payment flag on every route.
///
/// With an authority set, a route requires payment exactly when its id
/// (island-suffixed) appears in the set. Without one, every route is marked
/// as requiring payment.
pub fn annotate_routes(
    routes: &mut [MergedRoute],
    authority: Option<&HashSet<String>>,
) -> AnnotationReport {
    let Some(paid_ids) = authority else {
        warn!(
            "no payment authority available, marking all {} routes as requiring payment",
            routes.len()
        );
        for route in routes.iter_mut() {
            route.requires_payment = true;
        }
        return AnnotationReport {
            unmatched_authority: Vec::new(),
            fallback_used: true,
        };
    };

    let mut matched: HashSet<String> = HashSet::new();
    for route in routes.iter_mut() {
        route.requires_payment = paid_ids.contains(&route.id);
        if route.requires_payment {
            matched.insert(route.id.clone());
        }
    }

    let mut unmatched: Vec<String> = paid_ids
        .iter()
        .filter(|id| !matched.contains(*id))
        .cloned()
        .collect();
    unmatched.sort();

    if !unmatched.is_empty() {
        warn!(
            "{} authority entries matched no produced route: {}",
            unmatched.len(),
            unmatched.join(", ")
        );
    }

    AnnotationReport {
        unmatched_authority: unmatched,
        fallback_used: false,
    }
}
