//! Reference-code normalization.
//!
//! Raw `ref` tags come in several shapes for the same logical route:
//! `"PR8"`, `"PR 8"`, `"PR8 | Vereda do Areeiro"`. Normalization reduces all
//! of them to one stable key so segments group correctly.

use std::sync::LazyLock;

use regex::Regex;

/// Whitespace between the PR prefix and the route number.
static PR_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)PR\s+").unwrap());

/// Normalize a raw PR reference code for matching.
///
/// - Everything after the first `|` is dropped (raw refs may carry a
///   trailing free-text name).
/// - Whitespace between `PR` and the digits is collapsed, preserving
///   decimal sub-route numbers.
/// - The result is uppercased.
///
/// Unrecognized prefixes pass through uppercased and trimmed; they simply
/// never match a known PR route downstream. An empty input yields an empty
/// string, which callers must treat as unclassifiable.
///
/// # Example
/// ```
/// use trailmerge::normalize_ref;
///
/// assert_eq!(normalize_ref("PR 8"), "PR8");
/// assert_eq!(normalize_ref("PR8 | Vereda do Areeiro"), "PR8");
/// assert_eq!(normalize_ref("pr 6.1"), "PR6.1");
/// assert_eq!(normalize_ref(""), "");
/// ```
pub fn normalize_ref(raw: &str) -> String {
    let head = raw.split('|').next().unwrap_or(raw).trim();
    PR_PREFIX.replace_all(head, "PR").to_uppercase()
}
