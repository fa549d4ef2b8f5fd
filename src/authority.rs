//! Paid-route authority providers.
//!
//! Two interchangeable sources yield the set of route ids that currently
//! require payment: the Simplifica payment portal (an HTML page listing
//! only paid routes per island) and a JSON status API. Both are best-effort
//! collaborators: any transport or parse failure, and an empty result,
//! surface as `None` so the pipeline degrades to its fallback policy
//! identically regardless of which provider was used.

use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use log::{info, warn};
use regex::Regex;
use serde::Deserialize;

use crate::normalize::normalize_ref;

/// Simplifica payment portal (lists only routes requiring payment).
pub const SIMPLIFICA_URL: &str = "https://simplifica.madeira.gov.pt/services/78-82-259";

/// Fixed timeout for the single best-effort fetch. No retries.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Section markers on the Simplifica page.
const MADEIRA_MARKER: &str = "Ilha da Madeira";
const PORTO_SANTO_MARKER: &str = "Ilha de Porto Santo";
const PORTO_SANTO_FALLBACK_MARKER: &str = "Porto Santo";

/// How far past a section marker route lines are searched, in bytes.
const MADEIRA_SECTION_SPAN: usize = 5000;
const PORTO_SANTO_SECTION_SPAN: usize = 1000;

/// Leading PR token at the start of a route line, e.g. "PR6.1 Vereda ...".
static PR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(PR\d+(?:\.\d+)?)\s+").unwrap());

/// Leading PR code inside an already-normalized ref.
static PR_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^PR\d+(?:\.\d+)?").unwrap());

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

/// A provider of the authoritative paid-route set.
///
/// Implementations must never abort the run: failures of any kind yield
/// `None` and the annotator applies its fallback policy.
pub trait AuthoritySource {
    /// Fetch the set of route ids that require payment, or `None`.
    fn fetch(&self) -> Option<HashSet<String>>;
}

// ============================================================================
// Simplifica portal (HTML)
// ============================================================================

/// The Simplifica payment portal, scraped as text.
#[derive(Debug, Clone)]
pub struct SimplificaPortal {
    url: String,
}

impl SimplificaPortal {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for SimplificaPortal {
    fn default() -> Self {
        Self::new(SIMPLIFICA_URL)
    }
}

impl AuthoritySource for SimplificaPortal {
    fn fetch(&self) -> Option<HashSet<String>> {
        info!("fetching official paid routes from {}", self.url);
        let body = fetch_text(&self.url)?;
        let ids = parse_paid_routes_html(&body);
        match &ids {
            Some(set) => info!("found {} paid routes on Simplifica", set.len()),
            None => warn!("could not extract any paid routes from {}", self.url),
        }
        ids
    }
}

/// Extract paid route ids from the Simplifica page.
///
/// The page lists Madeira routes under an "Ilha da Madeira" heading and
/// Porto Santo routes under "Ilha de Porto Santo"; each route line starts
/// with its PR code. Porto Santo ids get the `-PS` suffix. Returns `None`
/// when the Madeira marker is missing or no route line was found.
pub fn parse_paid_routes_html(html: &str) -> Option<HashSet<String>> {
    let text = html_to_text(html);

    let madeira_start = match text.find(MADEIRA_MARKER) {
        Some(index) => index,
        None => {
            warn!("could not find '{MADEIRA_MARKER}' section in authority page");
            return None;
        }
    };
    let porto_start = text[madeira_start..]
        .find(PORTO_SANTO_MARKER)
        .or_else(|| text[madeira_start..].find(PORTO_SANTO_FALLBACK_MARKER))
        .map(|offset| madeira_start + offset);

    let mut ids = HashSet::new();

    let madeira_end =
        porto_start.unwrap_or_else(|| clamp_boundary(&text, madeira_start + MADEIRA_SECTION_SPAN));
    collect_pr_lines(&text[madeira_start..madeira_end], "", &mut ids);

    if let Some(start) = porto_start {
        let end = clamp_boundary(&text, start + PORTO_SANTO_SECTION_SPAN);
        collect_pr_lines(&text[start..end], "-PS", &mut ids);
    }

    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}

/// Collect leading PR tokens from the lines of one island section.
fn collect_pr_lines(section: &str, suffix: &str, ids: &mut HashSet<String>) {
    for line in section.lines() {
        if let Some(captures) = PR_LINE.captures(line.trim()) {
            ids.insert(format!("{}{}", &captures[1], suffix));
        }
    }
}

/// Reduce an HTML document to text by replacing every tag with a newline.
///
/// Crude, but the scrape only needs section markers and line-leading PR
/// tokens to survive, not faithful text extraction.
fn html_to_text(html: &str) -> String {
    HTML_TAG.replace_all(html, "\n").into_owned()
}

/// Clamp a byte offset to the string length and back off to a char boundary.
fn clamp_boundary(text: &str, offset: usize) -> usize {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    end
}

// ============================================================================
// Status API (JSON)
// ============================================================================

/// A JSON status API whose `data` array carries route names to normalize.
#[derive(Debug, Clone)]
pub struct StatusApi {
    url: String,
}

impl StatusApi {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl AuthoritySource for StatusApi {
    fn fetch(&self) -> Option<HashSet<String>> {
        info!("fetching paid routes from status API at {}", self.url);
        let body = fetch_text(&self.url)?;
        let ids = parse_status_api_json(&body);
        match &ids {
            Some(set) => info!("found {} paid routes via status API", set.len()),
            None => warn!("could not extract any paid routes from {}", self.url),
        }
        ids
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: Vec<ApiEntry>,
}

#[derive(Debug, Deserialize)]
struct ApiEntry {
    #[serde(default)]
    name: String,
}

/// Extract route ids from a status API response.
///
/// Each entry's `name` is normalized and reduced to its leading PR code;
/// entries without one are skipped. Returns `None` on parse failure or when
/// nothing usable was found.
pub fn parse_status_api_json(body: &str) -> Option<HashSet<String>> {
    let response: ApiResponse = serde_json::from_str(body).ok()?;

    let ids: HashSet<String> = response
        .data
        .iter()
        .filter_map(|entry| {
            let normalized = normalize_ref(&entry.name);
            PR_KEY
                .find(&normalized)
                .map(|code| code.as_str().to_string())
        })
        .collect();

    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}

// ============================================================================
// Transport
// ============================================================================

/// Single best-effort GET with the fixed timeout.
fn fetch_text(url: &str) -> Option<String> {
    // The government portal serves a certificate chain that fails
    // verification, so it is disabled for these fetches.
    let client = match reqwest::blocking::Client::builder()
        .danger_accept_invalid_certs(true)
        .timeout(FETCH_TIMEOUT)
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            warn!("failed to build HTTP client: {err}");
            return None;
        }
    };

    match client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
    {
        Ok(text) => Some(text),
        Err(err) => {
            warn!("authority fetch from {url} failed: {err}");
            None
        }
    }
}
