//! Tests for the authority module (parsing only; transport is best-effort)

use trailmerge::authority::{parse_paid_routes_html, parse_status_api_json};

const PORTAL_PAGE: &str = r#"
<html><body>
<h1>Acesso aos percursos pedestres recomendados</h1>
<h2>Ilha da Madeira</h2>
<ul>
<li>PR1 Vereda do Areeiro</li>
<li>PR6.1 Vereda das 25 Fontes</li>
<li>PR8 Vereda da Ponta de São Lourenço</li>
<li>Levada do Caldeirão Verde</li>
</ul>
<h2>Ilha de Porto Santo</h2>
<ul>
<li>PR1 Vereda do Pico Branco</li>
</ul>
</body></html>
"#;

#[test]
fn test_parse_portal_page() {
    let ids = parse_paid_routes_html(PORTAL_PAGE).expect("page should parse");

    assert_eq!(ids.len(), 4);
    assert!(ids.contains("PR1"));
    assert!(ids.contains("PR6.1"));
    assert!(ids.contains("PR8"));
    assert!(ids.contains("PR1-PS"));
}

#[test]
fn test_porto_santo_section_gets_suffix_only() {
    let ids = parse_paid_routes_html(PORTAL_PAGE).unwrap();

    // The Madeira PR1 and the Porto Santo PR1 are distinct entries.
    assert!(ids.contains("PR1"));
    assert!(ids.contains("PR1-PS"));
    assert!(!ids.contains("PR8-PS"));
}

#[test]
fn test_missing_madeira_marker_yields_none() {
    let page = "<html><body><p>PR1 Vereda do Areeiro</p></body></html>";
    assert!(parse_paid_routes_html(page).is_none());
}

#[test]
fn test_marker_without_routes_yields_none() {
    let page = "<html><body><h2>Ilha da Madeira</h2><p>sem percursos</p></body></html>";
    assert!(parse_paid_routes_html(page).is_none());
}

#[test]
fn test_page_without_porto_santo_section() {
    let page = r#"
<h2>Ilha da Madeira</h2>
<p>PR1 Vereda do Areeiro</p>
<p>PR8 Vereda da Ponta de São Lourenço</p>
"#;
    let ids = parse_paid_routes_html(page).unwrap();

    assert_eq!(ids.len(), 2);
    assert!(ids.contains("PR1"));
    assert!(ids.contains("PR8"));
}

#[test]
fn test_parse_status_api_response() {
    let body = r#"{
        "data": [
            { "name": "PR 1 Vereda do Areeiro" },
            { "name": "PR6.1 Vereda das 25 Fontes" },
            { "name": "Levada do Caldeirão Verde" }
        ]
    }"#;

    let ids = parse_status_api_json(body).expect("response should parse");

    assert_eq!(ids.len(), 2);
    assert!(ids.contains("PR1"));
    assert!(ids.contains("PR6.1"));
}

#[test]
fn test_invalid_json_yields_none() {
    assert!(parse_status_api_json("not json").is_none());
}

#[test]
fn test_empty_data_yields_none() {
    assert!(parse_status_api_json(r#"{ "data": [] }"#).is_none());
    assert!(parse_status_api_json(r#"{}"#).is_none());
}
