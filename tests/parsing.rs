use std::fs;
use std::path::PathBuf;

use serde_json::{Value, json};

use hck_terminal::model::{
    MatchStatus, extract_items, parse_article_detail, parse_articles_json, parse_matches_json,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_items_envelope() {
    let raw = read_fixture("articles_items.json");
    let articles = parse_articles_json(&raw).expect("fixture should parse");
    assert_eq!(articles.len(), 4);
    assert_eq!(articles[0].title, "Oceli zvládli derby po predĺžení");
    assert_eq!(articles[0].card_image_url.as_deref(), Some("/data/images/derby.jpg"));
    assert_eq!(articles[2].date_text, None);
    assert_eq!(articles[3].date.as_deref(), Some("Aktualizované 9.1.2026 14:30"));
}

#[test]
fn parses_bare_array_and_coerces_numbers() {
    let raw = read_fixture("articles_bare.json");
    let articles = parse_articles_json(&raw).expect("fixture should parse");
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[1].title, "2026");
    assert_eq!(articles[1].date_text, None);
}

#[test]
fn parses_first_array_property() {
    let raw = read_fixture("matches_first_array.json");
    let matches = parse_matches_json(&raw).expect("fixture should parse");
    // "aa_meta" sorts first alphabetically but comes after "matches" in the document.
    assert_eq!(matches.len(), 3);
    assert!(matches.iter().all(|m| m.team_home != "ignored"));

    assert_eq!(matches[0].id.as_deref(), Some("9001"));
    assert_eq!(matches[0].status, MatchStatus::Played);
    assert!(!matches[0].match_is_win);
    assert_eq!(matches[0].score_periods.as_deref(), Some("(2:1, 1:1, 1:4)"));

    assert_eq!(matches[1].status, MatchStatus::Played);
    assert!(matches[1].is_win);
    assert_eq!(matches[1].match_score.as_deref(), Some("1:3"));

    assert_eq!(matches[2].status, MatchStatus::Upcoming);
    assert_eq!(matches[2].date_iso.as_deref(), Some("2026-01-14T18:00:00+01:00"));
}

#[test]
fn parses_data_envelope_with_missing_status() {
    let raw = read_fixture("matches_data.json");
    let matches = parse_matches_json(&raw).expect("fixture should parse");
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[1].status, MatchStatus::Upcoming);
    assert_eq!(matches[1].team_home, "Vlci Žilina");
}

#[test]
fn unwraps_article_detail() {
    let raw = read_fixture("article_detail.json");
    let value: Value = serde_json::from_str(&raw).expect("fixture should be json");
    let article = parse_article_detail(&value).expect("detail present");
    assert_eq!(article.url, "https://www.hckosice.sk/clanky/derby");
    assert!(article.content_html.is_some_and(|html| html.contains("predĺžení")));
}

#[test]
fn article_detail_envelopes() {
    let bare = json!({ "title": "A", "url": "u" });
    assert_eq!(parse_article_detail(&bare).map(|a| a.title), Some("A".to_string()));
    let wrapped = json!({ "article": { "title": "B" } });
    assert_eq!(parse_article_detail(&wrapped).map(|a| a.title), Some("B".to_string()));
    assert_eq!(parse_article_detail(&json!([1, 2])), None);
    assert_eq!(parse_article_detail(&Value::Null), None);
}

#[test]
fn unknown_shapes_are_empty() {
    assert!(extract_items(&json!({ "ok": true })).is_empty());
    assert!(extract_items(&json!("items")).is_empty());
    assert!(extract_items(&Value::Null).is_empty());
    assert!(parse_matches_json("").expect("empty body is fine").is_empty());
    assert!(parse_matches_json("{not json").is_err());
}
