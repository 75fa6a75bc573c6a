use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub header_image_url: Option<String>,
    pub card_image_url: Option<String>,
    pub image: Option<String>,
    pub date_text: Option<String>,
    pub date: Option<String>,
    pub content_html: Option<String>,
    pub content_text: Option<String>,
}

impl Article {
    pub fn from_value(value: &Value) -> Self {
        Self {
            title: pick_string(value, &["title"]).unwrap_or_default(),
            url: pick_string(value, &["url"]).unwrap_or_default(),
            header_image_url: pick_string(value, &["header_image_url"]),
            card_image_url: pick_string(value, &["card_image_url"]),
            image: pick_string(value, &["image"]),
            date_text: pick_string(value, &["date_text"]),
            date: pick_string(value, &["date"]),
            content_html: pick_string(value, &["content_html"]),
            content_text: pick_string(value, &["content_text"]),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Played,
    Live,
}

impl MatchStatus {
    // Unknown tags are treated as not yet played so no score is ever shown for them.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_lowercase()).as_deref() {
            Some("played") => Self::Played,
            Some("live") => Self::Live,
            _ => Self::Upcoming,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Played => "played",
            Self::Live => "live",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: Option<String>,
    pub team_home: String,
    pub team_away: String,
    pub logo_home_url: Option<String>,
    pub logo_away_url: Option<String>,
    pub score: Option<String>,
    pub match_score: Option<String>,
    pub score_periods: Option<String>,
    pub is_win: bool,
    pub match_is_win: bool,
    pub status: MatchStatus,
    pub date_text: Option<String>,
    pub date_iso: Option<String>,
    pub match_time: Option<String>,
    pub venue: Option<String>,
    pub round: Option<String>,
}

impl Match {
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: pick_string(value, &["id"]),
            team_home: pick_string(value, &["team_home"]).unwrap_or_default(),
            team_away: pick_string(value, &["team_away"]).unwrap_or_default(),
            logo_home_url: pick_string(value, &["logo_home_url"]),
            logo_away_url: pick_string(value, &["logo_away_url"]),
            score: pick_string(value, &["score"]),
            match_score: pick_string(value, &["match_score"]),
            score_periods: pick_string(value, &["score_periods"]),
            is_win: pick_flag(value, "is_win"),
            match_is_win: pick_flag(value, "match_is_win"),
            status: MatchStatus::from_tag(pick_string(value, &["status"]).as_deref()),
            date_text: pick_string(value, &["date_text"]),
            date_iso: pick_string(value, &["date_iso"]),
            match_time: pick_string(value, &["match_time"]),
            venue: pick_string(value, &["venue"]),
            round: pick_string(value, &["round"]),
        }
    }
}

/// Unwraps a collection payload: a bare array, an `items` or `data` envelope, or
/// the first array-valued property of an arbitrary object (in document order).
pub fn extract_items(data: &Value) -> &[Value] {
    match data {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => {
            for key in ["items", "data"] {
                if let Some(Value::Array(items)) = map.get(key) {
                    return items.as_slice();
                }
            }
            map.values()
                .find_map(|v| v.as_array())
                .map(Vec::as_slice)
                .unwrap_or(&[])
        }
        _ => &[],
    }
}

pub fn parse_articles(data: &Value) -> Vec<Article> {
    extract_items(data)
        .iter()
        .filter(|v| v.is_object())
        .map(Article::from_value)
        .collect()
}

pub fn parse_matches(data: &Value) -> Vec<Match> {
    extract_items(data)
        .iter()
        .filter(|v| v.is_object())
        .map(Match::from_value)
        .collect()
}

/// Article detail responses come wrapped in `item`, `article`, or not at all.
pub fn parse_article_detail(data: &Value) -> Option<Article> {
    let inner = ["item", "article"]
        .iter()
        .find_map(|key| data.get(*key).filter(|v| v.is_object()))
        .unwrap_or(data);
    if !inner.is_object() {
        return None;
    }
    Some(Article::from_value(inner))
}

pub fn parse_articles_json(raw: &str) -> anyhow::Result<Vec<Article>> {
    Ok(parse_articles(&parse_payload(raw)?))
}

pub fn parse_matches_json(raw: &str) -> anyhow::Result<Vec<Match>> {
    Ok(parse_matches(&parse_payload(raw)?))
}

fn parse_payload(raw: &str) -> anyhow::Result<Value> {
    use anyhow::Context;

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(trimmed).context("invalid api json")
}

/// First of `candidates` holding a non-blank value.
pub fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|s| !s.trim().is_empty())
}

pub fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(s) = value.get(*key).and_then(as_string) {
            return Some(s);
        }
    }
    None
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// Win markers arrive as booleans or as 0/1.
fn pick_flag(value: &Value, key: &str) -> bool {
    match value.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f == 1.0),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pick_string_skips_blank_and_non_scalar_values() {
        let v = json!({"a": "  ", "b": {"x": 1}, "c": 42});
        assert_eq!(pick_string(&v, &["a", "b", "c"]).as_deref(), Some("42"));
        assert!(pick_string(&v, &["a", "b"]).is_none());
    }

    #[test]
    fn flag_accepts_true_and_one_only() {
        let v = json!({"t": true, "one": 1, "onef": 1.0, "zero": 0, "s": "1", "two": 2});
        assert!(pick_flag(&v, "t"));
        assert!(pick_flag(&v, "one"));
        assert!(pick_flag(&v, "onef"));
        assert!(!pick_flag(&v, "zero"));
        assert!(!pick_flag(&v, "s"));
        assert!(!pick_flag(&v, "two"));
        assert!(!pick_flag(&v, "missing"));
    }

    #[test]
    fn first_present_skips_empty() {
        assert_eq!(first_present(&[None, Some(""), Some("x")]), Some("x"));
        assert_eq!(first_present(&[None, Some("  ")]), None);
    }

    #[test]
    fn status_tags() {
        assert_eq!(MatchStatus::from_tag(Some("PLAYED")), MatchStatus::Played);
        assert_eq!(MatchStatus::from_tag(Some("live")), MatchStatus::Live);
        assert_eq!(MatchStatus::from_tag(Some("postponed")), MatchStatus::Upcoming);
        assert_eq!(MatchStatus::from_tag(None), MatchStatus::Upcoming);
    }
}
