use std::cmp::Reverse;

use serde::Serialize;

use crate::dates::{format_club_date, local_timestamp_millis, parse_club_date, parse_iso_timestamp};
use crate::model::{Article, Match, first_present};

/// Timestamp substituted when no date can be recovered.
pub const SENTINEL_TIMESTAMP: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchView {
    Played { round_tiebreak: bool },
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedArticle {
    pub article: Article,
    pub timestamp: i64,
    pub display_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedMatch {
    pub item: Match,
    pub timestamp: Option<i64>,
}

pub fn article_date_text(article: &Article) -> Option<&str> {
    first_present(&[article.date_text.as_deref(), article.date.as_deref()])
}

pub fn normalize_article(article: Article) -> NormalizedArticle {
    let parsed = parse_club_date(article_date_text(&article));
    NormalizedArticle {
        timestamp: parsed.map_or(SENTINEL_TIMESTAMP, local_timestamp_millis),
        display_date: format_club_date(parsed),
        article,
    }
}

/// Newest first. Equal timestamps keep their feed order.
pub fn order_articles(articles: Vec<Article>) -> Vec<NormalizedArticle> {
    let mut out: Vec<NormalizedArticle> = articles.into_iter().map(normalize_article).collect();
    out.sort_by_key(|a| Reverse(a.timestamp));
    out
}

/// The structured ISO field wins; the free-text date is the fallback.
pub fn match_timestamp(m: &Match) -> Option<i64> {
    if let Some(ts) = m.date_iso.as_deref().and_then(parse_iso_timestamp) {
        return Some(ts);
    }
    parse_club_date(m.date_text.as_deref()).map(local_timestamp_millis)
}

pub fn timed(m: Match) -> TimedMatch {
    TimedMatch {
        timestamp: match_timestamp(&m),
        item: m,
    }
}

/// Digits of a round label ("54. kolo" -> 54), 0 when there are none.
/// Labels carrying a season ("54. kolo 2025/2026") concatenate every digit;
/// values too long for `u64` saturate.
pub fn round_number(round: Option<&str>) -> u64 {
    let digits: String = round
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

pub fn order_matches(matches: Vec<Match>, view: MatchView, now_millis: i64) -> Vec<Match> {
    match view {
        MatchView::Played { round_tiebreak } => order_played(matches, round_tiebreak),
        MatchView::Upcoming => future_matches(matches, now_millis)
            .into_iter()
            .map(|t| t.item)
            .collect(),
    }
}

fn order_played(matches: Vec<Match>, round_tiebreak: bool) -> Vec<Match> {
    let mut rows: Vec<(i64, u64, Match)> = matches
        .into_iter()
        .map(|m| {
            let ts = match_timestamp(&m).unwrap_or(SENTINEL_TIMESTAMP);
            let round = if round_tiebreak {
                round_number(m.round.as_deref())
            } else {
                0
            };
            (ts, round, m)
        })
        .collect();
    rows.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
    rows.into_iter().map(|(_, _, m)| m).collect()
}

/// Matches strictly after `now_millis`, soonest first. Undated matches are dropped.
pub fn future_matches(matches: Vec<Match>, now_millis: i64) -> Vec<TimedMatch> {
    let mut out: Vec<TimedMatch> = matches
        .into_iter()
        .map(timed)
        .filter(|t| t.timestamp.is_some_and(|ts| ts > now_millis))
        .collect();
    out.sort_by_key(|t| t.timestamp.unwrap_or(SENTINEL_TIMESTAMP));
    out
}

/// Earliest future match across both lists, whatever their declared status.
/// Falls back to the match the API itself offered as "next".
pub fn select_next_match(
    upcoming: &[Match],
    played: &[Match],
    fallback: Option<&Match>,
    now_millis: i64,
) -> Option<Match> {
    let union: Vec<Match> = upcoming.iter().chain(played).cloned().collect();
    future_matches(union, now_millis)
        .into_iter()
        .next()
        .map(|t| t.item)
        .or_else(|| fallback.cloned())
}
