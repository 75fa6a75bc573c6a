use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::images::{article_image, team_logo};
use crate::model::{Article, Match, MatchStatus, first_present};
use crate::ordering::{NormalizedArticle, article_date_text};
use crate::score::{ResolvedScore, ScoreLine, resolve_score};

const DEFAULT_HOME_NAME: &str = "HC Košice";
const DEFAULT_AWAY_NAME: &str = "Súper";
const DEFAULT_ROUND: &str = "Tipsport Extraliga";
const DATE_TBD: &str = "Termín v riešení";
const UNTITLED: &str = "Bez názvu";
const NO_CONTENT: &str = "Obsah článku nie je k dispozícii.";
const TODAY: &str = "Dnes";

static BLOCK_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<\s*(br\s*/?|/p|/div|/h[1-6]|/li)\s*>").expect("valid block break regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static BLANK_LINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n\s*\n+").expect("valid blank lines regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Self::Win => "VÝHRA",
            Self::Loss => "PREHRA",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchCard {
    pub home_name: String,
    pub away_name: String,
    pub home_logo: String,
    pub away_logo: String,
    pub round: String,
    pub date: String,
    pub score: String,
    pub periods: Option<String>,
    /// Only set for played matches.
    pub outcome: Option<Outcome>,
    pub not_played: bool,
}

impl MatchCard {
    pub fn from_match(m: &Match) -> Self {
        let home_name = non_blank_or(&m.team_home, DEFAULT_HOME_NAME);
        let away_name = non_blank_or(&m.team_away, DEFAULT_AWAY_NAME);
        let ScoreLine {
            score,
            subtitle,
            is_win,
        } = resolve_score(m);
        let outcome = (m.status == MatchStatus::Played).then_some(if is_win {
            Outcome::Win
        } else {
            Outcome::Loss
        });

        Self {
            home_logo: team_logo(m.logo_home_url.as_deref(), &home_name),
            away_logo: team_logo(m.logo_away_url.as_deref(), &away_name),
            home_name,
            away_name,
            round: first_present(&[m.round.as_deref()])
                .unwrap_or(DEFAULT_ROUND)
                .to_string(),
            date: first_present(&[m.date_text.as_deref()])
                .unwrap_or(DATE_TBD)
                .to_string(),
            not_played: score == ResolvedScore::NotPlayed,
            score: score.to_string(),
            periods: subtitle,
            outcome,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleCard {
    pub title: String,
    pub url: String,
    pub image: String,
    pub date: String,
}

impl ArticleCard {
    pub fn from_normalized(item: &NormalizedArticle) -> Self {
        Self {
            title: non_blank_or(&item.article.title, UNTITLED),
            url: item.article.url.clone(),
            image: article_image(&item.article),
            date: item.display_date.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleView {
    pub title: String,
    pub date: String,
    pub image: String,
    pub body: String,
}

impl ArticleView {
    pub fn from_article(article: &Article) -> Self {
        let body = match first_present(&[article.content_html.as_deref()]) {
            Some(html) => html_to_text(html),
            None => first_present(&[article.content_text.as_deref()])
                .unwrap_or(NO_CONTENT)
                .to_string(),
        };
        Self {
            title: non_blank_or(&article.title, UNTITLED),
            date: article_date_text(article).unwrap_or(TODAY).to_string(),
            image: article_image(article),
            body,
        }
    }
}

/// Flattens an article body to terminal text: block ends become line breaks,
/// remaining tags are dropped, common entities decoded.
pub fn html_to_text(html: &str) -> String {
    let broken = BLOCK_BREAK_RE.replace_all(html, "\n");
    let stripped = TAG_RE.replace_all(&broken, "");
    let decoded = html_decode(&stripped);
    let lines: Vec<&str> = decoded.lines().map(str::trim).collect();
    let joined = lines.join("\n");
    BLANK_LINES_RE
        .replace_all(joined.trim(), "\n\n")
        .into_owned()
}

fn html_decode(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&#x2F;", "/")
        .replace("&amp;", "&")
}

fn non_blank_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
