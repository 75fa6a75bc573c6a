use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Match, MatchStatus, first_present};

pub const NOT_PLAYED_LABEL: &str = "VS";
pub const UNDETERMINED_LABEL: &str = "–";

// Some feeds put the win/lose marker into the score field.
const OUTCOME_SENTINELS: [&str; 2] = ["win", "lose"];

static PERIOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*:\s*(\d+)").expect("valid period score regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTotals {
    pub home: u32,
    pub away: u32,
}

impl fmt::Display for PeriodTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.home, self.away)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedScore {
    Totals { home: u32, away: u32 },
    Reported(String),
    Undetermined,
    NotPlayed,
}

impl fmt::Display for ResolvedScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Totals { home, away } => write!(f, "{home}:{away}"),
            Self::Reported(raw) => f.write_str(raw),
            Self::Undetermined => f.write_str(UNDETERMINED_LABEL),
            Self::NotPlayed => f.write_str(NOT_PLAYED_LABEL),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLine {
    pub score: ResolvedScore,
    /// Per-period breakdown, shown under the score when the total came from it.
    pub subtitle: Option<String>,
    pub is_win: bool,
}

/// Sums every `home:away` pair found anywhere in the text.
pub fn total_from_periods(periods: Option<&str>) -> Option<PeriodTotals> {
    let periods = periods?;
    let mut totals = PeriodTotals { home: 0, away: 0 };
    let mut found = false;
    for caps in PERIOD_RE.captures_iter(periods) {
        totals.home = totals.home.saturating_add(goals(&caps[1]));
        totals.away = totals.away.saturating_add(goals(&caps[2]));
        found = true;
    }
    found.then_some(totals)
}

// Matched digits only fail to parse on overflow.
fn goals(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

pub fn is_win(m: &Match) -> bool {
    m.is_win || m.match_is_win
}

pub fn resolve_score(m: &Match) -> ScoreLine {
    let is_win = is_win(m);
    if m.status != MatchStatus::Played {
        return ScoreLine {
            score: ResolvedScore::NotPlayed,
            subtitle: None,
            is_win,
        };
    }

    if let Some(totals) = total_from_periods(m.score_periods.as_deref()) {
        return ScoreLine {
            score: ResolvedScore::Totals {
                home: totals.home,
                away: totals.away,
            },
            subtitle: m.score_periods.clone(),
            is_win,
        };
    }

    let score = match first_present(&[m.score.as_deref(), m.match_score.as_deref()]) {
        Some(raw) if !OUTCOME_SENTINELS.contains(&raw.to_lowercase().as_str()) => {
            ResolvedScore::Reported(raw.to_string())
        }
        _ => ResolvedScore::Undetermined,
    };
    ScoreLine {
        score,
        subtitle: None,
        is_win,
    }
}
