use std::collections::HashMap;

use chrono::{
    DateTime, Datelike, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta,
    TimeZone,
};
use once_cell::sync::Lazy;
use regex::Regex;

pub const TODAY_PLACEHOLDER: &str = "Dnes";

const MONTHS_NOMINATIVE: [&str; 12] = [
    "január",
    "február",
    "marec",
    "apríl",
    "máj",
    "jún",
    "júl",
    "august",
    "september",
    "október",
    "november",
    "december",
];

const MONTHS_GENITIVE: [&str; 12] = [
    "januára",
    "februára",
    "marca",
    "apríla",
    "mája",
    "júna",
    "júla",
    "augusta",
    "septembra",
    "októbra",
    "novembra",
    "decembra",
];

const NOISE_MARKERS: [&str; 2] = ["pridané", "aktualizované"];
const DEFAULT_HOUR: u32 = 12;

static MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(24);
    for (idx, name) in MONTHS_NOMINATIVE.iter().enumerate() {
        map.insert(*name, idx as u32 + 1);
    }
    for (idx, name) in MONTHS_GENITIVE.iter().enumerate() {
        map.insert(*name, idx as u32 + 1);
    }
    map
});

static TEXT_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\.\s*([a-záäčďéíĺľňóôŕšťúýž]+)\s*(\d{4})").expect("valid text date regex")
});
static NUMERIC_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2})\.\s*(\d{1,2})\.\s*(\d{4})").expect("valid numeric date regex")
});
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}):(\d{2})").expect("valid time regex"));

/// Parses the club's free-text dates ("11. januára 2026 18:00", "8.1.2026",
/// "PRIDANÉ 08. 01. 2026") into a local wall-clock value.
///
/// Out-of-range components (day 32, month 13, 31 February, hour 25) are
/// rejected rather than rolled over into the next month.
pub fn parse_club_date(text: Option<&str>) -> Option<NaiveDateTime> {
    let text = text?;
    let clean = strip_noise(&text.to_lowercase());
    if clean.is_empty() {
        return None;
    }

    if let Some(caps) = TEXT_DATE_RE.captures(&clean)
        && let Some(month) = MONTHS.get(&caps[2])
    {
        let day = caps[1].parse::<u32>().ok()?;
        let year = caps[3].parse::<i32>().ok()?;
        return build(year, *month, day, &clean);
    }

    let caps = NUMERIC_DATE_RE.captures(&clean)?;
    let day = caps[1].parse::<u32>().ok()?;
    let month = caps[2].parse::<u32>().ok()?;
    let year = caps[3].parse::<i32>().ok()?;
    build(year, month, day, &clean)
}

/// Renders as `<day>. <genitive month> <year>`, or the "today" placeholder.
pub fn format_club_date(date: Option<NaiveDateTime>) -> String {
    let Some(date) = date else {
        return TODAY_PLACEHOLDER.to_string();
    };
    let month = MONTHS_GENITIVE[date.month0() as usize];
    format!("{}. {} {}", date.day(), month, date.year())
}

pub fn local_timestamp_millis(date: NaiveDateTime) -> i64 {
    wall_clock_millis(&Local, date)
}

// Ambiguous times take the earlier instant; times skipped by a DST jump are
// rolled forward by the one-hour gap.
fn wall_clock_millis<Tz: TimeZone>(tz: &Tz, date: NaiveDateTime) -> i64 {
    match tz.from_local_datetime(&date) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.timestamp_millis(),
        LocalResult::None => match date
            .checked_add_signed(TimeDelta::hours(1))
            .map(|later| tz.from_local_datetime(&later))
        {
            Some(LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _)) => dt.timestamp_millis(),
            _ => date.and_utc().timestamp_millis(),
        },
    }
}

/// Parses the structured `date_iso` field. Offset-less date-times are local,
/// bare dates are UTC midnight.
pub fn parse_iso_timestamp(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.timestamp_millis());
    }

    const LOCAL_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(local_timestamp_millis(naive));
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

fn strip_noise(lowered: &str) -> String {
    let mut out = lowered.to_string();
    for marker in NOISE_MARKERS {
        while let Some(pos) = out.find(marker) {
            let rest = out[pos + marker.len()..].trim_start();
            out = format!("{}{}", &out[..pos], rest);
        }
    }
    out.trim().to_string()
}

fn build(year: i32, month: u32, day: u32, text: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = match TIME_RE.captures(text) {
        Some(caps) => {
            let hour = caps[1].parse::<u32>().ok()?;
            let minute = caps[2].parse::<u32>().ok()?;
            NaiveTime::from_hms_opt(hour, minute, 0)?
        }
        None => NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0)?,
    };
    Some(NaiveDateTime::new(date, time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    const HOUR: i32 = 3600;

    /// Central European zone reduced to the 2026 spring transition:
    /// 02:00 local on 29 March jumps to 03:00.
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    fn transition_local() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 29)
            .and_then(|d| d.and_hms_opt(2, 0, 0))
            .expect("valid transition")
    }

    fn winter() -> FixedOffset {
        FixedOffset::east_opt(HOUR).expect("valid offset")
    }

    fn summer() -> FixedOffset {
        FixedOffset::east_opt(2 * HOUR).expect("valid offset")
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, _local: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::Single(winter())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let start = transition_local();
            if *local < start {
                LocalResult::Single(winter())
            } else if *local < start + TimeDelta::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(summer())
            }
        }

        fn offset_from_utc_date(&self, _utc: &NaiveDate) -> FixedOffset {
            winter()
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < transition_local() - TimeDelta::hours(1) {
                winter()
            } else {
                summer()
            }
        }
    }

    fn local(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 29)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .expect("valid time")
    }

    fn utc_millis(h: u32, m: u32) -> i64 {
        local(h, m).and_utc().timestamp_millis()
    }

    #[test]
    fn skipped_wall_clock_rolls_forward() {
        // 02:30 does not exist; it lands on 03:30 CEST (01:30 UTC).
        assert_eq!(wall_clock_millis(&SpringForward, local(2, 30)), utc_millis(1, 30));
        assert!(
            wall_clock_millis(&SpringForward, local(2, 30))
                > wall_clock_millis(&SpringForward, local(1, 59))
        );
    }

    #[test]
    fn wall_clock_outside_the_gap_is_unchanged() {
        assert_eq!(wall_clock_millis(&SpringForward, local(1, 30)), utc_millis(0, 30));
        assert_eq!(wall_clock_millis(&SpringForward, local(3, 15)), utc_millis(1, 15));
    }

    #[test]
    fn strip_noise_removes_markers_and_following_space() {
        assert_eq!(strip_noise("pridané  8.1.2026"), "8.1.2026");
        assert_eq!(strip_noise("aktualizované 8.1.2026 pridané"), "8.1.2026");
        assert_eq!(strip_noise("  "), "");
    }

    #[test]
    fn vocabularies_share_indices() {
        assert_eq!(MONTHS.get("máj"), Some(&5));
        assert_eq!(MONTHS.get("mája"), Some(&5));
        assert_eq!(MONTHS.len(), 24);
    }
}
