use chrono::{Duration as ChronoDuration, Local, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};

use crate::api::{ClubApi, MatchStatusQuery};
use crate::dates::format_club_date;
use crate::model::{self, Article, Match};

const HOME_TEAM: &str = "HC Košice";
const OPPONENTS: [&str; 11] = [
    "HK Nitra",
    "HC Slovan Bratislava",
    "HK Dukla Michalovce",
    "HK Poprad",
    "HC 05 Banská Bystrica",
    "MHK 32 Liptovský Mikuláš",
    "HK Spišská Nová Ves",
    "HKM Zvolen",
    "HK Dukla Trenčín",
    "HC Nové Zámky",
    "Vlci Žilina",
];
const HEADLINES: [&str; 8] = [
    "Oceli zvládli derby po predĺžení",
    "Tréner pred víkendovým dvojzápasom",
    "Vstupenky na domáce zápasy v predaji",
    "Kapitán predĺžil zmluvu o dva roky",
    "Juniori postúpili do play-off",
    "Mládežnícky turnaj v Steel aréne",
    "Rozhovor s brankárom po šiestom shutoute",
    "Zmena času začiatku zápasu",
];

/// Offline stand-in for the club API. Payloads are generated once, relative to
/// the current time, in the same untidy shapes the real backend produces.
pub struct DemoApi {
    articles: Value,
    upcoming: Value,
    played: Value,
}

impl DemoApi {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let now = Local::now().naive_local();
        let base = now.with_minute(0).and_then(|t| t.with_second(0)).unwrap_or(now);
        let mut opponents = OPPONENTS.to_vec();
        opponents.shuffle(&mut rng);

        let played_rounds = 10u32;
        let played: Vec<Value> = (0..played_rounds)
            .map(|i| {
                let round = i + 1;
                let when = base - ChronoDuration::days(i64::from(3 * (played_rounds - i)));
                seed_played(&mut rng, round, when, opponents[i as usize % opponents.len()])
            })
            .collect();
        let upcoming: Vec<Value> = (0..6u32)
            .map(|i| {
                let round = played_rounds + i + 1;
                let when = base + ChronoDuration::days(i64::from(2 + 3 * i));
                seed_upcoming(&mut rng, round, when, opponents[(round as usize) % opponents.len()])
            })
            .collect();
        let articles: Vec<Value> = HEADLINES
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let when = base - ChronoDuration::hours(rng.gen_range(2..36) * (i as i64 + 1));
                seed_article(&mut rng, i, title, when)
            })
            .collect();

        Self {
            articles: json!({ "items": articles, "success": true }),
            upcoming: json!({ "data": upcoming }),
            played: json!({ "count": played.len(), "matches": played }),
        }
    }
}

impl Default for DemoApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ClubApi for DemoApi {
    fn fetch_articles(&self, limit: usize) -> Vec<Article> {
        let mut items = model::parse_articles(&self.articles);
        items.truncate(limit);
        items
    }

    fn fetch_matches(&self, status: MatchStatusQuery, limit: usize) -> Vec<Match> {
        let payload = match status {
            MatchStatusQuery::Upcoming => &self.upcoming,
            MatchStatusQuery::Played => &self.played,
        };
        let mut items = model::parse_matches(payload);
        items.truncate(limit);
        items
    }

    fn fetch_article_detail(&self, url: &str) -> Option<Article> {
        model::extract_items(&self.articles)
            .iter()
            .find(|a| a.get("url").and_then(Value::as_str) == Some(url))
            .and_then(|a| model::parse_article_detail(&json!({ "item": a })))
    }

    fn fetch_health(&self) -> bool {
        true
    }
}

fn seed_played(rng: &mut StdRng, round: u32, when: NaiveDateTime, opponent: &str) -> Value {
    let at_home = rng.gen_bool(0.5);
    let periods: Vec<(u32, u32)> = (0..3).map(|_| (rng.gen_range(0..3), rng.gen_range(0..3))).collect();
    let home_goals: u32 = periods.iter().map(|p| p.0).sum();
    let away_goals: u32 = periods.iter().map(|p| p.1).sum();
    let club_won = if at_home {
        home_goals > away_goals
    } else {
        away_goals > home_goals
    };
    let period_text = periods
        .iter()
        .map(|(h, a)| format!("{h}:{a}"))
        .collect::<Vec<_>>()
        .join(", ");
    let (team_home, team_away) = if at_home {
        (HOME_TEAM, opponent)
    } else {
        (opponent, HOME_TEAM)
    };

    let mut m = json!({
        "id": format!("played-{round}"),
        "team_home": team_home,
        "team_away": team_away,
        "status": "played",
        "round": format!("{round}. kolo"),
        "date_text": when.format("%-d.%-m.%Y %H:%M").to_string(),
        "venue": if at_home { "Steel aréna" } else { "" },
    });
    // Mix of the shapes the backend is known to send.
    match round % 3 {
        0 => {
            m["score_periods"] = json!(format!("({period_text})"));
            m["is_win"] = json!(club_won);
        }
        1 => {
            m["score_periods"] = json!(period_text);
            m["match_is_win"] = json!(u8::from(club_won));
        }
        _ => {
            m["match_score"] = json!(format!("{home_goals}:{away_goals}"));
            m["date_iso"] = json!(when.format("%Y-%m-%dT%H:%M:%S").to_string());
            m["is_win"] = json!(u8::from(club_won));
        }
    }
    m
}

fn seed_upcoming(rng: &mut StdRng, round: u32, when: NaiveDateTime, opponent: &str) -> Value {
    let at_home = round % 2 == 0;
    let hour = *[17u32, 18, 19].choose(rng).unwrap_or(&18);
    let when = when.with_hour(hour).unwrap_or(when);
    let (team_home, team_away) = if at_home {
        (HOME_TEAM, opponent)
    } else {
        (opponent, HOME_TEAM)
    };
    let date_text = format!(
        "{} {}",
        format_club_date(Some(when)),
        when.format("%H:%M")
    );
    let mut m = json!({
        "id": format!("upcoming-{round}"),
        "team_home": team_home,
        "team_away": team_away,
        "status": "upcoming",
        "round": format!("{round}. kolo"),
        "date_text": date_text,
    });
    if round % 2 == 1 {
        m["date_iso"] = json!(when.format("%Y-%m-%dT%H:%M:%S").to_string());
    }
    m
}

fn seed_article(rng: &mut StdRng, idx: usize, title: &str, when: NaiveDateTime) -> Value {
    let slug = title.to_lowercase().replace(' ', "-");
    let url = format!("https://www.hckosice.sk/clanky/{slug}");
    let date_text = if rng.gen_bool(0.5) {
        format!("PRIDANÉ {}", when.format("%d. %m. %Y"))
    } else {
        format_club_date(Some(when))
    };
    let body = format!(
        "<p>{title}.</p><p>Viac informácií prinesieme po zápase. Sledujte oficiálne kanály klubu.</p>"
    );
    let mut a = json!({
        "title": title,
        "url": url,
        "date_text": date_text,
        "content_html": body,
    });
    match idx % 4 {
        0 => a["card_image_url"] = json!(format!("/data/images/clanok-{idx}.jpg")),
        1 => a["header_image_url"] = json!(format!(r#"<img class="header" src="//cdn.hckosice.sk/img/{idx}.jpg">"#)),
        2 => a["image"] = json!("null"),
        _ => {}
    }
    a
}
