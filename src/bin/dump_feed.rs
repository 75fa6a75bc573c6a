use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use serde_json::json;

use hck_terminal::api::{ClubApi, HttpApi};
use hck_terminal::cards::{ArticleCard, ArticleView, MatchCard};
use hck_terminal::config::{Config, Source};
use hck_terminal::demo_feed::DemoApi;
use hck_terminal::feed::{self, now_millis};
use hck_terminal::logging;
use hck_terminal::state::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Home,
    Matches,
    News,
    Article,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    logging::init_stderr();

    let mut config = Config::from_env();
    if has_flag("--demo") {
        config.source = Source::Demo;
    }
    let view = parse_view_arg()?;
    let as_json = has_flag("--json");

    let api: Arc<dyn ClubApi> = match config.source {
        Source::Api => Arc::new(HttpApi::new(&config)?),
        Source::Demo => match parse_seed_arg() {
            Some(seed) => Arc::new(DemoApi::seeded(seed)),
            None => Arc::new(DemoApi::new()),
        },
    };
    let api = api.as_ref();
    let now = now_millis();

    match view {
        View::Home => {
            let home = ready_or_err(feed::load_home(api, &config, now), "home")?;
            let next = home.next_match.as_ref().map(MatchCard::from_match);
            let hero = home.latest_article.as_ref().map(ArticleCard::from_normalized);
            let articles: Vec<ArticleCard> = home
                .latest_articles
                .iter()
                .map(ArticleCard::from_normalized)
                .collect();
            if as_json {
                print_json(&json!({ "hero": hero, "next_match": next, "articles": articles }))?;
            } else {
                if let Some(card) = &hero {
                    println!("Hero");
                    println!("  {}", card.title);
                    println!("  {} | {}", card.date, card.image);
                }
                println!("Next match");
                match &next {
                    Some(card) => println!("  {}", match_line(card)),
                    None => println!("  Program ďalšieho kola čoskoro"),
                }
                println!("Articles ({})", articles.len());
                for card in &articles {
                    println!("  {:<20} {}", card.date, card.title);
                }
            }
        }
        View::Matches => {
            let data = ready_or_err(feed::load_matches(api, &config, now), "matches")?;
            let played: Vec<MatchCard> = data.played.iter().map(MatchCard::from_match).collect();
            let upcoming: Vec<MatchCard> =
                data.upcoming.iter().map(MatchCard::from_match).collect();
            if as_json {
                print_json(&json!({ "played": played, "upcoming": upcoming }))?;
            } else {
                println!("Výsledky ({})", played.len());
                for card in &played {
                    println!("  {}", match_line(card));
                }
                println!("Kalendár ({})", upcoming.len());
                for card in &upcoming {
                    println!("  {}", match_line(card));
                }
            }
        }
        View::News => {
            let items = ready_or_err(feed::load_news(api, &config), "news")?;
            let articles: Vec<ArticleCard> =
                items.iter().map(ArticleCard::from_normalized).collect();
            if as_json {
                print_json(&articles)?;
            } else {
                for card in &articles {
                    println!("{:<20} {}  <{}>", card.date, card.title, card.url);
                }
            }
        }
        View::Article => {
            let url = parse_url_arg().context("article view needs --url <address>")?;
            let article = ready_or_err(feed::load_article(api, &url), "article")?;
            let view = ArticleView::from_article(&article);
            if as_json {
                print_json(&view)?;
            } else {
                println!("{}", view.title);
                println!("{} | {}", view.date, view.image);
                println!();
                println!("{}", view.body);
            }
        }
    }

    Ok(())
}

fn ready_or_err<T>(state: ViewState<T>, what: &str) -> Result<T> {
    match state {
        ViewState::Ready(data) => Ok(data),
        _ => Err(anyhow!("{what}: backend unavailable")),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{out}");
    Ok(())
}

fn match_line(card: &MatchCard) -> String {
    let mut line = format!(
        "{:<22} {} {} {} ({})",
        card.date, card.home_name, card.score, card.away_name, card.round
    );
    if let Some(periods) = &card.periods {
        line.push_str(&format!(" [{periods}]"));
    }
    if let Some(outcome) = card.outcome {
        line.push_str(&format!(" {}", outcome.label()));
    }
    line
}

fn has_flag(flag: &str) -> bool {
    std::env::args().skip(1).any(|arg| arg == flag)
}

fn parse_view_arg() -> Result<View> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut raw = None;
    let mut skip_next = false;
    for arg in &args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--url" || arg == "--seed" {
            skip_next = true;
            continue;
        }
        if !arg.starts_with("--") {
            raw = Some(arg.as_str());
            break;
        }
    }
    let Some(raw) = raw else {
        return Ok(View::Home);
    };
    match raw.trim().to_lowercase().as_str() {
        "home" => Ok(View::Home),
        "matches" => Ok(View::Matches),
        "news" => Ok(View::News),
        "article" => Ok(View::Article),
        other => Err(anyhow!(
            "unknown view {other:?} (expected home, matches, news or article)"
        )),
    }
}

fn parse_url_arg() -> Option<String> {
    arg_value("--url")
}

fn parse_seed_arg() -> Option<u64> {
    arg_value("--seed").and_then(|raw| raw.trim().parse().ok())
}

fn arg_value(name: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}
