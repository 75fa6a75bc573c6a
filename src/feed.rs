use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use chrono::Utc;
use tracing::{info, warn};

use crate::api::{ClubApi, MatchStatusQuery};
use crate::config::Config;
use crate::model::Article;
use crate::ordering::{MatchView, NormalizedArticle, order_articles, order_matches, select_next_match};
use crate::state::{Delta, HomeData, MatchesData, ProviderCommand, ViewState};

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Worker thread answering view fetches. Exits when the command channel closes.
pub fn spawn_provider(
    api: Arc<dyn ClubApi>,
    config: Config,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let delta = run_command(api.as_ref(), &config, cmd);
            let line = console_line(&delta);
            if tx.send(delta).is_err() {
                break;
            }
            if let Some(line) = line {
                let _ = tx.send(Delta::Log(line));
            }
        }
        info!("provider stopped");
    })
}

fn console_line(delta: &Delta) -> Option<String> {
    let (view, failed, count) = match delta {
        Delta::Home { state, .. } => (
            "Home",
            matches!(state, ViewState::Failed),
            state.ready().map(|h| h.latest_articles.len() + h.played_matches.len()),
        ),
        Delta::Matches { state, .. } => (
            "Matches",
            matches!(state, ViewState::Failed),
            state.ready().map(|m| m.played.len() + m.upcoming.len()),
        ),
        Delta::News { state, .. } => (
            "News",
            matches!(state, ViewState::Failed),
            state.ready().map(Vec::len),
        ),
        Delta::Article { state, .. } => (
            "Article",
            matches!(state, ViewState::Failed),
            state.ready().map(|_| 1),
        ),
        Delta::Log(_) => return None,
    };
    if failed {
        return Some(format!("[WARN] {view}: data unavailable"));
    }
    count.map(|n| format!("[INFO] {view}: {n} items loaded"))
}

pub fn run_command(api: &dyn ClubApi, config: &Config, cmd: ProviderCommand) -> Delta {
    match cmd {
        ProviderCommand::LoadHome { generation } => Delta::Home {
            generation,
            state: load_home(api, config, now_millis()),
        },
        ProviderCommand::LoadMatches { generation } => Delta::Matches {
            generation,
            state: load_matches(api, config, now_millis()),
        },
        ProviderCommand::LoadNews { generation } => Delta::News {
            generation,
            state: load_news(api, config),
        },
        ProviderCommand::LoadArticle { generation, url } => Delta::Article {
            generation,
            state: load_article(api, &url),
        },
    }
}

/// Articles, upcoming and played matches are fetched concurrently; the view is
/// built once all three have settled.
pub fn load_home(api: &dyn ClubApi, config: &Config, now: i64) -> ViewState<HomeData> {
    let (articles, (upcoming, played)) = rayon::join(
        || api.fetch_articles(config.home_articles),
        || {
            rayon::join(
                || api.fetch_matches(MatchStatusQuery::Upcoming, config.home_matches),
                || api.fetch_matches(MatchStatusQuery::Played, config.home_matches),
            )
        },
    );
    info!(
        articles = articles.len(),
        upcoming = upcoming.len(),
        played = played.len(),
        "home data fetched"
    );

    if articles.is_empty() && upcoming.is_empty() && played.is_empty() {
        return empty_or_failed(api, HomeData::default());
    }

    let latest_articles = order_articles(articles);
    let api_next = upcoming.first().or_else(|| played.first());
    let next_match = select_next_match(&upcoming, &played, api_next, now);

    ViewState::Ready(HomeData {
        next_match,
        latest_article: latest_articles.first().cloned(),
        latest_articles,
        upcoming_matches: upcoming,
        played_matches: played,
    })
}

pub fn load_matches(api: &dyn ClubApi, config: &Config, now: i64) -> ViewState<MatchesData> {
    let (upcoming, played) = rayon::join(
        || api.fetch_matches(MatchStatusQuery::Upcoming, config.page_matches),
        || api.fetch_matches(MatchStatusQuery::Played, config.page_matches),
    );
    if upcoming.is_empty() && played.is_empty() {
        return empty_or_failed(api, MatchesData::default());
    }

    let union: Vec<_> = upcoming.iter().chain(&played).cloned().collect();
    ViewState::Ready(MatchesData {
        played: order_matches(
            played,
            MatchView::Played {
                round_tiebreak: config.round_tiebreak,
            },
            now,
        ),
        upcoming: order_matches(union, MatchView::Upcoming, now),
    })
}

pub fn load_news(api: &dyn ClubApi, config: &Config) -> ViewState<Vec<NormalizedArticle>> {
    let articles = api.fetch_articles(config.news_articles);
    if articles.is_empty() {
        return empty_or_failed(api, Vec::new());
    }
    ViewState::Ready(order_articles(articles))
}

pub fn load_article(api: &dyn ClubApi, url: &str) -> ViewState<Article> {
    if url.trim().is_empty() {
        return ViewState::Failed;
    }
    match api.fetch_article_detail(url) {
        Some(article) => ViewState::Ready(article),
        None => {
            warn!(url, "article detail unavailable");
            ViewState::Failed
        }
    }
}

// Empty collections are only an error when the backend itself is down.
fn empty_or_failed<T>(api: &dyn ClubApi, empty: T) -> ViewState<T> {
    if api.fetch_health() {
        info!("backend healthy but returned no data");
        ViewState::Ready(empty)
    } else {
        warn!("backend unreachable");
        ViewState::Failed
    }
}
