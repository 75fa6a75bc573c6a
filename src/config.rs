use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://projekthcapp.onrender.com";
const LOG_DIR: &str = "hck_terminal";
const LOG_FILE: &str = "hck_terminal.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Api,
    Demo,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub source: Source,
    pub request_timeout_secs: u64,
    pub home_articles: usize,
    pub home_matches: usize,
    pub page_matches: usize,
    pub news_articles: usize,
    pub round_tiebreak: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            source: Source::Api,
            request_timeout_secs: 10,
            home_articles: 10,
            home_matches: 50,
            page_matches: 80,
            news_articles: 10,
            round_tiebreak: true,
            log_file: default_log_path(),
        }
    }
}

impl Config {
    /// Reads `HCK_*` variables; call after the `.env` files are loaded.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_base = env::var("HCK_API_BASE")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base);
        let source = match env::var("HCK_SOURCE")
            .unwrap_or_default()
            .trim()
            .to_lowercase()
            .as_str()
        {
            "demo" | "fake" => Source::Demo,
            _ => Source::Api,
        };
        let round_tiebreak = env::var("HCK_ROUND_TIEBREAK")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "off" | "no"))
            .unwrap_or(defaults.round_tiebreak);
        let log_file = env::var("HCK_LOG_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or(defaults.log_file);

        Self {
            api_base,
            source,
            request_timeout_secs: env_u64("HCK_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)
                .clamp(2, 60),
            home_articles: env_usize("HCK_HOME_ARTICLES", defaults.home_articles).clamp(1, 200),
            home_matches: env_usize("HCK_HOME_MATCHES", defaults.home_matches).clamp(1, 200),
            page_matches: env_usize("HCK_PAGE_MATCHES", defaults.page_matches).clamp(1, 200),
            news_articles: env_usize("HCK_NEWS_ARTICLES", defaults.news_articles).clamp(1, 200),
            round_tiebreak,
            log_file,
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn default_log_path() -> Option<PathBuf> {
    if let Ok(base) = env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(LOG_DIR).join(LOG_FILE));
    }
    let home = env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(LOG_DIR).join(LOG_FILE))
}
