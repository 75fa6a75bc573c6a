use std::collections::VecDeque;

use crate::model::{Article, Match};
use crate::ordering::NormalizedArticle;

const MAX_LOGS: usize = 200;
pub const HOME_ARTICLE_SLOTS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Matches,
    News,
    Article,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchesTab {
    Played,
    Upcoming,
}

/// Lifecycle of one view's data. `Failed` means the backend is unreachable;
/// a reachable backend with nothing to show is `Ready` with empty data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed,
}

impl<T> ViewState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeData {
    pub next_match: Option<Match>,
    pub latest_article: Option<NormalizedArticle>,
    pub latest_articles: Vec<NormalizedArticle>,
    pub upcoming_matches: Vec<Match>,
    pub played_matches: Vec<Match>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchesData {
    pub played: Vec<Match>,
    pub upcoming: Vec<Match>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCommand {
    LoadHome { generation: u64 },
    LoadMatches { generation: u64 },
    LoadNews { generation: u64 },
    LoadArticle { generation: u64, url: String },
}

#[derive(Debug, Clone)]
pub enum Delta {
    Home {
        generation: u64,
        state: ViewState<HomeData>,
    },
    Matches {
        generation: u64,
        state: ViewState<MatchesData>,
    },
    News {
        generation: u64,
        state: ViewState<Vec<NormalizedArticle>>,
    },
    Article {
        generation: u64,
        state: ViewState<Article>,
    },
    Log(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generations {
    pub home: u64,
    pub matches: u64,
    pub news: u64,
    pub article: u64,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub article_back: Screen,
    pub home: ViewState<HomeData>,
    pub matches: ViewState<MatchesData>,
    pub news: ViewState<Vec<NormalizedArticle>>,
    pub article: ViewState<Article>,
    pub article_url: Option<String>,
    pub matches_tab: MatchesTab,
    pub search: String,
    pub search_active: bool,
    pub selected: usize,
    pub article_scroll: u16,
    pub generations: Generations,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Home,
            article_back: Screen::Home,
            home: ViewState::Idle,
            matches: ViewState::Idle,
            news: ViewState::Idle,
            article: ViewState::Idle,
            article_url: None,
            matches_tab: MatchesTab::Played,
            search: String::new(),
            search_active: false,
            selected: 0,
            article_scroll: 0,
            generations: Generations::default(),
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    /// Switches screens, abandoning the pending fetch of the view being left,
    /// and returns the fetch for the view being entered.
    pub fn navigate(&mut self, screen: Screen) -> Option<ProviderCommand> {
        if screen == Screen::Article {
            let url = self.article_url.clone()?;
            return Some(self.open_article(url));
        }
        self.cancel_pending(self.screen);
        self.screen = screen;
        self.selected = 0;
        self.search_active = false;
        self.search.clear();
        Some(self.reload())
    }

    pub fn open_article(&mut self, url: String) -> ProviderCommand {
        if self.screen != Screen::Article {
            self.article_back = self.screen;
        }
        self.cancel_pending(self.screen);
        self.screen = Screen::Article;
        self.article_url = Some(url.clone());
        self.article_scroll = 0;
        self.generations.article += 1;
        self.article = ViewState::Loading;
        ProviderCommand::LoadArticle {
            generation: self.generations.article,
            url,
        }
    }

    pub fn back(&mut self) -> Option<ProviderCommand> {
        if self.screen == Screen::Article {
            let target = self.article_back;
            return self.navigate(target);
        }
        None
    }

    /// Fresh fetch for the current screen.
    pub fn reload(&mut self) -> ProviderCommand {
        match self.screen {
            Screen::Home => {
                self.generations.home += 1;
                self.home = ViewState::Loading;
                ProviderCommand::LoadHome {
                    generation: self.generations.home,
                }
            }
            Screen::Matches => {
                self.generations.matches += 1;
                self.matches = ViewState::Loading;
                ProviderCommand::LoadMatches {
                    generation: self.generations.matches,
                }
            }
            Screen::News => {
                self.generations.news += 1;
                self.news = ViewState::Loading;
                ProviderCommand::LoadNews {
                    generation: self.generations.news,
                }
            }
            Screen::Article => {
                let url = self.article_url.clone().unwrap_or_default();
                self.generations.article += 1;
                self.article = ViewState::Loading;
                ProviderCommand::LoadArticle {
                    generation: self.generations.article,
                    url,
                }
            }
        }
    }

    fn cancel_pending(&mut self, screen: Screen) {
        match screen {
            Screen::Home if self.home.is_loading() => {
                self.generations.home += 1;
                self.home = ViewState::Idle;
            }
            Screen::Matches if self.matches.is_loading() => {
                self.generations.matches += 1;
                self.matches = ViewState::Idle;
            }
            Screen::News if self.news.is_loading() => {
                self.generations.news += 1;
                self.news = ViewState::Idle;
            }
            Screen::Article if self.article.is_loading() => {
                self.generations.article += 1;
                self.article = ViewState::Idle;
            }
            _ => {}
        }
    }

    pub fn toggle_matches_tab(&mut self) {
        self.matches_tab = match self.matches_tab {
            MatchesTab::Played => MatchesTab::Upcoming,
            MatchesTab::Upcoming => MatchesTab::Played,
        };
        self.search.clear();
        self.search_active = false;
        self.selected = 0;
    }

    pub fn current_matches(&self) -> &[Match] {
        let Some(data) = self.matches.ready() else {
            return &[];
        };
        match self.matches_tab {
            MatchesTab::Played => &data.played,
            MatchesTab::Upcoming => &data.upcoming,
        }
    }

    pub fn filtered_matches(&self) -> Vec<&Match> {
        filter_matches(self.current_matches(), &self.search)
    }

    pub fn home_articles(&self) -> &[NormalizedArticle] {
        self.home
            .ready()
            .map(|h| &h.latest_articles[..h.latest_articles.len().min(HOME_ARTICLE_SLOTS)])
            .unwrap_or(&[])
    }

    /// Newest article, featured above the home list.
    pub fn hero_article(&self) -> Option<&NormalizedArticle> {
        self.home.ready().and_then(|h| h.latest_article.as_ref())
    }

    pub fn news_articles(&self) -> &[NormalizedArticle] {
        self.news.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    fn list_len(&self) -> usize {
        match self.screen {
            Screen::Home => self.home_articles().len(),
            Screen::Matches => self.filtered_matches().len(),
            Screen::News => self.news_articles().len(),
            Screen::Article => 0,
        }
    }

    /// Article url under the cursor on list screens.
    pub fn selected_article_url(&self) -> Option<String> {
        let list = match self.screen {
            Screen::Home => self.home_articles(),
            Screen::News => self.news_articles(),
            Screen::Matches | Screen::Article => return None,
        };
        list.get(self.selected)
            .map(|a| a.article.url.clone())
            .filter(|url| !url.trim().is_empty())
    }

    pub fn select_next(&mut self) {
        if self.screen == Screen::Article {
            self.article_scroll = self.article_scroll.saturating_add(1);
            return;
        }
        let len = self.list_len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.screen == Screen::Article {
            self.article_scroll = self.article_scroll.saturating_sub(1);
            return;
        }
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self) {
        let len = self.list_len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.search.push(ch);
        self.selected = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.selected = 0;
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

/// Case-insensitive substring match on either team or the round label.
pub fn filter_matches<'a>(matches: &'a [Match], query: &str) -> Vec<&'a Match> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return matches.iter().collect();
    }
    matches
        .iter()
        .filter(|m| {
            [
                m.team_home.as_str(),
                m.team_away.as_str(),
                m.round.as_deref().unwrap_or_default(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Applies a provider result unless a newer fetch of the same view has
/// started (or the fetch was abandoned by navigation) since it was issued.
pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::Home {
            generation,
            state: view,
        } => {
            if generation == state.generations.home {
                state.home = view;
            }
        }
        Delta::Matches {
            generation,
            state: view,
        } => {
            if generation == state.generations.matches {
                state.matches = view;
            }
        }
        Delta::News {
            generation,
            state: view,
        } => {
            if generation == state.generations.news {
                state.news = view;
            }
        }
        Delta::Article {
            generation,
            state: view,
        } => {
            if generation == state.generations.article {
                state.article = view;
            }
        }
        Delta::Log(msg) => state.push_log(msg),
    }
    state.clamp_selection();
}
