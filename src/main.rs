use std::io;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use hck_terminal::api::{ClubApi, HttpApi};
use hck_terminal::cards::{ArticleCard, ArticleView, MatchCard, Outcome};
use hck_terminal::config::{Config, Source};
use hck_terminal::demo_feed::DemoApi;
use hck_terminal::feed::spawn_provider;
use hck_terminal::logging;
use hck_terminal::state::{
    AppState, Delta, MatchesTab, ProviderCommand, Screen, ViewState, apply_delta,
};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
}

impl App {
    fn new(cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn send(&mut self, cmd: Option<ProviderCommand>) {
        let Some(cmd) = cmd else {
            return;
        };
        if self.cmd_tx.send(cmd).is_err() {
            self.state.push_log("[WARN] Provider is not running");
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.search_active {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.state.search_active = false,
                KeyCode::Backspace => self.state.pop_search_char(),
                KeyCode::Char(ch) => self.state.push_search_char(ch),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => {
                let cmd = self.state.navigate(Screen::Home);
                self.send(cmd);
            }
            KeyCode::Char('2') => {
                let cmd = self.state.navigate(Screen::Matches);
                self.send(cmd);
            }
            KeyCode::Char('3') => {
                let cmd = self.state.navigate(Screen::News);
                self.send(cmd);
            }
            KeyCode::Enter | KeyCode::Char('d') => {
                if let Some(url) = self.state.selected_article_url() {
                    let cmd = self.state.open_article(url);
                    self.send(Some(cmd));
                }
            }
            KeyCode::Char('b') | KeyCode::Esc => {
                let cmd = self.state.back();
                self.send(cmd);
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Tab | KeyCode::Char('t') if self.state.screen == Screen::Matches => {
                self.state.toggle_matches_tab();
            }
            KeyCode::Char('/') if self.state.screen == Screen::Matches => {
                self.state.search_active = true;
            }
            KeyCode::Char('r') => {
                let cmd = self.state.reload();
                self.state.push_log("[INFO] Reload requested");
                self.send(Some(cmd));
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = Config::from_env();
    logging::init(&config);

    let api: Arc<dyn ClubApi> = match config.source {
        Source::Api => Arc::new(HttpApi::new(&config)?),
        Source::Demo => Arc::new(DemoApi::new()),
    };
    tracing::info!(source = ?config.source, api_base = %config.api_base, "starting");

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let _provider = spawn_provider(api, config, tx, cmd_rx);

    let mut app = App::new(cmd_tx);
    let cmd = app.state.reload();
    app.send(Some(cmd));

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "ui loop failed");
    }
    tracing::info!("exited");
    Ok(res?)
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Home => render_home(frame, chunks[1], &app.state),
        Screen::Matches => render_matches(frame, chunks[1], &app.state),
        Screen::News => render_news(frame, chunks[1], &app.state),
        Screen::Article => render_article(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let view = match state.screen {
        Screen::Home => "DOMOV",
        Screen::Matches => "ZÁPASY",
        Screen::News => "AKTUALITY",
        Screen::Article => "ČLÁNOK",
    };
    format!(" HC KOŠICE | {view}")
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Home | Screen::News => {
            "1 Domov | 2 Zápasy | 3 Aktuality | j/k Move | Enter Open | r Reload | ? Help | q Quit"
                .to_string()
        }
        Screen::Matches if state.search_active => "Type to filter | Enter/Esc Done".to_string(),
        Screen::Matches => {
            "1 Domov | 3 Aktuality | Tab Výsledky/Kalendár | / Search | j/k Move | r Reload | q Quit"
                .to_string()
        }
        Screen::Article => "b/Esc Back | j/k Scroll | r Reload | q Quit".to_string(),
    }
}

/// Loading and failure placeholders shared by all views. `None` means data is ready.
fn status_placeholder<T>(view: &ViewState<T>, loading: &str) -> Option<Paragraph<'static>> {
    let (text, color) = match view {
        ViewState::Ready(_) => return None,
        ViewState::Idle | ViewState::Loading => (loading.to_string(), Color::DarkGray),
        ViewState::Failed => (
            "Chyba spojenia. Nepodarilo sa načítať aktuálne dáta z klubu.\n\nr  Skúsiť znova"
                .to_string(),
            Color::Red,
        ),
    };
    Some(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color)),
    )
}

fn render_home(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(placeholder) = status_placeholder(&state.home, "Pripravujeme štadión...") {
        frame.render_widget(placeholder, area);
        return;
    }
    let Some(home) = state.home.ready() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(7),
            Constraint::Min(1),
        ])
        .split(area);

    let hero_lines = match state.hero_article().map(ArticleCard::from_normalized) {
        Some(card) => vec![
            Line::styled(card.title, Style::default().add_modifier(Modifier::BOLD)),
            Line::styled(
                format!("{} | {}", card.date, card.image),
                Style::default().fg(Color::DarkGray),
            ),
        ],
        None => vec![Line::from("Žiadne novinky neboli nájdené.")],
    };
    let hero = Paragraph::new(hero_lines)
        .block(Block::default().title("Hlavná správa").borders(Borders::ALL));
    frame.render_widget(hero, rows[0]);

    let next = match &home.next_match {
        Some(m) => match_card_text(&MatchCard::from_match(m)),
        None => "Program ďalšieho kola čoskoro".to_string(),
    };
    let next_block = Paragraph::new(next)
        .alignment(Alignment::Center)
        .block(Block::default().title("Najbližší zápas").borders(Borders::ALL));
    frame.render_widget(next_block, rows[1]);

    let articles = state.home_articles();
    let lines = if articles.is_empty() {
        vec![Line::from("Žiadne novinky neboli nájdené.")]
    } else {
        article_lines(articles.iter().map(ArticleCard::from_normalized), state.selected)
    };
    let list = Paragraph::new(lines).block(Block::default().title("Novinky").borders(Borders::ALL));
    frame.render_widget(list, rows[2]);
}

fn render_matches(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let tab_style = |tab: MatchesTab| {
        if state.matches_tab == tab {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let tabs = Line::from(vec![
        Span::styled(" Výsledky ", tab_style(MatchesTab::Played)),
        Span::raw(" "),
        Span::styled(" Kalendár ", tab_style(MatchesTab::Upcoming)),
    ]);
    frame.render_widget(Paragraph::new(tabs), rows[0]);

    let cursor = if state.search_active { "_" } else { "" };
    let search = Paragraph::new(format!("Hľadať: {}{cursor}", state.search))
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(search, rows[1]);

    if let Some(placeholder) = status_placeholder(&state.matches, "Načítavam zápasy...") {
        frame.render_widget(placeholder, rows[2]);
        return;
    }

    let filtered = state.filtered_matches();
    if filtered.is_empty() {
        let empty = Paragraph::new("Žiadne zápasy nenájdené")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, rows[2]);
        return;
    }

    let visible = rows[2].height as usize;
    let (start, end) = visible_range(state.selected, filtered.len(), visible);
    let lines: Vec<Line> = (start..end)
        .map(|idx| {
            let card = MatchCard::from_match(filtered[idx]);
            let outcome = card.outcome.map(|o| o.label()).unwrap_or("");
            let text = format!(
                "{:<22} {:>24} {:^7} {:<24} {:<18} {}",
                truncate(&card.date, 22),
                truncate(&card.home_name, 24),
                card.score,
                truncate(&card.away_name, 24),
                truncate(&card.round, 18),
                outcome
            );
            let style = if idx == state.selected {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else if card.outcome == Some(Outcome::Win) {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            Line::styled(text, style)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), rows[2]);
}

fn render_news(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(placeholder) = status_placeholder(&state.news, "Načítavam aktuality...") {
        frame.render_widget(placeholder, area);
        return;
    }
    let articles = state.news_articles();
    if articles.is_empty() {
        let empty = Paragraph::new("Žiadne novinky neboli nájdené.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_range(state.selected, articles.len(), visible);
    let lines = article_lines(
        articles[start..end].iter().map(ArticleCard::from_normalized),
        state.selected.saturating_sub(start),
    );
    let list =
        Paragraph::new(lines).block(Block::default().title("Aktuality").borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn render_article(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(placeholder) = status_placeholder(&state.article, "Načítavam článok...") {
        frame.render_widget(placeholder, area);
        return;
    }
    let Some(article) = state.article.ready() else {
        return;
    };
    let view = ArticleView::from_article(article);
    let mut lines = vec![
        Line::styled(view.title, Style::default().add_modifier(Modifier::BOLD)),
        Line::styled(
            format!("HC KOŠICE | {}", view.date),
            Style::default().fg(Color::Yellow),
        ),
        Line::styled(view.image, Style::default().fg(Color::DarkGray)),
        Line::from(""),
    ];
    lines.extend(view.body.lines().map(|l| Line::from(l.to_string())));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((state.article_scroll, 0))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn match_card_text(card: &MatchCard) -> String {
    let mut lines = vec![
        format!("{} | {}", card.round, card.date),
        String::new(),
        format!("{}   {}   {}", card.home_name, card.score, card.away_name),
    ];
    if let Some(periods) = &card.periods {
        lines.push(periods.clone());
    }
    if let Some(outcome) = card.outcome {
        lines.push(outcome.label().to_string());
    }
    lines.join("\n")
}

fn article_lines(
    cards: impl Iterator<Item = ArticleCard>,
    selected: usize,
) -> Vec<Line<'static>> {
    cards
        .enumerate()
        .map(|(idx, card)| {
            let style = if idx == selected {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::styled(format!("{:<20} {}", card.date, card.title), style)
        })
        .collect()
}

fn console_text(state: &AppState) -> String {
    state
        .logs
        .iter()
        .rev()
        .take(2)
        .rev()
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "HC Košice - Help",
        "",
        "  1 / 2 / 3    Domov / Zápasy / Aktuality",
        "  Enter / d    Open article",
        "  b / Esc      Back",
        "  j/k or ↑/↓   Move / scroll",
        "  Tab / t      Výsledky / Kalendár",
        "  /            Search team or round",
        "  r            Reload",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text).block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
