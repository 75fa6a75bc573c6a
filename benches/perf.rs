use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use hck_terminal::cards::MatchCard;
use hck_terminal::dates::parse_club_date;
use hck_terminal::model::{Article, Match, MatchStatus, parse_articles_json, parse_matches_json};
use hck_terminal::ordering::{MatchView, order_articles, order_matches};

const NOW: i64 = 1_768_000_000_000;

const DATE_SAMPLES: [&str; 6] = [
    "11. januára 2026 18:00",
    "PRIDANÉ 08. 01. 2026",
    "8.1.2026",
    "Aktualizované 3. máj 2025",
    "31. februára 2026",
    "čoskoro",
];

fn sample_articles(n: usize) -> Vec<Article> {
    (0..n)
        .map(|i| Article {
            title: format!("Článok {i}"),
            url: format!("https://www.hckosice.sk/clanky/{i}"),
            date_text: Some(format!("{}. {}. 2025", i % 28 + 1, i % 12 + 1)),
            ..Article::default()
        })
        .collect()
}

fn sample_matches(n: usize) -> Vec<Match> {
    (0..n)
        .map(|i| Match {
            id: Some(i.to_string()),
            team_home: "HC Košice".to_string(),
            team_away: "HK Nitra".to_string(),
            status: MatchStatus::Played,
            round: Some(format!("{}. kolo", i + 1)),
            date_text: Some(format!("{}.{}.2025 18:00", i % 28 + 1, i % 12 + 1)),
            score_periods: Some("1:0, 2:1, 0:3".to_string()),
            ..Match::default()
        })
        .collect()
}

fn bench_date_parse(c: &mut Criterion) {
    c.bench_function("club_date_parse", |b| {
        b.iter(|| {
            for sample in DATE_SAMPLES {
                black_box(parse_club_date(black_box(Some(sample))));
            }
        })
    });
}

fn bench_order_articles(c: &mut Criterion) {
    let articles = sample_articles(200);
    c.bench_function("order_articles", |b| {
        b.iter(|| black_box(order_articles(black_box(articles.clone()))))
    });
}

fn bench_order_matches(c: &mut Criterion) {
    let matches = sample_matches(200);
    c.bench_function("order_played_matches", |b| {
        b.iter(|| {
            black_box(order_matches(
                black_box(matches.clone()),
                MatchView::Played {
                    round_tiebreak: true,
                },
                NOW,
            ))
        })
    });
    c.bench_function("order_upcoming_matches", |b| {
        b.iter(|| black_box(order_matches(black_box(matches.clone()), MatchView::Upcoming, NOW)))
    });
}

fn bench_match_cards(c: &mut Criterion) {
    let matches = sample_matches(80);
    c.bench_function("match_cards", |b| {
        b.iter(|| {
            let cards: Vec<MatchCard> = matches.iter().map(MatchCard::from_match).collect();
            black_box(cards)
        })
    });
}

fn bench_fixture_parse(c: &mut Criterion) {
    c.bench_function("articles_fixture_parse", |b| {
        b.iter(|| {
            let _ = parse_articles_json(black_box(ARTICLES_JSON)).expect("valid fixture json");
        })
    });
    c.bench_function("matches_fixture_parse", |b| {
        b.iter(|| {
            let _ = parse_matches_json(black_box(MATCHES_JSON)).expect("valid fixture json");
        })
    });
}

criterion_group!(
    perf,
    bench_date_parse,
    bench_order_articles,
    bench_order_matches,
    bench_match_cards,
    bench_fixture_parse
);
criterion_main!(perf);

static ARTICLES_JSON: &str = include_str!("../tests/fixtures/articles_items.json");
static MATCHES_JSON: &str = include_str!("../tests/fixtures/matches_first_array.json");
