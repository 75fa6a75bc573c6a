use hck_terminal::model::{Match, MatchStatus};
use hck_terminal::score::{
    NOT_PLAYED_LABEL, PeriodTotals, ResolvedScore, UNDETERMINED_LABEL, is_win, resolve_score,
    total_from_periods,
};

fn played() -> Match {
    Match {
        team_home: "HC Košice".to_string(),
        team_away: "HK Nitra".to_string(),
        status: MatchStatus::Played,
        ..Match::default()
    }
}

#[test]
fn sums_period_pairs() {
    assert_eq!(
        total_from_periods(Some("2:1, 1:1, 1:4")),
        Some(PeriodTotals { home: 4, away: 6 })
    );
    assert_eq!(
        total_from_periods(Some("(1 : 0; 0:0, 2:2)")),
        Some(PeriodTotals { home: 3, away: 2 })
    );
}

#[test]
fn oversized_period_pair_saturates() {
    assert_eq!(
        total_from_periods(Some("99999999999:1, 1:1")),
        Some(PeriodTotals {
            home: u32::MAX,
            away: 2
        })
    );
}

#[test]
fn no_periods_means_no_total() {
    assert_eq!(total_from_periods(None), None);
    assert_eq!(total_from_periods(Some("")), None);
    assert_eq!(total_from_periods(Some("po predĺžení")), None);
}

#[test]
fn periods_take_precedence_over_raw_score() {
    let m = Match {
        score_periods: Some("(2:1, 1:1, 1:4)".to_string()),
        score: Some("9:9".to_string()),
        ..played()
    };
    let line = resolve_score(&m);
    assert_eq!(line.score, ResolvedScore::Totals { home: 4, away: 6 });
    assert_eq!(line.score.to_string(), "4:6");
    assert_eq!(line.subtitle.as_deref(), Some("(2:1, 1:1, 1:4)"));
}

#[test]
fn upcoming_match_never_shows_a_score() {
    let m = Match {
        status: MatchStatus::Upcoming,
        score_periods: Some("1:0".to_string()),
        match_score: Some("1:0".to_string()),
        ..played()
    };
    let line = resolve_score(&m);
    assert_eq!(line.score, ResolvedScore::NotPlayed);
    assert_eq!(line.score.to_string(), NOT_PLAYED_LABEL);
    assert_eq!(line.subtitle, None);
}

#[test]
fn live_match_is_not_scored_either() {
    let m = Match {
        status: MatchStatus::Live,
        match_score: Some("2:2".to_string()),
        ..played()
    };
    assert_eq!(resolve_score(&m).score, ResolvedScore::NotPlayed);
}

#[test]
fn falls_back_to_reported_score() {
    let m = Match {
        match_score: Some("3:2 pp".to_string()),
        ..played()
    };
    let line = resolve_score(&m);
    assert_eq!(line.score, ResolvedScore::Reported("3:2 pp".to_string()));
    assert_eq!(line.subtitle, None);
}

#[test]
fn outcome_sentinel_is_not_a_score() {
    for sentinel in ["win", "LOSE"] {
        let m = Match {
            score: Some(sentinel.to_string()),
            ..played()
        };
        assert_eq!(resolve_score(&m).score.to_string(), UNDETERMINED_LABEL);
    }
}

#[test]
fn missing_score_is_undetermined() {
    assert_eq!(resolve_score(&played()).score, ResolvedScore::Undetermined);
}

#[test]
fn either_win_flag_marks_a_win() {
    assert!(!is_win(&played()));
    assert!(is_win(&Match {
        is_win: true,
        ..played()
    }));
    let m = Match {
        match_is_win: true,
        score_periods: Some("1:0".to_string()),
        ..played()
    };
    assert!(is_win(&m));
    assert!(resolve_score(&m).is_win);
}
