use chrono::{NaiveDate, TimeZone, Utc};
use rtimeclock::config::{Config, PaidBreakConfig};
use rtimeclock::core::clock::{ClockCommand, ClockLogic, ClockRequest};
use rtimeclock::core::logic::Core;
use rtimeclock::core::sweep::SweepLogic;
use rtimeclock::core::transition::ClockAction;
use rtimeclock::db::initialize::init_db;
use rtimeclock::db::migrate::pending_migrations;
use rtimeclock::db::pool::DbPool;
use rtimeclock::db::queries::{load_employees, load_events_between, load_last_event};
use rtimeclock::errors::AppError;
use rtimeclock::models::clock_state::ClockState;
use rtimeclock::models::event_type::ClockEventType;

mod common;
use common::{at, day_start, monday};

fn pool() -> DbPool {
    let pool = DbPool::in_memory().expect("in-memory db");
    init_db(&pool.conn).expect("migrations");
    pool
}

fn config() -> Config {
    let mut cfg = Config::default();
    cfg.schedule.paid_breaks = vec![PaidBreakConfig {
        id: "lunch".to_string(),
        start: "12:00".to_string(),
        end: "12:30".to_string(),
        automatic: true,
    }];
    cfg
}

fn request(action: ClockAction, h: u32, m: u32) -> ClockRequest {
    ClockRequest {
        employee: "alice".to_string(),
        command: ClockCommand::Action(action),
        at: at(h, m),
        project: None,
    }
}

#[test]
fn test_migrations_run_once() {
    let pool = pool();
    assert!(pending_migrations(&pool.conn).unwrap().is_empty());
    init_db(&pool.conn).expect("second run is a no-op");
}

#[test]
fn test_clock_sequence_is_recorded() {
    let mut pool = pool();

    let first = ClockLogic::apply(&mut pool, &request(ClockAction::ClockIn, 9, 0)).unwrap();
    assert_eq!(first.previous, ClockState::ClockedOut);
    assert_eq!(first.state, ClockState::ClockedIn);
    assert!(first.event.id > 0);

    ClockLogic::apply(&mut pool, &request(ClockAction::BreakStart, 12, 0)).unwrap();
    ClockLogic::apply(&mut pool, &request(ClockAction::BreakEnd, 12, 30)).unwrap();
    let last = ClockLogic::apply(&mut pool, &request(ClockAction::ClockOut, 17, 0)).unwrap();
    assert_eq!(last.state, ClockState::ClockedOut);

    let events = load_events_between(&pool.conn, "alice", &day_start(), &at(23, 59)).unwrap();
    let kinds: Vec<ClockEventType> = events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ClockEventType::ClockIn,
            ClockEventType::BreakStart,
            ClockEventType::BreakEnd,
            ClockEventType::ClockOut,
        ]
    );
    assert_eq!(events[0].timestamp, at(9, 0));
    assert_eq!(load_employees(&pool.conn).unwrap(), vec!["alice".to_string()]);
}

#[test]
fn test_rejected_action_is_not_stored() {
    let mut pool = pool();

    let err = ClockLogic::apply(&mut pool, &request(ClockAction::ClockOut, 9, 0)).unwrap_err();
    match err {
        AppError::InvalidTransition(msg) => {
            assert_eq!(msg, "Cannot clock out without a prior clock-in.")
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(load_last_event(&pool.conn, "alice").unwrap().is_none());
}

#[test]
fn test_double_clock_in_is_rejected() {
    let mut pool = pool();
    ClockLogic::apply(&mut pool, &request(ClockAction::ClockIn, 9, 0)).unwrap();

    let err = ClockLogic::apply(&mut pool, &request(ClockAction::ClockIn, 9, 5)).unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));
}

#[test]
fn test_event_before_latest_is_rejected() {
    let mut pool = pool();
    ClockLogic::apply(&mut pool, &request(ClockAction::ClockIn, 9, 0)).unwrap();

    let err = ClockLogic::apply(&mut pool, &request(ClockAction::ClockOut, 8, 0)).unwrap_err();
    assert!(matches!(err, AppError::OutOfOrder { .. }));
}

#[test]
fn test_employees_are_independent() {
    let mut pool = pool();
    ClockLogic::apply(&mut pool, &request(ClockAction::ClockIn, 9, 0)).unwrap();

    let bob = ClockRequest {
        employee: "bob".to_string(),
        ..request(ClockAction::ClockIn, 9, 0)
    };
    let outcome = ClockLogic::apply(&mut pool, &bob).unwrap();
    assert_eq!(outcome.previous, ClockState::ClockedOut);
}

#[test]
fn test_project_switch_needs_clock_in() {
    let mut pool = pool();
    let switch = ClockRequest {
        command: ClockCommand::ProjectSwitch,
        project: Some("beta".to_string()),
        ..request(ClockAction::ClockIn, 9, 0)
    };

    assert!(matches!(
        ClockLogic::apply(&mut pool, &switch).unwrap_err(),
        AppError::InvalidTransition(_)
    ));

    ClockLogic::apply(&mut pool, &request(ClockAction::ClockIn, 8, 0)).unwrap();
    let outcome = ClockLogic::apply(&mut pool, &switch).unwrap();
    assert_eq!(outcome.state, ClockState::ClockedIn);
    assert_eq!(outcome.event.kind, ClockEventType::ProjectSwitch);
    assert_eq!(outcome.event.project.as_deref(), Some("beta"));
}

#[test]
fn test_daily_summary_from_store() {
    let mut pool = pool();
    let cfg = config();
    ClockLogic::apply(&mut pool, &request(ClockAction::ClockIn, 9, 0)).unwrap();
    ClockLogic::apply(&mut pool, &request(ClockAction::BreakStart, 12, 0)).unwrap();
    ClockLogic::apply(&mut pool, &request(ClockAction::BreakEnd, 12, 30)).unwrap();
    ClockLogic::apply(&mut pool, &request(ClockAction::ClockOut, 17, 30)).unwrap();

    let summary = Core::load_daily_summary(&pool.conn, &cfg, "alice", monday(), at(18, 0)).unwrap();

    assert_eq!(summary.totals.worked_minutes, 510.0);
    assert_eq!(summary.totals.paid_break_minutes, 30.0);
    assert_eq!(summary.expected, 480.0);
    assert_eq!(summary.surplus, 30.0);
    assert_eq!(summary.state, ClockState::ClockedOut);
    assert_eq!(summary.live_minutes, 0.0);
}

#[test]
fn test_sweep_inserts_once() {
    let mut pool = pool();
    let cfg = config();
    ClockLogic::apply(&mut pool, &request(ClockAction::ClockIn, 9, 0)).unwrap();
    ClockLogic::apply(&mut pool, &request(ClockAction::ClockOut, 17, 0)).unwrap();

    let inserted = SweepLogic::apply(&mut pool, &cfg, "alice", monday(), at(18, 0)).unwrap();
    assert_eq!(inserted.len(), 2);
    assert!(inserted.iter().all(|e| e.id > 0));

    let again = SweepLogic::apply(&mut pool, &cfg, "alice", monday(), at(18, 0)).unwrap();
    assert!(again.is_empty());

    let summary = Core::load_daily_summary(&pool.conn, &cfg, "alice", monday(), at(18, 0)).unwrap();
    assert_eq!(summary.totals.worked_minutes, 480.0);
    assert_eq!(summary.totals.break_minutes, 30.0);
    assert_eq!(summary.totals.paid_break_minutes, 30.0);

    // The latest event is still the clock-out
    let last = load_last_event(&pool.conn, "alice").unwrap().unwrap();
    assert_eq!(last.kind, ClockEventType::ClockOut);
}

#[test]
fn test_sweep_leaves_clock_out_as_latest_event() {
    let mut pool = pool();
    let mut cfg = config();
    cfg.schedule.paid_breaks[0].end = "13:00".to_string();

    ClockLogic::apply(&mut pool, &request(ClockAction::ClockIn, 9, 0)).unwrap();
    ClockLogic::apply(&mut pool, &request(ClockAction::ClockOut, 13, 0)).unwrap();

    // The slot ends on the clock-out itself, so it was not worked through
    let inserted = SweepLogic::apply(&mut pool, &cfg, "alice", monday(), at(18, 0)).unwrap();
    assert!(inserted.is_empty());

    let last = load_last_event(&pool.conn, "alice").unwrap().unwrap();
    assert_eq!(last.kind, ClockEventType::ClockOut);

    let outcome = ClockLogic::apply(&mut pool, &request(ClockAction::ClockIn, 14, 0)).unwrap();
    assert_eq!(outcome.previous, ClockState::ClockedOut);
}

#[test]
fn test_sweep_uses_local_wall_clock_on_dst_day() {
    let mut pool = pool();
    let mut cfg = config();
    cfg.timezone = "Europe/Madrid".to_string();

    // 2025-03-30 in Madrid: CEST (UTC+2) from 02:00 local
    let day = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
    let utc = |h: u32, m: u32| Utc.with_ymd_and_hms(2025, 3, 30, h, m, 0).unwrap();
    let clock = |action: ClockAction, h: u32| ClockRequest {
        at: utc(h, 0),
        ..request(action, 0, 0)
    };

    // 09:00 to 17:00 local
    ClockLogic::apply(&mut pool, &clock(ClockAction::ClockIn, 7)).unwrap();
    ClockLogic::apply(&mut pool, &clock(ClockAction::ClockOut, 15)).unwrap();

    let inserted = SweepLogic::apply(&mut pool, &cfg, "alice", day, utc(18, 0)).unwrap();
    assert_eq!(inserted.len(), 2);
    assert_eq!(inserted[0].timestamp, utc(10, 0));
    assert_eq!(inserted[1].timestamp, utc(10, 30));

    let tz = cfg.tz().unwrap();
    assert_eq!(inserted[0].local_time_str(&tz), "12:00");
    assert_eq!(inserted[1].local_time_str(&tz), "12:30");

    let summary = Core::load_daily_summary(&pool.conn, &cfg, "alice", day, utc(18, 0)).unwrap();
    assert_eq!(summary.totals.worked_minutes, 480.0);
    assert_eq!(summary.totals.paid_break_minutes, 30.0);
}

#[test]
fn test_manual_break_is_paid_on_dst_day() {
    let mut pool = pool();
    let mut cfg = config();
    cfg.timezone = "Europe/Madrid".to_string();

    let day = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
    let utc = |h: u32, m: u32| Utc.with_ymd_and_hms(2025, 3, 30, h, m, 0).unwrap();
    let clock = |action: ClockAction, h: u32, m: u32| ClockRequest {
        at: utc(h, m),
        ..request(action, 0, 0)
    };

    // 09:00, 12:00-12:30 break, 17:00 local
    ClockLogic::apply(&mut pool, &clock(ClockAction::ClockIn, 7, 0)).unwrap();
    ClockLogic::apply(&mut pool, &clock(ClockAction::BreakStart, 10, 0)).unwrap();
    ClockLogic::apply(&mut pool, &clock(ClockAction::BreakEnd, 10, 30)).unwrap();
    ClockLogic::apply(&mut pool, &clock(ClockAction::ClockOut, 15, 0)).unwrap();

    let summary = Core::load_daily_summary(&pool.conn, &cfg, "alice", day, utc(18, 0)).unwrap();
    assert_eq!(summary.totals.break_minutes, 30.0);
    assert_eq!(summary.totals.paid_break_minutes, 30.0);
    assert_eq!(summary.totals.worked_minutes, 480.0);
}
