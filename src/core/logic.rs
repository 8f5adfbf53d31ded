use crate::config::Config;
use crate::core::calculator::{expected, surplus, workday};
use crate::core::schedule::{EffectiveSchedule, resolve_effective_schedule};
use crate::db::queries::load_events_between;
use crate::errors::AppResult;
use crate::models::clock_event::ClockEvent;
use crate::models::clock_state::ClockState;
use crate::models::day_summary::DaySummary;
use crate::utils::time::day_bounds;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;

pub struct Core;

impl Core {
    /// Recomputes the whole day from its events; nothing is carried over between calls.
    pub fn build_daily_summary(
        date: NaiveDate,
        employee: &str,
        events: &[ClockEvent],
        day_start: DateTime<Utc>,
        schedule: &EffectiveSchedule,
        now: DateTime<Utc>,
    ) -> DaySummary {
        let timeline = workday::build_workday(events, day_start);
        let totals = workday::totals_for(
            &timeline,
            &schedule.paid_break_slots,
            &schedule.paid_break_slot_ids(),
        );
        let expected = expected::calculate_expected(&timeline, schedule);
        let surplus = surplus::calculate_surplus(&totals, expected);

        let live_minutes = timeline
            .open
            .as_ref()
            .map(|open| workday::live_minutes(open, now))
            .unwrap_or(0.0);

        DaySummary {
            date,
            employee: employee.to_string(),
            state: ClockState::from_last_event(timeline.events.last().map(|e| e.kind)),
            projects: workday::project_minutes(&timeline),
            totals,
            expected,
            surplus,
            schedule: schedule.source.clone(),
            live_minutes,
            timeline,
        }
    }

    /// Loads one employee-day from the store and summarises it against the
    /// schedule in effect on that date.
    pub fn load_daily_summary(
        conn: &Connection,
        cfg: &Config,
        employee: &str,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<DaySummary> {
        let tz = cfg.tz()?;
        let (start, end) = day_bounds(date, &tz)?;
        let events = load_events_between(conn, employee, &start, &end)?;
        let schedule = resolve_effective_schedule(&cfg.schedule, &cfg.intensive_schedules, date)?
            .anchored_to(date, &tz, start);

        Ok(Self::build_daily_summary(
            date, employee, &events, start, &schedule, now,
        ))
    }
}
