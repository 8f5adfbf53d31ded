use crate::config::Config;
use crate::core::calculator::auto_break::plan_automatic_breaks;
use crate::core::schedule::resolve_effective_schedule;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_event, load_events_between};
use crate::errors::AppResult;
use crate::models::clock_event::ClockEvent;
use crate::utils::time::day_bounds;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::TransactionBehavior;
use tracing::info;

/// Inserts automatic breaks for the slots an employee worked through.
pub struct SweepLogic;

impl SweepLogic {
    pub fn apply(
        pool: &mut DbPool,
        cfg: &Config,
        employee: &str,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<ClockEvent>> {
        let tz = cfg.tz()?;
        let (start, end) = day_bounds(date, &tz)?;
        let schedule = resolve_effective_schedule(&cfg.schedule, &cfg.intensive_schedules, date)?
            .anchored_to(date, &tz, start);

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let events = load_events_between(&tx, employee, &start, &end)?;
        let mut planned =
            plan_automatic_breaks(&events, employee, start, &schedule.paid_break_slots, now);

        for ev in planned.iter_mut() {
            ev.id = insert_event(&tx, ev)?;
        }

        if !planned.is_empty() {
            let slots: Vec<&str> = planned
                .iter()
                .filter_map(|e| e.automatic_break_slot_id.as_deref())
                .collect();
            ttlog(
                &tx,
                "sweep",
                employee,
                &format!("{}: inserted {} events ({})", date, planned.len(), slots.join(", ")),
            )?;
        }

        tx.commit()?;

        info!(employee, %date, inserted = planned.len(), "automatic break sweep done");
        Ok(planned)
    }
}
