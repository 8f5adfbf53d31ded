//! Reconstructs work and break intervals from one day of clock events.
//!
//! The walk trusts that the transition validator ran upstream. Events that do
//! not match the currently open interval are skipped and counted, never
//! reported as errors, so a damaged day still produces a summary.

use crate::core::calculator::paid_breaks::reconcile_paid_breaks;
use crate::models::clock_event::ClockEvent;
use crate::models::event_type::ClockEventType;
use crate::models::paid_break::PaidBreakSlot;
use crate::models::workday_totals::WorkdayTotals;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

pub const UNASSIGNED_PROJECT: &str = "unassigned";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkInterval {
    pub start_minute: f64,
    pub end_minute: f64,
    pub minutes: f64,
    pub project: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakInterval {
    pub start_minute: f64,
    pub end_minute: f64,
    pub minutes: f64,
    /// Slot the break was generated for, when system-inserted.
    pub slot_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpenKind {
    Work,
    Break,
}

/// The interval still running after the last event of the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenInterval {
    pub kind: OpenKind,
    pub since: DateTime<Utc>,
    pub start_minute: f64,
    pub project: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct WorkdayTimeline {
    #[serde(skip)]
    pub events: Vec<ClockEvent>,
    pub work: Vec<WorkInterval>,
    pub breaks: Vec<BreakInterval>,
    pub open: Option<OpenInterval>,
    /// Closed work only, paid breaks not added back.
    pub work_minutes: f64,
    pub break_minutes: f64,
    pub ignored_events: usize,
}

#[derive(Debug, Clone)]
struct Cursor {
    at: DateTime<Utc>,
    minute: f64,
    project: Option<String>,
    slot_id: Option<String>,
}

impl Cursor {
    fn open(ev: &ClockEvent, minute: f64, project: Option<String>) -> Self {
        Self {
            at: ev.timestamp,
            minute,
            project,
            slot_id: ev.automatic_break_slot_id.clone(),
        }
    }
}

/// Minutes elapsed between the local-midnight anchor and `ts`.
pub fn minute_of_day(ts: DateTime<Utc>, day_start: DateTime<Utc>) -> f64 {
    (ts - day_start).num_milliseconds() as f64 / 60_000.0
}

fn ignore(timeline: &mut WorkdayTimeline, ev: &ClockEvent, reason: &str) {
    debug!(
        event_id = ev.id,
        employee = %ev.employee,
        kind = %ev.kind,
        at = %ev.timestamp,
        reason,
        "clock event ignored"
    );
    timeline.ignored_events += 1;
}

/// A cursor replaced before anything closed it: its opening event is skipped.
fn drop_stale(
    timeline: &mut WorkdayTimeline,
    stale: Option<Cursor>,
    ev: &ClockEvent,
    what: &str,
) {
    if let Some(stale) = stale {
        debug!(event_id = ev.id, since = %stale.at, what, "stale open interval dropped");
        timeline.ignored_events += 1;
    }
}

fn close_work(timeline: &mut WorkdayTimeline, open: Cursor, end_minute: f64) {
    let minutes = end_minute - open.minute;
    timeline.work_minutes += minutes;
    timeline.work.push(WorkInterval {
        start_minute: open.minute,
        end_minute,
        minutes,
        project: open.project,
    });
}

fn close_break(timeline: &mut WorkdayTimeline, open: Cursor, end_minute: f64) {
    let minutes = end_minute - open.minute;
    timeline.break_minutes += minutes;
    timeline.breaks.push(BreakInterval {
        start_minute: open.minute,
        end_minute,
        minutes,
        slot_id: open.slot_id,
    });
}

/// Walks the day's events in chronological order and splits them into
/// closed work and break intervals.
pub fn build_workday(events: &[ClockEvent], day_start: DateTime<Utc>) -> WorkdayTimeline {
    let mut timeline = WorkdayTimeline::default();
    if events.is_empty() {
        return timeline;
    }

    // -----------------------------
    // Sort events chronologically
    // -----------------------------
    // Every closed span ends at or after its start once events are in time order
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| e.timestamp);

    let mut last_clock_in: Option<Cursor> = None;
    let mut last_break_start: Option<Cursor> = None;
    let mut project: Option<String> = None;

    for ev in &sorted {
        let minute = minute_of_day(ev.timestamp, day_start);

        match ev.kind {
            ClockEventType::ClockIn => {
                drop_stale(&mut timeline, last_clock_in.take(), ev, "work");
                drop_stale(&mut timeline, last_break_start.take(), ev, "break");
                project = ev.project.clone();
                last_clock_in = Some(Cursor::open(ev, minute, project.clone()));
            }

            ClockEventType::ProjectSwitch => match last_clock_in.take() {
                Some(open) => {
                    close_work(&mut timeline, open, minute);
                    project = ev.project.clone();
                    last_clock_in = Some(Cursor::open(ev, minute, project.clone()));
                }
                None => ignore(&mut timeline, ev, "no open work interval"),
            },

            ClockEventType::BreakStart => {
                if let Some(open) = last_clock_in.take() {
                    close_work(&mut timeline, open, minute);
                }
                drop_stale(&mut timeline, last_break_start.take(), ev, "break");
                last_break_start = Some(Cursor::open(ev, minute, None));
            }

            ClockEventType::BreakEnd => match last_break_start.take() {
                Some(open) => {
                    close_break(&mut timeline, open, minute);
                    last_clock_in = Some(Cursor::open(ev, minute, project.clone()));
                }
                None => ignore(&mut timeline, ev, "no open break"),
            },

            ClockEventType::ClockOut => {
                let work = last_clock_in.take();
                let brk = last_break_start.take();
                if work.is_none() && brk.is_none() {
                    ignore(&mut timeline, ev, "nothing open to close");
                }
                if let Some(open) = work {
                    close_work(&mut timeline, open, minute);
                }
                if let Some(open) = brk {
                    close_break(&mut timeline, open, minute);
                }
                project = None;
            }
        }
    }

    // -----------------------------
    // Whatever is still open is live time, not credited here
    // -----------------------------
    let still_open = match (last_clock_in, last_break_start) {
        (Some(w), Some(b)) if w.at > b.at => Some((OpenKind::Work, w)),
        (_, Some(b)) => Some((OpenKind::Break, b)),
        (Some(w), None) => Some((OpenKind::Work, w)),
        (None, None) => None,
    };
    timeline.open = still_open.map(|(kind, c)| OpenInterval {
        kind,
        since: c.at,
        start_minute: c.minute,
        project: c.project,
    });

    timeline.events = sorted;
    timeline
}

/// Computes the totals of one employee-day.
///
/// Breaks tagged with a slot id are paid in full when the id is in
/// `paid_break_slot_ids` and not at all otherwise; untagged breaks are paid
/// for the minutes they overlap any of `paid_break_slots`.
pub fn aggregate_workday(
    events: &[ClockEvent],
    day_start: DateTime<Utc>,
    paid_break_slots: &[PaidBreakSlot],
    paid_break_slot_ids: &HashSet<String>,
) -> WorkdayTotals {
    let timeline = build_workday(events, day_start);
    totals_for(&timeline, paid_break_slots, paid_break_slot_ids)
}

/// Same as [`aggregate_workday`] for an already built timeline.
pub fn totals_for(
    timeline: &WorkdayTimeline,
    paid_break_slots: &[PaidBreakSlot],
    paid_break_slot_ids: &HashSet<String>,
) -> WorkdayTotals {
    let paid = reconcile_paid_breaks(&timeline.breaks, paid_break_slots, paid_break_slot_ids);

    WorkdayTotals {
        worked_minutes: timeline.work_minutes + paid,
        break_minutes: timeline.break_minutes,
        paid_break_minutes: paid,
    }
}

/// Elapsed minutes of the in-progress interval at `now`.
pub fn live_minutes(open: &OpenInterval, now: DateTime<Utc>) -> f64 {
    ((now - open.since).num_milliseconds() as f64 / 60_000.0).max(0.0)
}

/// Closed work minutes grouped by project.
pub fn project_minutes(timeline: &WorkdayTimeline) -> BTreeMap<String, f64> {
    let mut out = BTreeMap::new();
    for w in &timeline.work {
        let key = w
            .project
            .clone()
            .unwrap_or_else(|| UNASSIGNED_PROJECT.to_string());
        *out.entry(key).or_insert(0.0) += w.minutes;
    }
    out
}
