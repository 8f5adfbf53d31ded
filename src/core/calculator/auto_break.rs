//! Plans the breaks the sweep inserts for automatic paid-break slots.
//!
//! An automatic slot becomes a break when the employee worked straight through
//! it: the slot lies inside one work span and ends before that span does, no
//! break touches it and it has not been generated before. Slot bounds must be
//! minutes elapsed since the day anchor (see `EffectiveSchedule::anchored_to`),
//! the same scale the aggregator uses.

use crate::core::calculator::workday::{OpenKind, build_workday, minute_of_day};
use crate::models::clock_event::ClockEvent;
use crate::models::event_type::ClockEventType;
use crate::models::paid_break::PaidBreakSlot;
use chrono::{DateTime, Duration, Utc};

/// Merges touching or overlapping spans, so project switches do not split work.
fn merge_spans(mut spans: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

fn at_minute(day_start: DateTime<Utc>, minute: u32) -> DateTime<Utc> {
    day_start + Duration::minutes(i64::from(minute))
}

/// Break events to insert for `employee` on the day anchored at `day_start`.
/// Slots that have not ended by `now` are left for a later sweep.
pub fn plan_automatic_breaks(
    events: &[ClockEvent],
    employee: &str,
    day_start: DateTime<Utc>,
    slots: &[PaidBreakSlot],
    now: DateTime<Utc>,
) -> Vec<ClockEvent> {
    let timeline = build_workday(events, day_start);
    let now_minute = minute_of_day(now, day_start);

    let mut spans: Vec<(f64, f64)> = timeline
        .work
        .iter()
        .map(|w| (w.start_minute, w.end_minute))
        .collect();
    let mut breaks: Vec<(f64, f64)> = timeline
        .breaks
        .iter()
        .map(|b| (b.start_minute, b.end_minute))
        .collect();

    if let Some(open) = &timeline.open {
        match open.kind {
            OpenKind::Work => spans.push((open.start_minute, now_minute)),
            OpenKind::Break => breaks.push((open.start_minute, now_minute)),
        }
    }
    let spans = merge_spans(spans);

    let mut planned = Vec::new();
    for slot in slots.iter().filter(|s| s.automatic) {
        let start = f64::from(slot.start_minutes);
        let end = f64::from(slot.end_minutes);

        if end > now_minute {
            continue;
        }

        let already_generated = events
            .iter()
            .any(|e| e.automatic_break_slot_id.as_deref() == Some(slot.id.as_str()));
        if already_generated {
            continue;
        }

        if breaks.iter().any(|&(bs, be)| slot.overlap_minutes(bs, be) > 0.0) {
            continue;
        }

        // A break ending on the closing event would tie with it and become the
        // latest event, leaving the employee clocked in.
        if !spans.iter().any(|&(ws, we)| ws <= start && we > end) {
            continue;
        }

        planned.push(ClockEvent::automatic(
            employee,
            ClockEventType::BreakStart,
            at_minute(day_start, slot.start_minutes),
            &slot.id,
        ));
        planned.push(ClockEvent::automatic(
            employee,
            ClockEventType::BreakEnd,
            at_minute(day_start, slot.end_minutes),
            &slot.id,
        ));
    }

    planned
}
