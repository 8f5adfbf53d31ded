//! Resolves the schedule that applies to an employee on a given day.

use crate::config::{IntensiveScheduleConfig, PaidBreakConfig, ScheduleConfig};
use crate::errors::{AppError, AppResult};
use crate::models::paid_break::PaidBreakSlot;
use crate::utils::time::{parse_minutes_of_day, parse_month_day, resolve_local};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ScheduleSource {
    Regular,
    Intensive(String),
    RestDay,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveSchedule {
    pub expected_minutes: f64,
    pub paid_break_slots: Vec<PaidBreakSlot>,
    pub source: ScheduleSource,
}

impl EffectiveSchedule {
    /// Slot ids whose automatic breaks are paid in full.
    pub fn paid_break_slot_ids(&self) -> HashSet<String> {
        self.paid_break_slots.iter().map(|s| s.id.clone()).collect()
    }

    /// Rebases slot bounds from local wall-clock minutes to minutes elapsed
    /// since `day_start`, the scale intervals are measured in. The two only
    /// differ on days where the UTC offset changes.
    pub fn anchored_to(mut self, date: NaiveDate, tz: &Tz, day_start: DateTime<Utc>) -> Self {
        for slot in &mut self.paid_break_slots {
            slot.start_minutes = elapsed_minutes(date, slot.start_minutes, tz, day_start);
            slot.end_minutes = elapsed_minutes(date, slot.end_minutes, tz, day_start);
        }
        self
    }
}

/// Minutes from `day_start` to the local time `wall` (minutes after midnight) on `date`.
/// A wall time skipped by a DST jump keeps its nominal value.
fn elapsed_minutes(date: NaiveDate, wall: u32, tz: &Tz, day_start: DateTime<Utc>) -> u32 {
    let Some(time) = NaiveTime::from_hms_opt(wall / 60, wall % 60, 0) else {
        return wall;
    };
    match resolve_local(date.and_time(time), tz) {
        Ok(at) => u32::try_from((at - day_start).num_minutes()).unwrap_or(wall),
        Err(_) => {
            debug!(%date, wall, "paid break bound falls in a DST gap");
            wall
        }
    }
}

pub fn parse_paid_breaks(cfg: &[PaidBreakConfig]) -> AppResult<Vec<PaidBreakSlot>> {
    cfg.iter()
        .map(|b| {
            let start = parse_minutes_of_day(&b.start)?;
            let end = parse_minutes_of_day(&b.end)?;
            if end <= start {
                return Err(AppError::Config(format!(
                    "paid break '{}' ends ({}) before it starts ({})",
                    b.id, b.end, b.start
                )));
            }
            Ok(PaidBreakSlot {
                id: b.id.clone(),
                start_minutes: start,
                end_minutes: end,
                automatic: b.automatic,
            })
        })
        .collect()
}

/// Whether `date` falls inside the inclusive month-day window `from..=to`.
/// A window with `to` before `from` wraps the new year.
pub fn in_period(date: NaiveDate, from: (u32, u32), to: (u32, u32)) -> bool {
    let md = (date.month(), date.day());
    if from <= to {
        from <= md && md <= to
    } else {
        md >= from || md <= to
    }
}

fn matching_intensive<'a>(
    intensive: &'a [IntensiveScheduleConfig],
    date: NaiveDate,
) -> AppResult<Option<&'a IntensiveScheduleConfig>> {
    for period in intensive {
        let from = parse_month_day(&period.from)?;
        let to = parse_month_day(&period.to)?;
        if in_period(date, from, to) {
            return Ok(Some(period));
        }
    }
    Ok(None)
}

/// Effective schedule for `date`: the first intensive period containing it,
/// otherwise the regular schedule. Days outside `workdays` expect no work.
pub fn resolve_effective_schedule(
    schedule: &ScheduleConfig,
    intensive: &[IntensiveScheduleConfig],
    date: NaiveDate,
) -> AppResult<EffectiveSchedule> {
    let is_workday = schedule
        .workdays
        .contains(&date.weekday().number_from_monday());

    let (expected, breaks, source) = match matching_intensive(intensive, date)? {
        Some(period) => (
            period.expected_minutes,
            &period.paid_breaks,
            ScheduleSource::Intensive(period.name.clone()),
        ),
        None => (
            schedule.expected_minutes,
            &schedule.paid_breaks,
            ScheduleSource::Regular,
        ),
    };

    let (expected, source) = if is_workday {
        (expected, source)
    } else {
        (0, ScheduleSource::RestDay)
    };

    Ok(EffectiveSchedule {
        expected_minutes: f64::from(expected),
        paid_break_slots: parse_paid_breaks(breaks)?,
        source,
    })
}
