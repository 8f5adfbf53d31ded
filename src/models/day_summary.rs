use crate::core::calculator::workday::WorkdayTimeline;
use crate::core::schedule::ScheduleSource;
use crate::models::clock_state::ClockState;
use crate::models::workday_totals::WorkdayTotals;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub employee: String,
    /// State left by the day's last event.
    pub state: ClockState,
    pub timeline: WorkdayTimeline,
    pub totals: WorkdayTotals,
    pub expected: f64,
    pub surplus: f64,
    pub schedule: ScheduleSource,
    /// Elapsed minutes of the interval still open, not part of `totals`.
    pub live_minutes: f64,
    pub projects: BTreeMap<String, f64>,
}
