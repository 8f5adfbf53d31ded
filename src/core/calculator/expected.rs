use crate::core::calculator::workday::WorkdayTimeline;
use crate::core::schedule::EffectiveSchedule;

/// Expected minutes for the day. A day without clock events expects nothing,
/// so untouched days never show up as a deficit.
pub fn calculate_expected(timeline: &WorkdayTimeline, schedule: &EffectiveSchedule) -> f64 {
    if timeline.events.is_empty() {
        return 0.0;
    }

    schedule.expected_minutes
}
