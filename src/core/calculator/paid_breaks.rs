//! Decides how much of each closed break is compensable.

use crate::core::calculator::workday::BreakInterval;
use crate::models::paid_break::PaidBreakSlot;
use std::collections::HashSet;
use tracing::debug;

/// Paid minutes of a single break.
pub fn paid_minutes(
    brk: &BreakInterval,
    paid_break_slots: &[PaidBreakSlot],
    paid_break_slot_ids: &HashSet<String>,
) -> f64 {
    match &brk.slot_id {
        // Automatic break whose slot is still configured as paid
        Some(id) if paid_break_slot_ids.contains(id) => brk.minutes,

        // Automatic break from a slot that is no longer paid
        Some(id) => {
            debug!(slot_id = %id, "automatic break slot is not paid");
            0.0
        }

        // Manual break: only the minutes inside configured slots
        None => paid_break_slots
            .iter()
            .map(|slot| slot.overlap_minutes(brk.start_minute, brk.end_minute))
            .fold(0.0, |acc, m| acc + m),
    }
}

pub fn reconcile_paid_breaks(
    breaks: &[BreakInterval],
    paid_break_slots: &[PaidBreakSlot],
    paid_break_slot_ids: &HashSet<String>,
) -> f64 {
    breaks
        .iter()
        .map(|b| paid_minutes(b, paid_break_slots, paid_break_slot_ids))
        // `sum()` of an empty f64 iterator is -0.0
        .fold(0.0, |acc, m| acc + m)
}
