use crate::models::workday_totals::WorkdayTotals;

pub fn calculate_surplus(totals: &WorkdayTotals, expected: f64) -> f64 {
    totals.worked_minutes - expected
}
