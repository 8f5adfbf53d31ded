use serde::Serialize;

/// Aggregated minutes for one employee-day. All values are fractional minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WorkdayTotals {
    /// Closed work intervals plus paid break time.
    pub worked_minutes: f64,
    /// Raw length of every closed break, paid or not.
    pub break_minutes: f64,
    pub paid_break_minutes: f64,
}
