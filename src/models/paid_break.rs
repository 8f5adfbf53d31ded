use serde::Serialize;

/// A configured time-of-day window during which break time still counts as worked time.
///
/// Minutes are counted from local midnight and the window is half-open:
/// `[start_minutes, end_minutes)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaidBreakSlot {
    pub id: String,
    pub start_minutes: u32,
    pub end_minutes: u32,
    /// The sweep inserts this break on its own when the employee worked through it.
    pub automatic: bool,
}

impl PaidBreakSlot {
    pub fn new(id: &str, start_minutes: u32, end_minutes: u32) -> Self {
        Self {
            id: id.to_string(),
            start_minutes,
            end_minutes,
            automatic: false,
        }
    }

    pub fn automatic(mut self) -> Self {
        self.automatic = true;
        self
    }

    /// Length of the intersection between `[start, end)` and this slot.
    pub fn overlap_minutes(&self, start: f64, end: f64) -> f64 {
        let lo = start.max(f64::from(self.start_minutes));
        let hi = end.min(f64::from(self.end_minutes));
        (hi - lo).max(0.0)
    }
}
