use super::event_type::ClockEventType;
use serde::Serialize;
use std::fmt;

/// Employee clock state. Never stored: always derived from the latest event.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockState {
    #[default]
    ClockedOut,
    ClockedIn,
    OnBreak,
}

impl ClockState {
    pub const ALL: [ClockState; 3] = [
        ClockState::ClockedOut,
        ClockState::ClockedIn,
        ClockState::OnBreak,
    ];

    /// Maps the type of the most recent event to the state it leaves the employee in.
    pub fn from_last_event(last: Option<ClockEventType>) -> Self {
        match last {
            None | Some(ClockEventType::ClockOut) => ClockState::ClockedOut,
            Some(ClockEventType::ClockIn)
            | Some(ClockEventType::BreakEnd)
            | Some(ClockEventType::ProjectSwitch) => ClockState::ClockedIn,
            Some(ClockEventType::BreakStart) => ClockState::OnBreak,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClockState::ClockedOut => "CLOCKED_OUT",
            ClockState::ClockedIn => "CLOCKED_IN",
            ClockState::OnBreak => "ON_BREAK",
        }
    }
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
