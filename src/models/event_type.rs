use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a physical clocking action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockEventType {
    ClockIn,
    ClockOut,
    BreakStart,
    BreakEnd,
    /// Closes one work interval and opens the next one at the same instant.
    ProjectSwitch,
}

impl ClockEventType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ClockEventType::ClockIn => "CLOCK_IN",
            ClockEventType::ClockOut => "CLOCK_OUT",
            ClockEventType::BreakStart => "BREAK_START",
            ClockEventType::BreakEnd => "BREAK_END",
            ClockEventType::ProjectSwitch => "PROJECT_SWITCH",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "CLOCK_IN" => Some(ClockEventType::ClockIn),
            "CLOCK_OUT" => Some(ClockEventType::ClockOut),
            "BREAK_START" => Some(ClockEventType::BreakStart),
            "BREAK_END" => Some(ClockEventType::BreakEnd),
            "PROJECT_SWITCH" => Some(ClockEventType::ProjectSwitch),
            _ => None,
        }
    }
}

impl fmt::Display for ClockEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
