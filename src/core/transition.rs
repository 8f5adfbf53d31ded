//! Clock transition validator.
//!
//! A finite-state machine over [`ClockState`] deciding which clock actions are
//! legal. The functions here are pure lookups: they never touch the database
//! and never fail. Callers decide whether a rejection becomes an error.
//!
//! | current      | action       | next         |
//! |--------------|--------------|--------------|
//! | CLOCKED_OUT  | CLOCK_IN     | CLOCKED_IN   |
//! | CLOCKED_IN   | CLOCK_OUT    | CLOCKED_OUT  |
//! | CLOCKED_IN   | BREAK_START  | ON_BREAK     |
//! | ON_BREAK     | BREAK_END    | CLOCKED_IN   |

use crate::models::clock_state::ClockState;
use crate::models::event_type::ClockEventType;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A clock action requested by an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockAction {
    ClockIn,
    ClockOut,
    BreakStart,
    BreakEnd,
}

impl ClockAction {
    pub const ALL: [ClockAction; 4] = [
        ClockAction::ClockIn,
        ClockAction::ClockOut,
        ClockAction::BreakStart,
        ClockAction::BreakEnd,
    ];

    /// The event persisted when this action is accepted.
    pub fn event_type(&self) -> ClockEventType {
        match self {
            ClockAction::ClockIn => ClockEventType::ClockIn,
            ClockAction::ClockOut => ClockEventType::ClockOut,
            ClockAction::BreakStart => ClockEventType::BreakStart,
            ClockAction::BreakEnd => ClockEventType::BreakEnd,
        }
    }
}

impl fmt::Display for ClockAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_type().to_db_str())
    }
}

/// Rejected (state, action) pair, carrying the user-facing explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransitionError {
    pub state: ClockState,
    pub action: ClockAction,
    pub message: &'static str,
}

const GENERIC_REJECTION: &str = "Transition not allowed.";

/// Whether `action` is legal from `state`.
pub fn validate_transition(state: ClockState, action: ClockAction) -> bool {
    matches!(
        (state, action),
        (ClockState::ClockedOut, ClockAction::ClockIn)
            | (ClockState::ClockedIn, ClockAction::ClockOut)
            | (ClockState::ClockedIn, ClockAction::BreakStart)
            | (ClockState::OnBreak, ClockAction::BreakEnd)
    )
}

/// State reached after `action`. Only meaningful for a pair accepted by
/// [`validate_transition`]; use [`transition`] when the pair is not known to be valid.
pub fn next_state(action: ClockAction) -> ClockState {
    match action {
        ClockAction::ClockIn | ClockAction::BreakEnd => ClockState::ClockedIn,
        ClockAction::ClockOut => ClockState::ClockedOut,
        ClockAction::BreakStart => ClockState::OnBreak,
    }
}

/// Explanation shown to the employee when `action` is refused in `state`.
pub fn describe_rejection(state: ClockState, action: ClockAction) -> &'static str {
    match (state, action) {
        (ClockState::ClockedOut, ClockAction::ClockOut) => {
            "Cannot clock out without a prior clock-in."
        }
        (ClockState::ClockedOut, ClockAction::BreakStart) => {
            "Cannot start a break while clocked out."
        }
        (ClockState::ClockedOut, ClockAction::BreakEnd) => {
            "Cannot end a break that was never started."
        }
        (ClockState::ClockedIn, ClockAction::ClockIn) => "Already clocked in.",
        (ClockState::ClockedIn, ClockAction::BreakEnd) => {
            "Cannot end a break: no break is in progress."
        }
        (ClockState::OnBreak, ClockAction::ClockIn) => {
            "Already clocked in and currently on break; end the break instead."
        }
        (ClockState::OnBreak, ClockAction::ClockOut) => {
            "End the current break before clocking out."
        }
        (ClockState::OnBreak, ClockAction::BreakStart) => "A break is already in progress.",
        _ => GENERIC_REJECTION,
    }
}

/// Validates and applies `action` in one step.
pub fn transition(state: ClockState, action: ClockAction) -> Result<ClockState, TransitionError> {
    if validate_transition(state, action) {
        Ok(next_state(action))
    } else {
        Err(TransitionError {
            state,
            action,
            message: describe_rejection(state, action),
        })
    }
}

/// A project switch keeps the employee clocked in, so it needs an open work interval.
pub fn validate_project_switch(state: ClockState) -> Result<(), &'static str> {
    match state {
        ClockState::ClockedIn => Ok(()),
        ClockState::ClockedOut => Err("Cannot switch project while not clocked in."),
        ClockState::OnBreak => Err("End the current break before switching project."),
    }
}
