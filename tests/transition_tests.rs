use rtimeclock::core::transition::{
    ClockAction, describe_rejection, transition, validate_project_switch, validate_transition,
};
use rtimeclock::models::clock_state::ClockState;
use rtimeclock::models::event_type::ClockEventType;
use std::collections::HashSet;

#[test]
fn test_valid_transitions() {
    let valid = [
        (ClockState::ClockedOut, ClockAction::ClockIn, ClockState::ClockedIn),
        (ClockState::ClockedIn, ClockAction::ClockOut, ClockState::ClockedOut),
        (ClockState::ClockedIn, ClockAction::BreakStart, ClockState::OnBreak),
        (ClockState::OnBreak, ClockAction::BreakEnd, ClockState::ClockedIn),
    ];

    for (state, action, next) in valid {
        assert!(validate_transition(state, action), "{} + {}", state, action);
        assert_eq!(transition(state, action), Ok(next));
    }
}

#[test]
fn test_invalid_transitions_have_distinct_messages() {
    let mut rejected = 0;
    let mut messages = HashSet::new();

    for state in ClockState::ALL {
        for action in ClockAction::ALL {
            if validate_transition(state, action) {
                continue;
            }
            rejected += 1;

            let err = transition(state, action).unwrap_err();
            assert_eq!(err.state, state);
            assert_eq!(err.action, action);
            assert!(!err.message.is_empty());
            assert_eq!(err.message, describe_rejection(state, action));
            assert_eq!(err.to_string(), err.message);
            messages.insert(err.message);
        }
    }

    assert_eq!(rejected, 8);
    assert_eq!(messages.len(), 8, "every rejection explains itself differently");
}

#[test]
fn test_clock_out_without_clock_in_message() {
    let err = transition(ClockState::ClockedOut, ClockAction::ClockOut).unwrap_err();
    assert_eq!(err.message, "Cannot clock out without a prior clock-in.");
}

#[test]
fn test_on_break_cannot_clock_out() {
    let err = transition(ClockState::OnBreak, ClockAction::ClockOut).unwrap_err();
    assert_eq!(err.message, "End the current break before clocking out.");
}

#[test]
fn test_state_derivation_from_last_event() {
    assert_eq!(ClockState::from_last_event(None), ClockState::ClockedOut);
    assert_eq!(
        ClockState::from_last_event(Some(ClockEventType::ClockIn)),
        ClockState::ClockedIn
    );
    assert_eq!(
        ClockState::from_last_event(Some(ClockEventType::BreakStart)),
        ClockState::OnBreak
    );
    assert_eq!(
        ClockState::from_last_event(Some(ClockEventType::BreakEnd)),
        ClockState::ClockedIn
    );
    assert_eq!(
        ClockState::from_last_event(Some(ClockEventType::ClockOut)),
        ClockState::ClockedOut
    );
    assert_eq!(
        ClockState::from_last_event(Some(ClockEventType::ProjectSwitch)),
        ClockState::ClockedIn
    );
}

#[test]
fn test_consecutive_clock_ins_never_both_accepted() {
    // Replaying accepted actions through the derived state must refuse the second clock-in
    for start in ClockState::ALL {
        let first = transition(start, ClockAction::ClockIn);
        if let Ok(state) = first {
            let derived = ClockState::from_last_event(Some(ClockAction::ClockIn.event_type()));
            assert_eq!(derived, state);
            assert!(!validate_transition(derived, ClockAction::ClockIn));
        }
    }
}

#[test]
fn test_accepted_sequence_walks_through_states() {
    let actions = [
        ClockAction::ClockIn,
        ClockAction::BreakStart,
        ClockAction::BreakEnd,
        ClockAction::BreakStart,
        ClockAction::BreakEnd,
        ClockAction::ClockOut,
    ];

    let mut state = ClockState::default();
    for action in actions {
        state = transition(state, action).expect("sequence is valid");
        assert_eq!(
            state,
            ClockState::from_last_event(Some(action.event_type()))
        );
    }
    assert_eq!(state, ClockState::ClockedOut);
}

#[test]
fn test_project_switch_requires_open_work() {
    assert!(validate_project_switch(ClockState::ClockedIn).is_ok());
    assert_eq!(
        validate_project_switch(ClockState::ClockedOut),
        Err("Cannot switch project while not clocked in.")
    );
    assert_eq!(
        validate_project_switch(ClockState::OnBreak),
        Err("End the current break before switching project.")
    );
}
