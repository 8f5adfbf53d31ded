//! Formatting utilities used for CLI outputs.

use crate::models::clock_state::ClockState;
use crate::utils::colors::{GREEN, GREY, YELLOW};

/// Fractional minutes → "HHh MMm" (or "HH:MM" when `short`), rounded to the minute.
pub fn mins2readable(mins: f64, want_sign: bool, short: bool) -> String {
    let rounded = mins.round() as i64;
    let abs_m = rounded.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = match (want_sign, rounded.signum()) {
        (true, 1) => "+",
        (true, -1) => "-",
        _ => "",
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Human label and ANSI colour of a clock state.
pub fn describe_state(state: ClockState) -> (&'static str, &'static str) {
    match state {
        ClockState::ClockedIn => ("Clocked in", GREEN),
        ClockState::OnBreak => ("On break", YELLOW),
        ClockState::ClockedOut => ("Clocked out", GREY),
    }
}

/// Minutes with at most two decimals, trailing zeros dropped ("480", "12.5").
pub fn fmt_minutes(mins: f64) -> String {
    let s = format!("{:.2}", mins);
    match s.trim_end_matches('0').trim_end_matches('.') {
        "-0" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}
