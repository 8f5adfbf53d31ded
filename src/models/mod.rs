pub mod clock_event;
pub mod clock_state;
pub mod day_summary;
pub mod event_type;
pub mod paid_break;
pub mod workday_totals;
