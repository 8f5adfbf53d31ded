use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::db::pool::DbPool;
use crate::db::queries::load_last_event;
use crate::errors::AppResult;
use crate::models::clock_state::ClockState;
use crate::ui::summary::print_summary;
use crate::utils::colors::RESET;
use crate::utils::formatting::{describe_state, fmt_minutes};
use crate::utils::time::today_in;
use chrono::Utc;

/// Current derived state, plus today's totals.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { employee } = cmd {
        let tz = cfg.tz()?;
        let employee = employee.clone().unwrap_or_else(|| cfg.default_employee.clone());
        let pool = DbPool::new(&cfg.database)?;
        let now = Utc::now();

        let last = load_last_event(&pool.conn, &employee)?;
        let state = ClockState::from_last_event(last.as_ref().map(|e| e.kind));
        let (label, color) = describe_state(state);

        match &last {
            Some(ev) if state != ClockState::ClockedOut => {
                let elapsed = (now - ev.timestamp).num_milliseconds() as f64 / 60_000.0;
                println!(
                    "{}: {}{}{} since {} ({} min)",
                    employee,
                    color,
                    label,
                    RESET,
                    ev.local_date_time_str(&tz),
                    fmt_minutes(elapsed.max(0.0)),
                );
            }
            Some(ev) => println!(
                "{}: {}{}{} (last event {} at {})",
                employee,
                color,
                label,
                RESET,
                ev.kind,
                ev.local_date_time_str(&tz)
            ),
            None => println!("{}: {}{}{} (no clock events yet)", employee, color, label, RESET),
        }

        let summary = Core::load_daily_summary(&pool.conn, cfg, &employee, today_in(&tz), now)?;
        if !summary.timeline.events.is_empty() {
            print_summary(&summary, &tz, false, false, cfg.separator());
        }
    }

    Ok(())
}
