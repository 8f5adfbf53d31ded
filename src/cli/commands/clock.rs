use crate::cli::parser::{ClockActionArg, Commands};
use crate::config::Config;
use crate::core::clock::{ClockCommand, ClockLogic, ClockRequest};
use crate::core::logic::Core;
use crate::core::transition::ClockAction;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::ui::summary::print_summary;
use crate::utils::date;
use crate::utils::time::{local_date, local_instant, today_in};
use chrono::Utc;

fn to_command(arg: ClockActionArg) -> ClockCommand {
    match arg {
        ClockActionArg::In => ClockCommand::Action(ClockAction::ClockIn),
        ClockActionArg::Out => ClockCommand::Action(ClockAction::ClockOut),
        ClockActionArg::BreakStart => ClockCommand::Action(ClockAction::BreakStart),
        ClockActionArg::BreakEnd => ClockCommand::Action(ClockAction::BreakEnd),
        ClockActionArg::Switch => ClockCommand::ProjectSwitch,
    }
}

/// Record a clock action, then print the recomputed day.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clock {
        action,
        date,
        at,
        employee,
        project,
    } = cmd
    {
        let tz = cfg.tz()?;
        let employee = employee.clone().unwrap_or_else(|| cfg.default_employee.clone());

        if project.is_some() && !matches!(action, ClockActionArg::In | ClockActionArg::Switch) {
            return Err(AppError::Other(
                "--project can only be used with `in` or `switch`.".into(),
            ));
        }

        //
        // 1. Resolve the instant (explicit local date/time, or now)
        //
        let instant = match at {
            Some(hhmm) => {
                let day = match date {
                    Some(d) => date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
                    None => today_in(&tz),
                };
                local_instant(day, hhmm, &tz)?
            }
            None => Utc::now(),
        };

        //
        // 2. Validate and persist
        //
        let mut pool = DbPool::new(&cfg.database)?;
        let outcome = ClockLogic::apply(
            &mut pool,
            &ClockRequest {
                employee: employee.clone(),
                command: to_command(*action),
                at: instant,
                project: project.clone(),
            },
        )?;

        success(format!(
            "{} recorded for {} at {} ({} → {}).",
            outcome.event.kind,
            employee,
            outcome.event.local_date_time_str(&tz),
            outcome.previous,
            outcome.state
        ));

        //
        // 3. Recompute the day from all its events
        //
        let day = local_date(instant, &tz);
        let summary = Core::load_daily_summary(&pool.conn, cfg, &employee, day, Utc::now())?;
        print_summary(&summary, &tz, false, false, cfg.separator());
    }

    Ok(())
}
