use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sweep::SweepLogic;
use crate::db::pool::DbPool;
use crate::db::queries::load_employees;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::date;
use crate::utils::time::today_in;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sweep {
        date,
        employee,
        all_employees,
    } = cmd
    {
        let tz = cfg.tz()?;
        let day = match date {
            Some(d) => date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => today_in(&tz),
        };

        let mut pool = DbPool::new(&cfg.database)?;

        let employees = if *all_employees {
            load_employees(&pool.conn)?
        } else {
            vec![employee.clone().unwrap_or_else(|| cfg.default_employee.clone())]
        };

        let now = Utc::now();
        let mut total = 0;
        for emp in &employees {
            let inserted = SweepLogic::apply(&mut pool, cfg, emp, day, now)?;
            for ev in &inserted {
                info(format!(
                    "{}: {} at {} (slot {})",
                    emp,
                    ev.kind,
                    ev.local_time_str(&tz),
                    ev.automatic_break_slot_id.as_deref().unwrap_or("-")
                ));
            }
            total += inserted.len();
        }

        success(format!(
            "Sweep for {} done: {} automatic event(s) inserted.",
            day, total
        ));
    }

    Ok(())
}
