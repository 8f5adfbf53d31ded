use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::db::pool::DbPool;
use crate::db::queries::load_event_range;
use crate::errors::AppResult;
use crate::models::day_summary::DaySummary;
use crate::ui::messages::info;
use crate::ui::summary::print_summary;
use crate::utils::date;
use crate::utils::time::{local_date, today_in};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use rusqlite::Connection;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        now: l_now,
        employee,
        events,
        details,
        json,
    } = cmd
    {
        let tz = cfg.tz()?;
        let employee = employee.clone().unwrap_or_else(|| cfg.default_employee.clone());
        let pool = DbPool::new(&cfg.database)?;
        let now = Utc::now();

        let dates = if *l_now {
            vec![today_in(&tz)]
        } else {
            resolve_period(&pool.conn, &employee, period, &tz)?
        };

        let mut summaries: Vec<DaySummary> = Vec::new();
        for d in dates {
            let summary = Core::load_daily_summary(&pool.conn, cfg, &employee, d, now)?;
            if !summary.timeline.events.is_empty() {
                summaries.push(summary);
            }
        }

        if *json {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
            return Ok(());
        }

        if summaries.is_empty() {
            info(format!("No clock events for {} in the selected period.", employee));
            return Ok(());
        }

        for s in &summaries {
            print_summary(s, &tz, *events, *details, cfg.separator());
        }

        let worked: f64 = summaries.iter().map(|s| s.totals.worked_minutes).sum();
        let surplus: f64 = summaries.iter().map(|s| s.surplus).sum();
        println!(
            "\nDays: {} | Total worked: {} | Total surplus: {}",
            summaries.len(),
            crate::utils::mins2readable(worked, false, false),
            crate::utils::mins2readable(surplus, true, false),
        );
    }
    Ok(())
}

fn resolve_period(
    conn: &Connection,
    employee: &str,
    period: &Option<String>,
    tz: &Tz,
) -> AppResult<Vec<NaiveDate>> {
    match period.as_deref() {
        Some("all") => Ok(match load_event_range(conn, employee)? {
            Some((first, last)) => date::date_range(local_date(first, tz), local_date(last, tz)),
            None => Vec::new(),
        }),
        Some(p) => date::generate_from_period(p),
        None => date::current_month_dates(today_in(tz)),
    }
}
