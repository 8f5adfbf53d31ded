use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Every date from `start` to `end`, both included.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// First and last day covered by a period: `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
pub fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(format!("Invalid period: {}", p));

    // YYYY-MM-DD
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Some(first) = parse_date(&format!("{p}-01")) {
        let next = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
        };
        let last = next.and_then(|n| n.pred_opt()).ok_or_else(invalid)?;
        return Ok((first, last));
    }

    // YYYY
    if let Ok(year) = p.parse::<i32>() {
        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(invalid)?;
        return Ok((first, last));
    }

    Err(invalid())
}

/// Dates covered by `YYYY[-MM[-DD]]` or a `FROM:TO` range of those.
pub fn generate_from_period(p: &str) -> AppResult<Vec<NaiveDate>> {
    if let Some((from, to)) = p.split_once(':') {
        let (start, _) = period_bounds(from)?;
        let (_, end) = period_bounds(to)?;
        if end < start {
            return Err(AppError::InvalidDate(format!("Range {} ends before it starts", p)));
        }
        return Ok(date_range(start, end));
    }

    let (start, end) = period_bounds(p)?;
    Ok(date_range(start, end))
}

pub fn current_month_dates(today: NaiveDate) -> AppResult<Vec<NaiveDate>> {
    generate_from_period(&today.format("%Y-%m").to_string())
}
