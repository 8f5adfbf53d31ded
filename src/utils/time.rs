//! Time utilities: parsing HH:MM and MM-DD, local day boundaries.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Days, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// "HH:MM" → minutes since midnight.
pub fn parse_minutes_of_day(t: &str) -> AppResult<u32> {
    let parsed = parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))?;
    Ok(parsed.signed_duration_since(NaiveTime::MIN).num_minutes() as u32)
}

/// "MM-DD" → (month, day), validated against a leap year so "02-29" is accepted.
pub fn parse_month_day(s: &str) -> AppResult<(u32, u32)> {
    let (m, d) = s
        .split_once('-')
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))?;
    let month: u32 = m.parse().map_err(|_| AppError::InvalidDate(s.to_string()))?;
    let day: u32 = d.parse().map_err(|_| AppError::InvalidDate(s.to_string()))?;

    NaiveDate::from_ymd_opt(2000, month, day)
        .map(|_| (month, day))
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Resolves a local wall-clock time to an absolute instant.
/// Ambiguous times (DST fall-back) take the earlier instant; skipped times are rejected.
pub fn resolve_local(naive: NaiveDateTime, tz: &Tz) -> AppResult<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(AppError::InvalidTime(format!(
            "{} does not exist in {}",
            naive.format("%Y-%m-%d %H:%M"),
            tz
        ))),
    }
}

/// Local midnight of `date` in `tz`, as an absolute instant.
/// Zones that skip midnight start the day at the first valid local time.
pub fn day_start(date: NaiveDate, tz: &Tz) -> AppResult<DateTime<Utc>> {
    let midnight = date.and_time(NaiveTime::MIN);
    match resolve_local(midnight, tz) {
        Ok(dt) => Ok(dt),
        Err(_) => {
            let one_am = date.and_time(NaiveTime::from_hms_opt(1, 0, 0).unwrap_or(NaiveTime::MIN));
            resolve_local(one_am, tz)
        }
    }
}

/// `[start, end)` of the local calendar day `date`.
pub fn day_bounds(date: NaiveDate, tz: &Tz) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let next = date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::InvalidDate(date.to_string()))?;
    Ok((day_start(date, tz)?, day_start(next, tz)?))
}

/// `date` at local "HH:MM" in `tz`.
pub fn local_instant(date: NaiveDate, hhmm: &str, tz: &Tz) -> AppResult<DateTime<Utc>> {
    let time = parse_time(hhmm).ok_or_else(|| AppError::InvalidTime(hhmm.to_string()))?;
    resolve_local(date.and_time(time), tz)
}

/// Calendar day of `ts` in `tz`.
pub fn local_date(ts: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    ts.with_timezone(tz).date_naive()
}

/// Today's calendar date in `tz`.
pub fn today_in(tz: &Tz) -> NaiveDate {
    local_date(Utc::now(), tz)
}
