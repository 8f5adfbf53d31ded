use crate::errors::{AppError, AppResult};
use crate::models::clock_event::ClockEvent;
use crate::models::event_type::ClockEventType;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_EVENT: &str = "SELECT id, employee, timestamp, kind, is_automatic, break_slot_id, \
                            project, source, created_at FROM clock_events";

/// Canonical column format: fixed-width UTC, so text order is time order.
pub fn ts_to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<ClockEvent> {
    let ts_str: String = row.get("timestamp")?;
    let timestamp = DateTime::parse_from_rfc3339(&ts_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(AppError::InvalidTime(ts_str.clone())))?;

    let kind_str: String = row.get("kind")?;
    let kind = ClockEventType::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(AppError::InvalidEventType(kind_str.clone())))?;

    Ok(ClockEvent {
        id: row.get("id")?,
        employee: row.get("employee")?,
        kind,
        timestamp,
        is_automatic: row.get::<_, i32>("is_automatic")? == 1,
        automatic_break_slot_id: row.get("break_slot_id")?,
        project: row.get("project")?,
        source: row.get("source")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert an event and return its new id.
pub fn insert_event(conn: &Connection, ev: &ClockEvent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO clock_events
            (employee, timestamp, kind, is_automatic, break_slot_id, project, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            ev.employee,
            ts_to_db(&ev.timestamp),
            ev.kind.to_db_str(),
            if ev.is_automatic { 1 } else { 0 },
            ev.automatic_break_slot_id,
            ev.project,
            ev.source,
            ev.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent event of an employee, by timestamp (ties broken by insertion order).
pub fn load_last_event(conn: &Connection, employee: &str) -> AppResult<Option<ClockEvent>> {
    let sql = format!("{SELECT_EVENT} WHERE employee = ?1 ORDER BY timestamp DESC, id DESC LIMIT 1");
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row([employee], map_row).optional()?)
}

/// Events of an employee with `start <= timestamp < end`, oldest first.
pub fn load_events_between(
    conn: &Connection,
    employee: &str,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
) -> AppResult<Vec<ClockEvent>> {
    let sql = format!(
        "{SELECT_EVENT} WHERE employee = ?1 AND timestamp >= ?2 AND timestamp < ?3
         ORDER BY timestamp ASC, id ASC"
    );
    let mut stmt = conn.prepare_cached(&sql)?;

    let rows = stmt.query_map(params![employee, ts_to_db(start), ts_to_db(end)], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Distinct employees with at least one event.
pub fn load_employees(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT DISTINCT employee FROM clock_events ORDER BY employee")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// First and last event instants of an employee.
pub fn load_event_range(
    conn: &Connection,
    employee: &str,
) -> AppResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
    let bounds: (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(timestamp), MAX(timestamp) FROM clock_events WHERE employee = ?1",
        [employee],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    match bounds {
        (Some(first), Some(last)) => {
            let parse = |s: &str| {
                DateTime::parse_from_rfc3339(s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|_| AppError::InvalidTime(s.to_string()))
            };
            Ok(Some((parse(&first)?, parse(&last)?)))
        }
        _ => Ok(None),
    }
}
