//! Versioned schema migrations.
//!
//! Every migration runs once: after it succeeds a `migration_applied` row with
//! its version is written to the `log` table, and later runs skip it.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250901_0001_create_clock_events",
        description: "Created clock_events table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS clock_events (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            employee       TEXT NOT NULL,
            timestamp      TEXT NOT NULL,
            kind           TEXT NOT NULL CHECK(kind IN
                               ('CLOCK_IN','CLOCK_OUT','BREAK_START','BREAK_END','PROJECT_SWITCH')),
            is_automatic   INTEGER NOT NULL DEFAULT 0,
            break_slot_id  TEXT,
            source         TEXT NOT NULL DEFAULT 'cli',
            created_at     TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250901_0002_clock_events_indexes",
        description: "Added employee/timestamp indexes",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_clock_events_employee_ts
            ON clock_events(employee, timestamp);
        CREATE INDEX IF NOT EXISTS idx_clock_events_slot
            ON clock_events(employee, break_slot_id);
        "#,
    },
    Migration {
        version: "20250915_0003_add_project_column",
        description: "Added project column to clock_events",
        sql: "ALTER TABLE clock_events ADD COLUMN project TEXT;",
    },
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Versions not yet recorded as applied, in execution order.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut pending = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            pending.push(m.version);
        }
    }
    Ok(pending)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            debug!(version = m.version, "migration already applied");
            continue;
        }
        apply(conn, m)?;
    }

    Ok(())
}
