use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use ansi_term::Colour;
use regex::Regex;

const MAX_OP_WIDTH: usize = 60;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Colour of the operation column.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "clock" => Colour::Green,
        "sweep" => Colour::Cyan,
        "config" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

pub struct LogLogic;

impl LogLogic {
    pub fn load(pool: &DbPool) -> AppResult<Vec<LogEntry>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(LogEntry {
                id: row.get(0)?,
                date: row.get(1)?,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }
        Ok(entries)
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = Self::load(pool)?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let ansi = Regex::new(r"\x1B\[[0-9;]*[mK]").map_err(|e| AppError::Other(e.to_string()))?;

        // Width is measured on the plain text: colour codes take no columns.
        let rendered: Vec<(i64, String, String, usize, String)> = entries
            .into_iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(e.date);

                let color = color_for_operation(&e.operation);
                let plain = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };
                let plain = truncate(&plain, MAX_OP_WIDTH);
                let colored = match plain.split_once(' ') {
                    Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                    None => color.paint(plain.as_str()).to_string(),
                };
                let visible = ansi.replace_all(&colored, "").chars().count();

                (e.id, date, colored, visible, e.message)
            })
            .collect();

        let id_w = rendered.iter().map(|r| r.0.to_string().len()).max().unwrap_or(1);
        let date_w = rendered.iter().map(|r| r.1.len()).max().unwrap_or(10);
        let op_w = rendered.iter().map(|r| r.3).max().unwrap_or(10).min(MAX_OP_WIDTH);

        println!("📜 Internal log:\n");
        for (id, date, colored, visible, message) in rendered {
            let padding = " ".repeat(op_w.saturating_sub(visible));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id, date, colored, padding, message
            );
        }

        Ok(())
    }
}
