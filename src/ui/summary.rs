//! Text rendering of day summaries.

use crate::models::day_summary::DaySummary;
use crate::utils::colors::{RESET, color_for_surplus};
use crate::utils::formatting::{describe_state, fmt_minutes, mins2readable};
use crate::utils::table::{Column, Table};
use chrono::Duration;
use chrono_tz::Tz;

fn minute_label(summary: &DaySummary, tz: &Tz, minute: f64) -> String {
    let (start, _) = match crate::utils::time::day_bounds(summary.date, tz) {
        Ok(bounds) => bounds,
        Err(_) => return fmt_minutes(minute),
    };
    let at = start + Duration::milliseconds((minute * 60_000.0).round() as i64);
    at.with_timezone(tz).format("%H:%M").to_string()
}

pub fn print_summary(summary: &DaySummary, tz: &Tz, show_events: bool, details: bool, sep: char) {
    let t = &summary.totals;

    crate::ui::messages::header(format!(
        "{} ({}) · {}",
        summary.date,
        summary.date.format("%a"),
        summary.employee
    ));

    println!(
        "Worked: {} min ({}) | Break: {} min | Paid break: {} min",
        fmt_minutes(t.worked_minutes),
        mins2readable(t.worked_minutes, false, false),
        fmt_minutes(t.break_minutes),
        fmt_minutes(t.paid_break_minutes),
    );
    println!(
        "Expected: {} min | Surplus: {}{} min ({}){}",
        fmt_minutes(summary.expected),
        color_for_surplus(summary.surplus),
        fmt_minutes(summary.surplus),
        mins2readable(summary.surplus, true, true),
        RESET,
    );

    if let Some(open) = &summary.timeline.open {
        let (label, color) = describe_state(summary.state);
        println!(
            "{}{}{} since {} (live {} min, not counted)",
            color,
            label,
            RESET,
            open.since.with_timezone(tz).format("%H:%M"),
            fmt_minutes(summary.live_minutes),
        );
    }

    if summary.timeline.ignored_events > 0 {
        println!(
            "Ignored out-of-sequence events: {}",
            summary.timeline.ignored_events
        );
    }

    if show_events {
        let mut table = Table::new(vec![
            Column::new("#", 4),
            Column::new("Time", 5),
            Column::new("Kind", 14),
            Column::new("Auto", 4),
            Column::new("Slot", 10),
            Column::new("Project", 10),
        ]);
        for ev in &summary.timeline.events {
            table.add_row(vec![
                ev.id.to_string(),
                ev.local_time_str(tz),
                ev.kind.to_db_str().to_string(),
                if ev.is_automatic { "yes" } else { "" }.to_string(),
                ev.automatic_break_slot_id.clone().unwrap_or_default(),
                ev.project.clone().unwrap_or_default(),
            ]);
        }
        print!("{}", table.render(sep));
    }

    if details {
        for w in &summary.timeline.work {
            println!(
                "  work  {} → {}  {} min{}",
                minute_label(summary, tz, w.start_minute),
                minute_label(summary, tz, w.end_minute),
                fmt_minutes(w.minutes),
                w.project
                    .as_ref()
                    .map(|p| format!(" [{}]", p))
                    .unwrap_or_default(),
            );
        }
        for b in &summary.timeline.breaks {
            println!(
                "  break {} → {}  {} min{}",
                minute_label(summary, tz, b.start_minute),
                minute_label(summary, tz, b.end_minute),
                fmt_minutes(b.minutes),
                b.slot_id
                    .as_ref()
                    .map(|s| format!(" (slot {})", s))
                    .unwrap_or_default(),
            );
        }
        for (project, minutes) in &summary.projects {
            println!("  project {}: {} min", project, fmt_minutes(*minutes));
        }
    }
}
