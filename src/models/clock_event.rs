use super::event_type::ClockEventType;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockEvent {
    pub id: i64,                                 // ⇔ clock_events.id
    pub employee: String,                        // ⇔ clock_events.employee
    pub kind: ClockEventType,                    // ⇔ clock_events.kind ('CLOCK_IN' ...)
    pub timestamp: DateTime<Utc>,                // ⇔ clock_events.timestamp (RFC3339, UTC)
    pub is_automatic: bool,                      // ⇔ clock_events.is_automatic (0/1)
    pub automatic_break_slot_id: Option<String>, // ⇔ clock_events.break_slot_id
    pub project: Option<String>,                 // ⇔ clock_events.project
    pub source: String,                          // ⇔ clock_events.source ('cli' | 'sweep')
    pub created_at: String,                      // ⇔ clock_events.created_at (RFC3339)
}

impl ClockEvent {
    /// Builds a manual event as issued from the CLI.
    /// - `id = 0` until the row is inserted
    /// - `source = "cli"`, not automatic, no slot reference
    /// - `created_at = now()` in RFC3339
    pub fn new(employee: &str, kind: ClockEventType, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            employee: employee.to_string(),
            kind,
            timestamp,
            is_automatic: false,
            automatic_break_slot_id: None,
            project: None,
            source: "cli".to_string(),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Builds a system-inserted break event aligned with a paid-break slot.
    pub fn automatic(
        employee: &str,
        kind: ClockEventType,
        timestamp: DateTime<Utc>,
        slot_id: &str,
    ) -> Self {
        Self {
            is_automatic: true,
            automatic_break_slot_id: Some(slot_id.to_string()),
            source: "sweep".to_string(),
            ..Self::new(employee, kind, timestamp)
        }
    }

    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project;
        self
    }

    pub fn local_time_str(&self, tz: &Tz) -> String {
        self.timestamp.with_timezone(tz).format("%H:%M").to_string()
    }

    pub fn local_date_time_str(&self, tz: &Tz) -> String {
        self.timestamp
            .with_timezone(tz)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}
