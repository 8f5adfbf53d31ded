use crate::core::transition::{self, ClockAction};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_event, load_last_event, ts_to_db};
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::ClockEvent;
use crate::models::clock_state::ClockState;
use crate::models::event_type::ClockEventType;
use chrono::{DateTime, Utc};
use rusqlite::TransactionBehavior;
use tracing::info;

/// What the employee asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockCommand {
    Action(ClockAction),
    ProjectSwitch,
}

#[derive(Debug, Clone)]
pub struct ClockRequest {
    pub employee: String,
    pub command: ClockCommand,
    pub at: DateTime<Utc>,
    pub project: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClockOutcome {
    pub event: ClockEvent,
    pub previous: ClockState,
    pub state: ClockState,
}

/// High-level business logic for the `clock` command.
pub struct ClockLogic;

impl ClockLogic {
    /// Validates the request against the employee's derived state and records it.
    ///
    /// The read of the last event, the validation and the insert share one
    /// `BEGIN IMMEDIATE` transaction: a second writer for the same database
    /// waits on the lock and then sees the new state.
    pub fn apply(pool: &mut DbPool, req: &ClockRequest) -> AppResult<ClockOutcome> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let last = load_last_event(&tx, &req.employee)?;

        if let Some(last) = &last
            && req.at < last.timestamp
        {
            return Err(AppError::OutOfOrder {
                attempted: ts_to_db(&req.at),
                latest: ts_to_db(&last.timestamp),
            });
        }

        let previous = ClockState::from_last_event(last.as_ref().map(|e| e.kind));

        let (kind, state) = match req.command {
            ClockCommand::Action(action) => {
                let next = transition::transition(previous, action)
                    .map_err(|e| AppError::InvalidTransition(e.to_string()))?;
                (action.event_type(), next)
            }
            ClockCommand::ProjectSwitch => {
                transition::validate_project_switch(previous)
                    .map_err(|msg| AppError::InvalidTransition(msg.to_string()))?;
                (ClockEventType::ProjectSwitch, ClockState::ClockedIn)
            }
        };

        let mut event =
            ClockEvent::new(&req.employee, kind, req.at).with_project(req.project.clone());
        event.id = insert_event(&tx, &event)?;

        ttlog(
            &tx,
            "clock",
            &req.employee,
            &format!("{} at {} ({} → {})", kind, ts_to_db(&req.at), previous, state),
        )?;

        tx.commit()?;

        info!(
            employee = %req.employee,
            kind = %kind,
            event_id = event.id,
            %previous,
            %state,
            "clock event recorded"
        );

        Ok(ClockOutcome {
            event,
            previous,
            state,
        })
    }
}
