use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::error::Rejection;
use crate::models::TicketStatus;
use crate::state::{Ticket, TicketPatch};
use crate::store::TicketStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Serve,
    Skip,
    Hold,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ActionKind::Serve => "serve",
            ActionKind::Skip => "skip",
            ActionKind::Hold => "hold",
        };
        write!(f, "{}", value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    pub kind: ActionKind,
    pub ticket: Ticket,
    pub at_ms: u64,
}

/// Undo stack of staff triage actions at one queue.
#[derive(Clone, Debug, Default)]
pub struct ActionHistory {
    records: Vec<ActionRecord>,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: ActionKind, ticket: &Ticket, at_ms: u64) {
        debug!(%kind, ticket = %ticket.number, at_ms, "recording staff action");
        self.records.push(ActionRecord {
            kind,
            ticket: ticket.clone(),
            at_ms,
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&ActionRecord> {
        self.records.last()
    }

    /// Pops the latest action and sets its ticket back to waiting.
    ///
    /// Only the status is restored. Terminal statuses are not exempt. If the
    /// store rejects the write the record stays on the stack.
    pub fn undo<S: TicketStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<(ActionRecord, Ticket), Rejection> {
        let record = self.records.pop().ok_or(Rejection::NothingToUndo)?;
        match store.update_ticket(record.ticket.id, &TicketPatch::status(TicketStatus::Waiting)) {
            Ok(restored) => {
                debug!(kind = %record.kind, ticket = %restored.number, "undid staff action");
                Ok((record, restored))
            }
            Err(err) => {
                warn!(ticket = %record.ticket.number, error = %err, "undo write failed");
                self.records.push(record);
                Err(err.into())
            }
        }
    }
}
