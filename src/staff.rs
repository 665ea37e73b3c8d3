use std::fmt;
use std::sync::mpsc::Receiver;
use tracing::{info, warn};

use crate::error::{Rejection, StoreError};
use crate::history::{ActionHistory, ActionKind};
use crate::models::{QueueStatus, TicketStatus};
use crate::state::{Queue, Ticket, TicketPatch};
use crate::store::{Backend, ChangeNotice, QueueStore, TicketFilter, TicketStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaffAction {
    Serve,
    Skip,
    Hold,
    Requeue,
}

impl StaffAction {
    /// Status a ticket moves to, or `None` if the action does not apply.
    pub fn next_status(self, current: TicketStatus) -> Option<TicketStatus> {
        match (self, current) {
            (StaffAction::Serve, TicketStatus::Waiting) => Some(TicketStatus::Served),
            (StaffAction::Skip, TicketStatus::Waiting) => Some(TicketStatus::Cancelled),
            (StaffAction::Hold, TicketStatus::Waiting) => Some(TicketStatus::Parked),
            (StaffAction::Requeue, TicketStatus::Parked) => Some(TicketStatus::Waiting),
            _ => None,
        }
    }

    /// Requeue is not undoable.
    pub fn history_kind(self) -> Option<ActionKind> {
        match self {
            StaffAction::Serve => Some(ActionKind::Serve),
            StaffAction::Skip => Some(ActionKind::Skip),
            StaffAction::Hold => Some(ActionKind::Hold),
            StaffAction::Requeue => None,
        }
    }

    pub fn confirmation(self, ticket: &Ticket) -> String {
        match self {
            StaffAction::Serve => format!("{} has been served", ticket.name),
            StaffAction::Skip => {
                format!("{}'s ticket has been cancelled (no-show)", ticket.name)
            }
            StaffAction::Hold => format!("{} has been moved to parked list", ticket.name),
            StaffAction::Requeue => format!("{} has been re-queued", ticket.name),
        }
    }
}

impl fmt::Display for StaffAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            StaffAction::Serve => "serve",
            StaffAction::Skip => "skip",
            StaffAction::Hold => "hold",
            StaffAction::Requeue => "requeue",
        };
        write!(f, "{}", value)
    }
}

/// Cached view of one queue's tickets.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    tickets: Vec<Ticket>,
}

impl Roster {
    pub fn with_status(&self, status: TicketStatus) -> impl Iterator<Item = &Ticket> {
        self.tickets
            .iter()
            .filter(move |ticket| ticket.status == status)
    }

    pub fn count(&self, status: TicketStatus) -> usize {
        self.with_status(status).count()
    }

    pub fn find(&self, number: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|ticket| ticket.number == number)
    }
}

/// Staff session at one queue: triage actions, undo stack and roster.
pub struct StaffDesk {
    queue_id: usize,
    history: ActionHistory,
    roster: Roster,
    changes: Receiver<ChangeNotice>,
    stale: bool,
}

impl StaffDesk {
    pub fn open<S: TicketStore + ?Sized>(store: &mut S, queue_id: usize) -> Self {
        Self {
            queue_id,
            history: ActionHistory::new(),
            roster: Roster::default(),
            changes: store.subscribe(),
            stale: true,
        }
    }

    pub fn queue_id(&self) -> usize {
        self.queue_id
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    /// Current roster, re-fetched if the store reported changes since the
    /// last read.
    pub fn roster<S: TicketStore + ?Sized>(&mut self, store: &S) -> Result<&Roster, StoreError> {
        if self.changes.try_iter().count() > 0 {
            self.stale = true;
        }
        if self.stale {
            self.roster = Roster {
                tickets: store.list_tickets(&TicketFilter::queue(self.queue_id))?,
            };
            self.stale = false;
        }
        Ok(&self.roster)
    }

    pub fn apply<S: TicketStore + ?Sized>(
        &mut self,
        store: &mut S,
        action: StaffAction,
        number: &str,
        now_ms: u64,
    ) -> Result<Ticket, Rejection> {
        let ticket = self
            .roster(store)?
            .find(number)
            .cloned()
            .ok_or_else(|| Rejection::UnknownTicket(number.to_string()))?;

        let next = action
            .next_status(ticket.status)
            .ok_or_else(|| Rejection::InvalidTransition {
                ticket: ticket.number.clone(),
                action: action.to_string(),
                status: ticket.status.to_string(),
            })?;

        let mut patch = TicketPatch::status(next);
        if action == StaffAction::Serve {
            patch = patch.served_at(now_ms);
        }

        let updated = store.update_ticket(ticket.id, &patch).map_err(|err| {
            warn!(%action, ticket = %ticket.number, error = %err, "staff action not saved");
            Rejection::from(err)
        })?;

        if let Some(kind) = action.history_kind() {
            self.history.record(kind, &ticket, now_ms);
        }
        info!(%action, ticket = %updated.number, status = %updated.status, "staff action");
        Ok(updated)
    }

    pub fn undo<S: TicketStore + ?Sized>(&mut self, store: &mut S) -> Result<Ticket, Rejection> {
        let (_, restored) = self.history.undo(store)?;
        info!(ticket = %restored.number, "staff action undone");
        Ok(restored)
    }

    pub fn set_status<S: Backend + ?Sized>(
        &mut self,
        store: &mut S,
        status: QueueStatus,
    ) -> Result<Queue, Rejection> {
        let queue = store.set_queue_status(self.queue_id, status)?;
        info!(queue = %queue.name, %status, "queue status changed");
        Ok(queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{new_ticket, FlakyStore};
    use crate::store::InMemoryStore;

    fn setup(names: &[&str]) -> (InMemoryStore, StaffDesk) {
        let mut store = InMemoryStore::new();
        let queue = store.add_queue("Front Desk", "", 4, 10, QueueStatus::Active);
        for (idx, name) in names.iter().enumerate() {
            store
                .create_ticket(new_ticket(queue.id, name, idx as u64))
                .unwrap();
        }
        let desk = StaffDesk::open(&mut store, queue.id);
        (store, desk)
    }

    #[test]
    fn transitions_follow_the_status_machine() {
        use StaffAction::*;
        use TicketStatus::*;

        assert_eq!(Serve.next_status(Waiting), Some(Served));
        assert_eq!(Skip.next_status(Waiting), Some(Cancelled));
        assert_eq!(Hold.next_status(Waiting), Some(Parked));
        assert_eq!(Requeue.next_status(Parked), Some(Waiting));
        assert_eq!(Serve.next_status(Parked), None);
        assert_eq!(Requeue.next_status(Waiting), None);
        assert_eq!(Hold.next_status(Served), None);
    }

    #[test]
    fn serve_updates_store_and_records_history() {
        let (mut store, mut desk) = setup(&["Sarah", "Mike"]);
        let served = desk
            .apply(&mut store, StaffAction::Serve, "A001", 90_000)
            .unwrap();

        assert_eq!(served.status, TicketStatus::Served);
        assert_eq!(served.served_at_ms, Some(90_000));
        assert_eq!(desk.history().len(), 1);
        assert_eq!(
            desk.history().last().map(|record| record.ticket.status),
            Some(TicketStatus::Waiting)
        );
    }

    #[test]
    fn requeue_is_not_recorded() {
        let (mut store, mut desk) = setup(&["Sarah"]);
        desk.apply(&mut store, StaffAction::Hold, "A001", 0).unwrap();
        let ticket = desk
            .apply(&mut store, StaffAction::Requeue, "A001", 0)
            .unwrap();

        assert_eq!(ticket.status, TicketStatus::Waiting);
        assert_eq!(desk.history().len(), 1);
    }

    #[test]
    fn serve_then_skip_then_undo_restores_only_the_skip() {
        let (mut store, mut desk) = setup(&["T", "U"]);
        desk.apply(&mut store, StaffAction::Serve, "A001", 0).unwrap();
        desk.apply(&mut store, StaffAction::Skip, "A002", 0).unwrap();

        let restored = desk.undo(&mut store).unwrap();
        assert_eq!(restored.number, "A002");

        let roster = desk.roster(&store).unwrap();
        assert_eq!(roster.find("A001").unwrap().status, TicketStatus::Served);
        assert_eq!(roster.find("A002").unwrap().status, TicketStatus::Waiting);
        assert_eq!(desk.history().len(), 1);
    }

    #[test]
    fn undo_forces_terminal_tickets_back_to_waiting() {
        let (mut store, mut desk) = setup(&["T"]);
        desk.apply(&mut store, StaffAction::Skip, "A001", 0).unwrap();
        let restored = desk.undo(&mut store).unwrap();
        assert_eq!(restored.status, TicketStatus::Waiting);
    }

    #[test]
    fn undo_with_empty_history_is_rejected() {
        let (mut store, mut desk) = setup(&["T"]);
        assert_eq!(desk.undo(&mut store), Err(Rejection::NothingToUndo));
    }

    #[test]
    fn invalid_transition_is_rejected_without_history() {
        let (mut store, mut desk) = setup(&["T"]);
        desk.apply(&mut store, StaffAction::Serve, "A001", 0).unwrap();
        let err = desk
            .apply(&mut store, StaffAction::Hold, "A001", 0)
            .unwrap_err();

        assert_eq!(err.to_string(), "Cannot hold ticket A001: status is served");
        assert_eq!(desk.history().len(), 1);
    }

    #[test]
    fn unknown_ticket_is_rejected() {
        let (mut store, mut desk) = setup(&["T"]);
        assert_eq!(
            desk.apply(&mut store, StaffAction::Serve, "Z999", 0),
            Err(Rejection::UnknownTicket("Z999".to_string()))
        );
    }

    #[test]
    fn failed_write_leaves_history_untouched() {
        let mut inner = InMemoryStore::new();
        let queue = inner.add_queue("Front Desk", "", 4, 10, QueueStatus::Active);
        inner.create_ticket(new_ticket(queue.id, "T", 0)).unwrap();
        let mut store = FlakyStore::new(inner);
        let mut desk = StaffDesk::open(&mut store, queue.id);

        store.offline = true;
        assert!(desk
            .apply(&mut store, StaffAction::Serve, "A001", 0)
            .is_err());
        assert!(desk.history().is_empty());
        assert_eq!(
            desk.roster(&store).unwrap().count(TicketStatus::Waiting),
            1
        );
    }

    #[test]
    fn roster_refreshes_after_store_changes() {
        let (mut store, mut desk) = setup(&["Sarah"]);
        assert_eq!(desk.roster(&store).unwrap().count(TicketStatus::Waiting), 1);

        store.create_ticket(new_ticket(0, "Mike", 5)).unwrap();
        let roster = desk.roster(&store).unwrap();
        assert_eq!(roster.count(TicketStatus::Waiting), 2);
        assert!(roster.find("A002").is_some());
    }

    #[test]
    fn set_status_updates_queue() {
        let (mut store, mut desk) = setup(&[]);
        let queue = desk.set_status(&mut store, QueueStatus::Paused).unwrap();
        assert_eq!(queue.status, QueueStatus::Paused);
        assert_eq!(store.get_queue(0).unwrap().status, QueueStatus::Paused);
    }
}
