use std::sync::mpsc::{channel, Receiver, Sender};

use crate::error::StoreError;
use crate::models::{QueueStatus, TicketStatus};
use crate::state::{NewTicket, Queue, Ticket, TicketPatch};

/// Change emitted by a store after a successful write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeNotice {
    TicketCreated(usize),
    TicketUpdated(usize),
    QueueUpdated(usize),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub queue_id: Option<usize>,
    pub status: Option<TicketStatus>,
}

impl TicketFilter {
    pub fn queue(queue_id: usize) -> Self {
        Self {
            queue_id: Some(queue_id),
            status: None,
        }
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.queue_id.map_or(true, |id| ticket.queue_id == id)
            && self.status.map_or(true, |status| ticket.status == status)
    }
}

pub trait TicketStore {
    /// Tickets matching `filter`, oldest join first.
    fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, StoreError>;
    fn get_ticket(&self, id: usize) -> Result<Ticket, StoreError>;
    fn create_ticket(&mut self, fields: NewTicket) -> Result<Ticket, StoreError>;
    fn update_ticket(&mut self, id: usize, patch: &TicketPatch) -> Result<Ticket, StoreError>;
    fn subscribe(&mut self) -> Receiver<ChangeNotice>;
}

pub trait QueueStore {
    fn list_queues(&self, location: Option<&str>) -> Result<Vec<Queue>, StoreError>;
    fn get_queue(&self, id: usize) -> Result<Queue, StoreError>;
    fn set_queue_status(&mut self, id: usize, status: QueueStatus) -> Result<Queue, StoreError>;
}

pub trait Backend: TicketStore + QueueStore {}

impl<T: TicketStore + QueueStore + ?Sized> Backend for T {}

#[derive(Default)]
pub struct InMemoryStore {
    queues: Vec<Queue>,
    tickets: Vec<Ticket>,
    subscribers: Vec<Sender<ChangeNotice>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_queue(
        &mut self,
        name: &str,
        location: &str,
        avg_service_minutes: u32,
        capacity: u32,
        status: QueueStatus,
    ) -> Queue {
        let id = self.queues.len();
        let queue = Queue {
            id,
            name: name.to_string(),
            location: location.to_string(),
            status,
            avg_service_minutes,
            capacity,
            prefix: queue_prefix(id),
        };
        self.queues.push(queue.clone());
        queue
    }

    pub fn find_queue(&self, name: &str) -> Option<&Queue> {
        self.queues.iter().find(|queue| queue.name == name)
    }

    fn notify(&mut self, notice: ChangeNotice) {
        self.subscribers.retain(|tx| tx.send(notice).is_ok());
    }
}

impl TicketStore for InMemoryStore {
    fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, StoreError> {
        let mut tickets: Vec<Ticket> = self
            .tickets
            .iter()
            .filter(|ticket| filter.matches(ticket))
            .cloned()
            .collect();
        tickets.sort_by_key(|ticket| (ticket.joined_at_ms, ticket.id));
        Ok(tickets)
    }

    fn get_ticket(&self, id: usize) -> Result<Ticket, StoreError> {
        self.tickets
            .get(id)
            .cloned()
            .ok_or(StoreError::TicketNotFound(id))
    }

    fn create_ticket(&mut self, fields: NewTicket) -> Result<Ticket, StoreError> {
        let queue = self
            .queues
            .get(fields.queue_id)
            .ok_or(StoreError::QueueNotFound(fields.queue_id))?;
        let sequence = self
            .tickets
            .iter()
            .filter(|ticket| ticket.queue_id == fields.queue_id)
            .count()
            + 1;

        let ticket = Ticket {
            id: self.tickets.len(),
            queue_id: fields.queue_id,
            number: format!("{}{:03}", queue.prefix, sequence),
            name: fields.name,
            purpose: fields.purpose,
            status: fields.status,
            priority: fields.priority,
            estimated_wait_minutes: fields.estimated_wait_minutes,
            actual_wait_minutes: 0,
            joined_at_ms: fields.joined_at_ms,
            called_at_ms: None,
            served_at_ms: None,
        };
        self.tickets.push(ticket.clone());
        self.notify(ChangeNotice::TicketCreated(ticket.id));
        Ok(ticket)
    }

    fn update_ticket(&mut self, id: usize, patch: &TicketPatch) -> Result<Ticket, StoreError> {
        let ticket = self
            .tickets
            .get_mut(id)
            .ok_or(StoreError::TicketNotFound(id))?;
        patch.apply(ticket);
        let updated = ticket.clone();
        self.notify(ChangeNotice::TicketUpdated(id));
        Ok(updated)
    }

    fn subscribe(&mut self) -> Receiver<ChangeNotice> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }
}

impl QueueStore for InMemoryStore {
    fn list_queues(&self, location: Option<&str>) -> Result<Vec<Queue>, StoreError> {
        Ok(self
            .queues
            .iter()
            .filter(|queue| location.map_or(true, |loc| queue.location == loc))
            .cloned()
            .collect())
    }

    fn get_queue(&self, id: usize) -> Result<Queue, StoreError> {
        self.queues
            .get(id)
            .cloned()
            .ok_or(StoreError::QueueNotFound(id))
    }

    fn set_queue_status(&mut self, id: usize, status: QueueStatus) -> Result<Queue, StoreError> {
        let queue = self
            .queues
            .get_mut(id)
            .ok_or(StoreError::QueueNotFound(id))?;
        queue.status = status;
        let updated = queue.clone();
        self.notify(ChangeNotice::QueueUpdated(id));
        Ok(updated)
    }
}

/// Queues are lettered `A` through `Z`.
pub const MAX_QUEUES: usize = 26;

fn queue_prefix(index: usize) -> char {
    char::from(b'A' + (index % MAX_QUEUES) as u8)
}
