use serde::Serialize;
use std::fmt;

use crate::models::{QueueStatus, TicketStatus};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Queue {
    pub id: usize,
    pub name: String,
    pub location: String,
    pub status: QueueStatus,
    pub avg_service_minutes: u32,
    pub capacity: u32,
    pub prefix: char,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: usize,
    pub queue_id: usize,
    pub number: String,
    pub name: String,
    pub purpose: String,
    pub status: TicketStatus,
    pub priority: i32,
    pub estimated_wait_minutes: u32,
    pub actual_wait_minutes: u32,
    pub joined_at_ms: u64,
    pub called_at_ms: Option<u64>,
    pub served_at_ms: Option<u64>,
}

/// Fields for a ticket that the store has not numbered yet.
#[derive(Clone, Debug)]
pub struct NewTicket {
    pub queue_id: usize,
    pub name: String,
    pub purpose: String,
    pub status: TicketStatus,
    pub priority: i32,
    pub estimated_wait_minutes: u32,
    pub joined_at_ms: u64,
}

/// Partial update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TicketPatch {
    pub status: Option<TicketStatus>,
    pub estimated_wait_minutes: Option<u32>,
    pub actual_wait_minutes: Option<u32>,
    pub called_at_ms: Option<u64>,
    pub served_at_ms: Option<u64>,
}

impl TicketPatch {
    pub fn status(status: TicketStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn actual_wait(minutes: u32) -> Self {
        Self {
            actual_wait_minutes: Some(minutes),
            ..Self::default()
        }
    }

    pub fn served_at(mut self, at_ms: u64) -> Self {
        self.served_at_ms = Some(at_ms);
        self
    }

    pub fn apply(&self, ticket: &mut Ticket) {
        if let Some(status) = self.status {
            ticket.status = status;
        }
        if let Some(minutes) = self.estimated_wait_minutes {
            ticket.estimated_wait_minutes = minutes;
        }
        if let Some(minutes) = self.actual_wait_minutes {
            ticket.actual_wait_minutes = minutes;
        }
        if let Some(at_ms) = self.called_at_ms {
            ticket.called_at_ms = Some(at_ms);
        }
        if let Some(at_ms) = self.served_at_ms {
            ticket.served_at_ms = Some(at_ms);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        write!(f, "{}", value)
    }
}

/// User-visible message produced by an operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub at_ms: u64,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct PositionSample {
    pub at_ms: u64,
    pub customer: String,
    pub ahead: u32,
    pub wait_minutes: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct CustomerSummary {
    pub name: String,
    pub ticket: Option<String>,
    pub queue: Option<String>,
    pub status: Option<TicketStatus>,
    pub position: Option<u32>,
    pub estimated_wait_minutes: Option<u32>,
    pub actual_wait_minutes: Option<u32>,
    pub xp: u32,
    pub level: u32,
    pub golden_ticket: bool,
    pub perks: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct QueueSummary {
    pub name: String,
    pub status: QueueStatus,
    pub waiting: usize,
    pub served: usize,
    pub parked: usize,
    pub cancelled: usize,
    pub undoable_actions: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunMetadata {
    pub queues: usize,
    pub jitter: String,
    pub duration_ms: u64,
    pub ticks: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulationResult {
    pub metadata: RunMetadata,
    pub timeline: Vec<Notice>,
    pub samples: Vec<PositionSample>,
    pub customers: Vec<CustomerSummary>,
    pub queues: Vec<QueueSummary>,
}
