use std::cmp::Ordering;

use crate::timer::ScheduledTick;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Step(usize),
    Tick { customer: usize, tick: ScheduledTick },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduledEvent {
    pub time_ms: u64,
    pub event: Event,
}

impl ScheduledEvent {
    pub fn new(time_ms: u64, event: Event) -> Self {
        Self { time_ms, event }
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time_ms
            .cmp(&other.time_ms)
            .then_with(|| self.event.priority().cmp(&other.event.priority()))
            .then_with(|| self.event.tiebreaker().cmp(&other.event.tiebreaker()))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Event {
    // Timer ticks land before script steps due at the same instant.
    fn priority(&self) -> u8 {
        match self {
            Event::Tick { .. } => 0,
            Event::Step(_) => 1,
        }
    }

    fn tiebreaker(&self) -> (usize, u64) {
        match self {
            Event::Tick { customer, tick } => (*customer, tick.generation),
            Event::Step(index) => (*index, 0),
        }
    }
}
