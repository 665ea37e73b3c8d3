use serde::Serialize;

/// A tick handed to the event loop. Only the tick matching the timer's
/// current generation is honored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ScheduledTick {
    pub due_ms: u64,
    pub generation: u64,
}

/// Periodic, cancellable timer driving one customer session.
///
/// At most one tick is outstanding: `start` and `rearm` schedule the next
/// one, `accept` claims it, and `cancel` or a restart bumps the generation
/// so anything already queued turns stale.
#[derive(Clone, Debug)]
pub struct PollTimer {
    interval_ms: u64,
    generation: u64,
    pending: Option<ScheduledTick>,
}

impl PollTimer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            generation: 0,
            pending: None,
        }
    }

    pub fn start(&mut self, now_ms: u64) -> ScheduledTick {
        self.generation += 1;
        self.schedule(now_ms)
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Claims `tick` if it is the outstanding one.
    pub fn accept(&mut self, tick: ScheduledTick) -> bool {
        if self.pending == Some(tick) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Schedules the follow-up of an accepted tick.
    pub fn rearm(&mut self, now_ms: u64) -> ScheduledTick {
        self.schedule(now_ms)
    }

    fn schedule(&mut self, now_ms: u64) -> ScheduledTick {
        let tick = ScheduledTick {
            due_ms: now_ms.saturating_add(self.interval_ms),
            generation: self.generation,
        };
        self.pending = Some(tick);
        tick
    }
}
