use tracing::{debug, info, warn};

use crate::error::Rejection;
use crate::estimator::{elapsed_minutes, Jitter, WaitEstimate};
use crate::models::{QueueStatus, QuestConfig, RewardConfig, RewardEffect, TicketStatus};
use crate::rewards::{find_reward, Wallet};
use crate::state::{NewTicket, Ticket, TicketPatch};
use crate::store::{Backend, QueueStore, TicketFilter, TicketStore};
use crate::timer::{PollTimer, ScheduledTick};

/// An active place in line.
#[derive(Clone, Debug)]
pub struct Session {
    pub ticket: Ticket,
    pub estimate: WaitEstimate,
    timer: PollTimer,
}

impl Session {
    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }
}

#[derive(Clone, Debug)]
pub struct Joined {
    pub ticket: Ticket,
    pub queue_name: String,
    pub first_tick: Option<ScheduledTick>,
}

#[derive(Clone, Debug)]
pub struct TickReport {
    pub changed: bool,
    pub ahead: u32,
    pub wait_minutes: u32,
    pub reached_front: bool,
    pub next: Option<ScheduledTick>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Skipped(u32),
    Cosmetic,
    Perk,
}

#[derive(Clone, Debug)]
pub struct Customer {
    pub name: String,
    pub wallet: Wallet,
    pub golden_ticket: bool,
    pub perks: Vec<String>,
    session: Option<Session>,
    last_ticket: Option<Ticket>,
}

impl Customer {
    pub fn new(name: &str, starting_xp: u32) -> Self {
        Self {
            name: name.to_string(),
            wallet: Wallet::new(starting_xp),
            golden_ticket: false,
            perks: Vec::new(),
            session: None,
            last_ticket: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Ticket of the current session, or of the last one if the customer
    /// has left.
    pub fn ticket(&self) -> Option<&Ticket> {
        self.session
            .as_ref()
            .map(|session| &session.ticket)
            .or(self.last_ticket.as_ref())
    }

    /// Joins behind every ticket currently waiting in `queue_id`.
    pub fn join<S: Backend + ?Sized>(
        &mut self,
        store: &mut S,
        queue_id: usize,
        purpose: &str,
        jitter: &mut Jitter,
        tick_interval_ms: u64,
        now_ms: u64,
    ) -> Result<Joined, Rejection> {
        if self.session.is_some() {
            return Err(Rejection::AlreadyInQueue(self.name.clone()));
        }

        let queue = store.get_queue(queue_id)?;
        if queue.status != QueueStatus::Active {
            return Err(Rejection::QueueNotAccepting(queue.name));
        }
        let waiting = store
            .list_tickets(&TicketFilter::queue(queue_id).with_status(TicketStatus::Waiting))?
            .len() as u32;
        if waiting >= queue.capacity {
            return Err(Rejection::QueueFull(queue.name));
        }

        let estimate =
            WaitEstimate::join(queue.avg_service_minutes, waiting, jitter.draw(), now_ms);
        let ticket = store.create_ticket(NewTicket {
            queue_id,
            name: self.name.clone(),
            purpose: purpose.to_string(),
            status: TicketStatus::Waiting,
            priority: 0,
            estimated_wait_minutes: estimate.wait_minutes(),
            joined_at_ms: now_ms,
        })?;

        let mut timer = PollTimer::new(tick_interval_ms);
        let first_tick = if estimate.at_front() {
            None
        } else {
            Some(timer.start(now_ms))
        };

        info!(
            customer = %self.name,
            ticket = %ticket.number,
            queue = %queue.name,
            ahead = estimate.current_ahead,
            wait = estimate.wait_minutes(),
            "customer joined"
        );
        self.session = Some(Session {
            ticket: ticket.clone(),
            estimate,
            timer,
        });
        Ok(Joined {
            ticket,
            queue_name: queue.name,
            first_tick,
        })
    }

    /// Handles a timer tick. Stale ticks, or ticks for a customer no longer
    /// in line, return `None`. A ticket that staff moved out of `waiting`
    /// ends the session.
    pub fn tick<S: TicketStore + ?Sized>(
        &mut self,
        store: &mut S,
        tick: ScheduledTick,
        now_ms: u64,
    ) -> Option<TickReport> {
        let session = self.session.as_mut()?;
        if !session.timer.accept(tick) {
            debug!(customer = %self.name, due = tick.due_ms, "dropping stale tick");
            return None;
        }

        match store.get_ticket(session.ticket.id) {
            Ok(current) if current.status != TicketStatus::Waiting => {
                session.timer.cancel();
                info!(
                    customer = %self.name,
                    ticket = %current.number,
                    status = %current.status,
                    "ticket no longer waiting, session ended"
                );
                self.session = None;
                self.last_ticket = Some(current);
                return None;
            }
            Ok(current) => session.ticket = current,
            Err(err) => {
                warn!(ticket = %session.ticket.number, error = %err, "ticket refresh failed")
            }
        }

        let changed = session.estimate.tick(now_ms);
        let waited = elapsed_minutes(session.ticket.joined_at_ms, now_ms);
        if waited != session.ticket.actual_wait_minutes {
            match store.update_ticket(session.ticket.id, &TicketPatch::actual_wait(waited)) {
                Ok(updated) => session.ticket = updated,
                Err(err) => {
                    warn!(ticket = %session.ticket.number, error = %err, "wait refresh not saved")
                }
            }
        }

        let reached_front = session.estimate.at_front();
        let next = if reached_front {
            session.timer.cancel();
            None
        } else {
            Some(session.timer.rearm(now_ms))
        };

        debug!(
            customer = %self.name,
            ahead = session.estimate.current_ahead,
            wait = session.estimate.wait_minutes(),
            changed,
            "tick"
        );
        Some(TickReport {
            changed,
            ahead: session.estimate.current_ahead,
            wait_minutes: session.estimate.wait_minutes(),
            reached_front,
            next,
        })
    }

    pub fn leave<S: TicketStore + ?Sized>(&mut self, store: &mut S) -> Result<Ticket, Rejection> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| Rejection::NotInQueue(self.name.clone()))?;
        let ticket =
            store.update_ticket(session.ticket.id, &TicketPatch::status(TicketStatus::Cancelled))?;

        if let Some(mut session) = self.session.take() {
            session.timer.cancel();
        }
        info!(customer = %self.name, ticket = %ticket.number, "customer left");
        self.last_ticket = Some(ticket.clone());
        Ok(ticket)
    }

    pub fn complete_quest<'a>(
        &mut self,
        quests: &'a [QuestConfig],
        quest_id: &str,
    ) -> Result<&'a QuestConfig, Rejection> {
        let quest = self.wallet.complete_quest(quests, quest_id)?;
        info!(customer = %self.name, quest = %quest.id, xp = quest.xp, "quest completed");
        Ok(quest)
    }

    /// Buys `reward_id` and applies its effect. Nothing is spent when the
    /// purchase is rejected.
    pub fn purchase<'a>(
        &mut self,
        rewards: &'a [RewardConfig],
        reward_id: &str,
    ) -> Result<(&'a RewardConfig, PurchaseOutcome), Rejection> {
        let reward = find_reward(rewards, reward_id)?;
        self.wallet.can_afford(reward)?;
        if matches!(reward.effect, RewardEffect::SkipPlaces { .. }) && self.session.is_none() {
            return Err(Rejection::NotInQueue(self.name.clone()));
        }
        self.wallet.spend(reward)?;

        let outcome = match reward.effect {
            RewardEffect::SkipPlaces { places } => {
                let mut skipped = 0;
                if let Some(session) = self.session.as_mut() {
                    skipped = session.estimate.skip_places(places);
                    if session.estimate.at_front() {
                        session.timer.cancel();
                    }
                }
                PurchaseOutcome::Skipped(skipped)
            }
            RewardEffect::Cosmetic => {
                self.golden_ticket = true;
                PurchaseOutcome::Cosmetic
            }
            RewardEffect::Discount { .. } | RewardEffect::Voucher => {
                self.perks.push(reward.title.clone());
                PurchaseOutcome::Perk
            }
        };
        info!(customer = %self.name, reward = %reward.id, cost = reward.cost, "reward purchased");
        Ok((reward, outcome))
    }
}
