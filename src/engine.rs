use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use tracing::{debug, info};

use crate::customer::{Customer, PurchaseOutcome};
use crate::error::{Error, Rejection, Result};
use crate::estimator::Jitter;
use crate::events::{Event, ScheduledEvent};
use crate::models::{JitterConfig, ScenarioConfig, ScriptAction, TicketStatus};
use crate::staff::{StaffAction, StaffDesk};
use crate::state::{
    CustomerSummary, NewTicket, Notice, NoticeLevel, PositionSample, QueueSummary, RunMetadata,
    SimulationResult,
};
use crate::store::{InMemoryStore, QueueStore, TicketStore, MAX_QUEUES};
use crate::timer::ScheduledTick;

struct EngineState {
    time_ms: u64,
    ticks: u64,
    customers: Vec<Customer>,
    desks: Vec<StaffDesk>,
    timeline: Vec<Notice>,
    samples: Vec<PositionSample>,
}

pub struct ScenarioEngine {
    config: ScenarioConfig,
    store: InMemoryStore,
    jitter: Jitter,
    state: EngineState,
}

impl ScenarioEngine {
    pub fn new(config: ScenarioConfig) -> Self {
        let jitter = Jitter::new(config.jitter, config.seed, config.jitter_max_minutes);
        Self {
            config,
            store: InMemoryStore::new(),
            jitter,
            state: EngineState {
                time_ms: 0,
                ticks: 0,
                customers: Vec::new(),
                desks: Vec::new(),
                timeline: Vec::new(),
                samples: Vec::new(),
            },
        }
    }

    pub fn run(&mut self) -> Result<SimulationResult> {
        validate_config(&self.config)?;
        self.store = seed_store(&self.config)?;
        self.state.desks = (0..self.config.queues.len())
            .map(|queue_id| StaffDesk::open(&mut self.store, queue_id))
            .collect();
        let names: Vec<String> = self
            .config
            .script
            .iter()
            .filter_map(|step| step.action.customer().map(str::to_string))
            .collect();
        for name in names {
            self.customer_index(&name);
        }

        let mut events: BinaryHeap<Reverse<ScheduledEvent>> = BinaryHeap::new();
        for (idx, step) in self.config.script.iter().enumerate() {
            events.push(Reverse(ScheduledEvent::new(step.at_ms, Event::Step(idx))));
        }

        while let Some(Reverse(scheduled)) = events.pop() {
            self.state.time_ms = scheduled.time_ms;
            let follow_up = match scheduled.event {
                Event::Step(idx) => {
                    let action = self.config.script[idx].action.clone();
                    self.apply_step(&action)
                }
                Event::Tick { customer, tick } => self
                    .handle_tick(customer, tick)
                    .map(|next| (customer, next)),
            };

            if let Some((customer, tick)) = follow_up {
                if tick.due_ms <= self.config.horizon_ms {
                    events.push(Reverse(ScheduledEvent::new(
                        tick.due_ms,
                        Event::Tick { customer, tick },
                    )));
                } else {
                    debug!(customer, due = tick.due_ms, "tick beyond horizon dropped");
                }
            }
        }

        info!(
            duration_ms = self.state.time_ms,
            ticks = self.state.ticks,
            notices = self.state.timeline.len(),
            "scenario finished"
        );
        self.finish()
    }

    fn apply_step(&mut self, action: &ScriptAction) -> Option<(usize, ScheduledTick)> {
        let now = self.state.time_ms;
        match action {
            ScriptAction::Join {
                customer,
                queue,
                purpose,
            } => {
                let idx = self.customer_index(customer);
                let queue_id = self.queue_id(queue)?;
                let result = self.state.customers[idx].join(
                    &mut self.store,
                    queue_id,
                    purpose,
                    &mut self.jitter,
                    self.config.tick_interval_ms,
                    now,
                );
                match result {
                    Ok(joined) => {
                        let (ahead, wait) = self.state.customers[idx]
                            .session()
                            .map(|session| {
                                (
                                    session.estimate.current_ahead,
                                    session.estimate.wait_minutes(),
                                )
                            })
                            .unwrap_or_default();
                        self.notice(
                            NoticeLevel::Success,
                            format!(
                                "{} joined {} as {} ({} ahead, ~{} min)",
                                customer, joined.queue_name, joined.ticket.number, ahead, wait
                            ),
                        );
                        self.sample(idx);
                        joined.first_tick.map(|tick| (idx, tick))
                    }
                    Err(rejection) => self.reject(rejection),
                }
            }
            ScriptAction::Leave { customer } => {
                let idx = self.customer_index(customer);
                match self.state.customers[idx].leave(&mut self.store) {
                    Ok(ticket) => {
                        let message = format!("{} left the queue ({})", customer, ticket.number);
                        self.notice(NoticeLevel::Info, message);
                        None
                    }
                    Err(rejection) => self.reject(rejection),
                }
            }
            ScriptAction::CompleteQuest { customer, quest } => {
                let idx = self.customer_index(customer);
                match self.state.customers[idx].complete_quest(&self.config.quests, quest) {
                    Ok(quest) => {
                        let message =
                            format!("{} completed {} (+{} XP)", customer, quest.title, quest.xp);
                        self.notice(NoticeLevel::Success, message);
                        None
                    }
                    Err(rejection) => self.reject(rejection),
                }
            }
            ScriptAction::Purchase { customer, reward } => {
                let idx = self.customer_index(customer);
                match self.state.customers[idx].purchase(&self.config.rewards, reward) {
                    Ok((reward, outcome)) => {
                        let message = match outcome {
                            PurchaseOutcome::Skipped(places) => format!(
                                "{} purchased {}: skipped {} places",
                                customer, reward.title, places
                            ),
                            PurchaseOutcome::Cosmetic => format!(
                                "{} purchased {}: golden ticket activated",
                                customer, reward.title
                            ),
                            PurchaseOutcome::Perk => {
                                format!("{} purchased {}", customer, reward.title)
                            }
                        };
                        self.notice(NoticeLevel::Success, message);
                        if let PurchaseOutcome::Skipped(_) = outcome {
                            self.sample(idx);
                        }
                        None
                    }
                    Err(rejection) => self.reject(rejection),
                }
            }
            ScriptAction::Serve { queue, ticket } => {
                self.triage(queue, ticket, StaffAction::Serve, NoticeLevel::Success)
            }
            ScriptAction::Skip { queue, ticket } => {
                self.triage(queue, ticket, StaffAction::Skip, NoticeLevel::Info)
            }
            ScriptAction::Hold { queue, ticket } => {
                self.triage(queue, ticket, StaffAction::Hold, NoticeLevel::Info)
            }
            ScriptAction::Requeue { queue, ticket } => {
                self.triage(queue, ticket, StaffAction::Requeue, NoticeLevel::Success)
            }
            ScriptAction::Undo { queue } => {
                let queue_id = self.queue_id(queue)?;
                match self.state.desks[queue_id].undo(&mut self.store) {
                    Ok(ticket) => {
                        let message = format!("Action undone: {} is waiting again", ticket.number);
                        self.notice(NoticeLevel::Success, message);
                        None
                    }
                    Err(rejection) => self.reject(rejection),
                }
            }
            ScriptAction::SetStatus { queue, status } => {
                let queue_id = self.queue_id(queue)?;
                match self.state.desks[queue_id].set_status(&mut self.store, *status) {
                    Ok(queue) => {
                        let message = format!("{} is now {}", queue.name, queue.status);
                        self.notice(NoticeLevel::Info, message);
                        None
                    }
                    Err(rejection) => self.reject(rejection),
                }
            }
        }
    }

    fn triage(
        &mut self,
        queue: &str,
        ticket: &str,
        action: StaffAction,
        level: NoticeLevel,
    ) -> Option<(usize, ScheduledTick)> {
        let queue_id = self.queue_id(queue)?;
        let now = self.state.time_ms;
        match self.state.desks[queue_id].apply(&mut self.store, action, ticket, now) {
            Ok(updated) => {
                self.notice(level, action.confirmation(&updated));
                None
            }
            Err(rejection) => self.reject(rejection),
        }
    }

    fn handle_tick(&mut self, idx: usize, tick: ScheduledTick) -> Option<ScheduledTick> {
        let now = self.state.time_ms;
        let report = self.state.customers[idx].tick(&mut self.store, tick, now)?;
        self.state.ticks += 1;

        if report.changed {
            self.sample(idx);
        }
        if report.reached_front {
            let customer = &self.state.customers[idx];
            let number = customer
                .ticket()
                .map(|ticket| ticket.number.clone())
                .unwrap_or_default();
            let message = format!("{} ({}) is next in line", customer.name, number);
            self.notice(NoticeLevel::Info, message);
        }
        report.next
    }

    fn finish(&mut self) -> Result<SimulationResult> {
        let mut customers = Vec::with_capacity(self.state.customers.len());
        for customer in &self.state.customers {
            let ticket = match customer.ticket() {
                Some(local) => Some(self.store.get_ticket(local.id)?),
                None => None,
            };
            let queue = match &ticket {
                Some(ticket) => Some(self.store.get_queue(ticket.queue_id)?.name),
                None => None,
            };
            let session = customer.session();
            let waiting = ticket
                .as_ref()
                .map_or(false, |ticket| ticket.status == TicketStatus::Waiting);

            customers.push(CustomerSummary {
                name: customer.name.clone(),
                ticket: ticket.as_ref().map(|ticket| ticket.number.clone()),
                queue,
                status: ticket.as_ref().map(|ticket| ticket.status),
                position: session
                    .filter(|_| waiting)
                    .map(|session| session.estimate.position()),
                estimated_wait_minutes: session
                    .filter(|_| waiting)
                    .map(|session| session.estimate.wait_minutes()),
                actual_wait_minutes: ticket.as_ref().map(|ticket| ticket.actual_wait_minutes),
                xp: customer.wallet.xp(),
                level: customer.wallet.level(),
                golden_ticket: customer.golden_ticket,
                perks: customer.perks.clone(),
            });
        }

        let mut queues = Vec::with_capacity(self.state.desks.len());
        for desk in &mut self.state.desks {
            let queue = self.store.get_queue(desk.queue_id())?;
            let undoable_actions = desk.history().len();
            let roster = desk.roster(&self.store)?;
            queues.push(QueueSummary {
                name: queue.name,
                status: queue.status,
                waiting: roster.count(TicketStatus::Waiting),
                served: roster.count(TicketStatus::Served),
                parked: roster.count(TicketStatus::Parked),
                cancelled: roster.count(TicketStatus::Cancelled),
                undoable_actions,
            });
        }

        Ok(SimulationResult {
            metadata: RunMetadata {
                queues: self.config.queues.len(),
                jitter: self.config.jitter.label_with_seed(self.config.seed),
                duration_ms: self.state.time_ms,
                ticks: self.state.ticks,
            },
            timeline: std::mem::take(&mut self.state.timeline),
            samples: std::mem::take(&mut self.state.samples),
            customers,
            queues,
        })
    }

    fn customer_index(&mut self, name: &str) -> usize {
        match self
            .state
            .customers
            .iter()
            .position(|customer| customer.name == name)
        {
            Some(idx) => idx,
            None => {
                self.state
                    .customers
                    .push(Customer::new(name, self.config.starting_xp));
                self.state.customers.len() - 1
            }
        }
    }

    fn queue_id(&self, name: &str) -> Option<usize> {
        self.store.find_queue(name).map(|queue| queue.id)
    }

    fn sample(&mut self, idx: usize) {
        let customer = &self.state.customers[idx];
        if let Some(session) = customer.session() {
            self.state.samples.push(PositionSample {
                at_ms: self.state.time_ms,
                customer: customer.name.clone(),
                ahead: session.estimate.current_ahead,
                wait_minutes: session.estimate.wait_minutes(),
            });
        }
    }

    fn notice(&mut self, level: NoticeLevel, message: String) {
        self.state.timeline.push(Notice {
            at_ms: self.state.time_ms,
            level,
            message,
        });
    }

    fn reject<T>(&mut self, rejection: Rejection) -> Option<T> {
        debug!(at_ms = self.state.time_ms, %rejection, "operation rejected");
        self.notice(NoticeLevel::Error, rejection.to_string());
        None
    }
}

pub fn run_scenario(config: &ScenarioConfig) -> Result<SimulationResult> {
    let mut engine = ScenarioEngine::new(config.clone());
    engine.run()
}

pub fn validate_config(config: &ScenarioConfig) -> Result<()> {
    if config.queues.is_empty() {
        return Err(Error::EmptyQueues);
    }
    if config.queues.len() > MAX_QUEUES {
        return Err(Error::TooManyQueues {
            max: MAX_QUEUES,
            got: config.queues.len(),
        });
    }
    let mut names = HashSet::new();
    for queue in &config.queues {
        if queue.name.trim().is_empty() {
            return Err(Error::EmptyQueueName);
        }
        if queue.avg_service_minutes == 0 {
            return Err(Error::InvalidServiceTime(queue.name.clone()));
        }
        if queue.capacity == 0 {
            return Err(Error::InvalidCapacity(queue.name.clone()));
        }
        if !names.insert(queue.name.as_str()) {
            return Err(Error::DuplicateQueueName(queue.name.clone()));
        }
    }

    for seed in &config.tickets {
        if !names.contains(seed.queue.as_str()) {
            return Err(Error::UnknownQueue(seed.queue.clone()));
        }
    }
    for step in &config.script {
        if let Some(queue) = step.action.queue() {
            if !names.contains(queue) {
                return Err(Error::UnknownQueue(queue.to_string()));
            }
        }
    }

    let mut quest_ids = HashSet::new();
    for quest in &config.quests {
        if !quest_ids.insert(quest.id.as_str()) {
            return Err(Error::DuplicateQuest(quest.id.clone()));
        }
    }
    let mut reward_ids = HashSet::new();
    for reward in &config.rewards {
        if !reward_ids.insert(reward.id.as_str()) {
            return Err(Error::DuplicateReward(reward.id.clone()));
        }
    }

    if config.tick_interval_ms == 0 {
        return Err(Error::InvalidTickInterval);
    }
    if matches!(config.jitter, JitterConfig::Seeded) && config.seed.is_none() {
        return Err(Error::InvalidJitterSeed);
    }
    if config.jitter_max_minutes > 59 {
        return Err(Error::InvalidJitterMax(config.jitter_max_minutes));
    }

    Ok(())
}

fn seed_store(config: &ScenarioConfig) -> Result<InMemoryStore> {
    let mut store = InMemoryStore::new();
    for queue in &config.queues {
        store.add_queue(
            &queue.name,
            &queue.location,
            queue.avg_service_minutes,
            queue.capacity,
            queue.status,
        );
    }
    for seed in &config.tickets {
        let queue_id = store
            .find_queue(&seed.queue)
            .map(|queue| queue.id)
            .ok_or_else(|| Error::UnknownQueue(seed.queue.clone()))?;
        store.create_ticket(NewTicket {
            queue_id,
            name: seed.name.clone(),
            purpose: seed.purpose.clone(),
            status: seed.status,
            priority: seed.priority,
            estimated_wait_minutes: seed.estimated_wait_minutes,
            joined_at_ms: seed.joined_at_ms,
        })?;
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        default_quests, default_rewards, QueueConfig, QueueStatus, ScriptStep, TicketSeed,
    };

    fn queue(name: &str, avg: u32) -> QueueConfig {
        QueueConfig {
            name: name.to_string(),
            location: "Main Branch".to_string(),
            avg_service_minutes: avg,
            capacity: 50,
            status: QueueStatus::Active,
        }
    }

    fn seed(queue: &str, name: &str) -> TicketSeed {
        TicketSeed {
            queue: queue.to_string(),
            name: name.to_string(),
            purpose: "Account inquiry".to_string(),
            status: TicketStatus::Waiting,
            priority: 0,
            estimated_wait_minutes: 0,
            joined_at_ms: 0,
        }
    }

    fn step(at_ms: u64, action: ScriptAction) -> ScriptStep {
        ScriptStep { at_ms, action }
    }

    fn join(customer: &str, queue: &str) -> ScriptAction {
        ScriptAction::Join {
            customer: customer.to_string(),
            queue: queue.to_string(),
            purpose: "Service request".to_string(),
        }
    }

    fn config(script: Vec<ScriptStep>) -> ScenarioConfig {
        ScenarioConfig {
            queues: vec![queue("Front Desk", 4)],
            tickets: ["Sarah", "Mike", "Emily", "David", "Lisa"]
                .iter()
                .map(|name| seed("Front Desk", name))
                .collect(),
            script,
            quests: default_quests(),
            rewards: default_rewards(),
            starting_xp: 125,
            jitter: JitterConfig::Off,
            jitter_max_minutes: 9,
            seed: None,
            tick_interval_ms: 30_000,
            horizon_ms: 8 * 60 * 60 * 1000,
        }
    }

    #[test]
    fn customer_decays_to_the_front_and_timer_stops() {
        let result = run_scenario(&config(vec![step(0, join("Alex", "Front Desk"))]))
            .expect("scenario should run");

        let alex = &result.customers[0];
        assert_eq!(alex.ticket.as_deref(), Some("A006"));
        assert_eq!(alex.position, Some(1));
        assert_eq!(alex.estimated_wait_minutes, Some(0));
        assert_eq!(result.metadata.duration_ms, 20 * 60_000);
        assert_eq!(result.metadata.ticks, 40);
        assert_eq!(
            result.timeline.last().map(|notice| notice.message.as_str()),
            Some("Alex (A006) is next in line")
        );
    }

    #[test]
    fn samples_track_decay() {
        let result = run_scenario(&config(vec![step(0, join("Alex", "Front Desk"))]))
            .expect("scenario should run");

        let at_eight = result
            .samples
            .iter()
            .rev()
            .find(|sample| sample.at_ms <= 8 * 60_000)
            .expect("sample before minute 8");
        assert_eq!(at_eight.ahead, 3);
        assert_eq!(at_eight.wait_minutes, 12);

        for pair in result.samples.windows(2) {
            assert!(pair[1].ahead <= pair[0].ahead);
            assert!(pair[1].wait_minutes <= pair[0].wait_minutes);
        }
    }

    #[test]
    fn leaving_stops_ticks() {
        let result = run_scenario(&config(vec![
            step(0, join("Alex", "Front Desk")),
            step(
                60_000,
                ScriptAction::Leave {
                    customer: "Alex".to_string(),
                },
            ),
        ]))
        .expect("scenario should run");

        assert_eq!(result.metadata.ticks, 2);
        assert_eq!(result.metadata.duration_ms, 90_000);
        let alex = &result.customers[0];
        assert_eq!(alex.status, Some(TicketStatus::Cancelled));
        assert_eq!(alex.position, None);
        assert_eq!(result.queues[0].cancelled, 1);
    }

    #[test]
    fn serving_a_customer_stops_their_timer() {
        let result = run_scenario(&config(vec![
            step(0, join("Alex", "Front Desk")),
            step(
                120_000,
                ScriptAction::Serve {
                    queue: "Front Desk".to_string(),
                    ticket: "A006".to_string(),
                },
            ),
        ]))
        .expect("scenario should run");

        let alex = &result.customers[0];
        assert_eq!(alex.status, Some(TicketStatus::Served));
        assert_eq!(alex.actual_wait_minutes, Some(2));
        assert_eq!(alex.position, None);
        assert_eq!(result.metadata.ticks, 4);
        assert_eq!(result.metadata.duration_ms, 150_000);
        assert!(result
            .timeline
            .iter()
            .all(|notice| !notice.message.contains("next in line")));
    }

    #[test]
    fn staff_undo_restores_only_latest_ticket() {
        let result = run_scenario(&config(vec![
            step(
                0,
                ScriptAction::Serve {
                    queue: "Front Desk".to_string(),
                    ticket: "A001".to_string(),
                },
            ),
            step(
                0,
                ScriptAction::Skip {
                    queue: "Front Desk".to_string(),
                    ticket: "A002".to_string(),
                },
            ),
            step(
                0,
                ScriptAction::Undo {
                    queue: "Front Desk".to_string(),
                },
            ),
        ]))
        .expect("scenario should run");

        let summary = &result.queues[0];
        assert_eq!(summary.served, 1);
        assert_eq!(summary.cancelled, 0);
        assert_eq!(summary.waiting, 4);
        assert_eq!(summary.undoable_actions, 1);
        let messages: Vec<&str> = result
            .timeline
            .iter()
            .map(|notice| notice.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Sarah has been served",
                "Mike's ticket has been cancelled (no-show)",
                "Action undone: A002 is waiting again",
            ]
        );
    }

    #[test]
    fn rejections_become_error_notices() {
        let result = run_scenario(&config(vec![
            step(
                0,
                ScriptAction::Undo {
                    queue: "Front Desk".to_string(),
                },
            ),
            step(
                0,
                ScriptAction::Purchase {
                    customer: "Alex".to_string(),
                    reward: "service-discount".to_string(),
                },
            ),
        ]))
        .expect("scenario should run");

        assert!(result
            .timeline
            .iter()
            .all(|notice| notice.level == NoticeLevel::Error));
        assert_eq!(result.timeline[0].message, "No actions to undo");
        assert_eq!(result.customers[0].xp, 125);
        assert_eq!(result.queues[0].waiting, 5);
    }

    #[test]
    fn skip_reward_moves_customer_forward() {
        let result = run_scenario(&ScenarioConfig {
            starting_xp: 150,
            ..config(vec![
                step(0, join("Alex", "Front Desk")),
                step(
                    60_000,
                    ScriptAction::Purchase {
                        customer: "Alex".to_string(),
                        reward: "skip-3".to_string(),
                    },
                ),
            ])
        })
        .expect("scenario should run");

        let purchase = result
            .samples
            .iter()
            .find(|sample| sample.at_ms == 60_000 && sample.ahead == 2)
            .expect("sample after purchase");
        assert_eq!(purchase.wait_minutes, 7);
        assert_eq!(result.customers[0].xp, 0);
        assert_eq!(result.metadata.duration_ms, 8 * 60_000);
    }

    #[test]
    fn paused_queue_refuses_joins() {
        let result = run_scenario(&config(vec![
            step(
                0,
                ScriptAction::SetStatus {
                    queue: "Front Desk".to_string(),
                    status: QueueStatus::Paused,
                },
            ),
            step(1, join("Alex", "Front Desk")),
        ]))
        .expect("scenario should run");

        assert_eq!(result.timeline[0].message, "Front Desk is now paused");
        assert_eq!(
            result.timeline[1].message,
            "Front Desk is not accepting customers"
        );
        assert_eq!(result.customers[0].ticket, None);
        assert_eq!(result.queues[0].status, QueueStatus::Paused);
    }

    #[test]
    fn seeded_jitter_is_deterministic() {
        let scenario = ScenarioConfig {
            jitter: JitterConfig::Seeded,
            seed: Some(42),
            ..config(vec![step(0, join("Alex", "Front Desk"))])
        };
        let a = run_scenario(&scenario).expect("scenario should run");
        let b = run_scenario(&scenario).expect("scenario should run");

        assert_eq!(a.timeline[0].message, b.timeline[0].message);
        assert_eq!(a.metadata.duration_ms, b.metadata.duration_ms);
        assert_eq!(a.metadata.jitter, "seeded(42)");
        assert!(a.samples[0].wait_minutes >= 20 && a.samples[0].wait_minutes <= 29);
    }

    #[test]
    fn horizon_cuts_off_ticks() {
        let result = run_scenario(&ScenarioConfig {
            horizon_ms: 5 * 60_000,
            ..config(vec![step(0, join("Alex", "Front Desk"))])
        })
        .expect("scenario should run");

        assert_eq!(result.metadata.duration_ms, 5 * 60_000);
        assert_eq!(result.customers[0].position, Some(5));
    }

    #[test]
    fn validation_rejects_bad_configs() {
        let mut duplicate = config(Vec::new());
        duplicate.queues.push(queue("Front Desk", 3));
        assert_eq!(
            validate_config(&duplicate).unwrap_err().to_string(),
            "duplicate queue name 'Front Desk'"
        );

        let mut zero = config(Vec::new());
        zero.queues[0].avg_service_minutes = 0;
        assert!(matches!(
            validate_config(&zero),
            Err(Error::InvalidServiceTime(_))
        ));

        let unknown = config(vec![step(0, join("Alex", "Nowhere"))]);
        assert_eq!(
            validate_config(&unknown).unwrap_err().to_string(),
            "unknown queue 'Nowhere'"
        );

        let unseeded = ScenarioConfig {
            jitter: JitterConfig::Seeded,
            ..config(Vec::new())
        };
        assert!(matches!(
            validate_config(&unseeded),
            Err(Error::InvalidJitterSeed)
        ));

        let empty = ScenarioConfig {
            queues: Vec::new(),
            tickets: Vec::new(),
            ..config(Vec::new())
        };
        assert!(matches!(validate_config(&empty), Err(Error::EmptyQueues)));

        let crowded = ScenarioConfig {
            queues: (0..27).map(|idx| queue(&format!("desk-{}", idx), 4)).collect(),
            tickets: Vec::new(),
            ..config(Vec::new())
        };
        assert_eq!(
            validate_config(&crowded).unwrap_err().to_string(),
            "at most 26 queues are supported (got 27)"
        );
    }
}
