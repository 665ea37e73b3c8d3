use std::fmt::Write;

use crate::estimator::WaitEstimate;
use crate::models::{QuestConfig, RewardConfig, ScenarioConfig, TicketStatus};
use crate::state::{CustomerSummary, QueueSummary, RunMetadata, SimulationResult};

pub trait Formatter {
    fn write(&self, result: &SimulationResult) -> String;
}

/// Metadata, full timeline, then per-customer and per-queue summaries.
pub struct HumanFormatter;

/// Everything but the timeline.
pub struct SummaryFormatter;

pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        let mut out = String::new();
        write_metadata(&mut out, &result.metadata);
        out.push_str("Timeline:\n");
        for notice in &result.timeline {
            let _ = writeln!(
                out,
                "[{}] {}: {}",
                clock(notice.at_ms),
                notice.level,
                notice.message
            );
        }
        write_customers(&mut out, &result.customers);
        write_queues(&mut out, &result.queues);
        out
    }
}

impl Formatter for SummaryFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        let mut out = String::new();
        write_metadata(&mut out, &result.metadata);
        write_customers(&mut out, &result.customers);
        write_queues(&mut out, &result.queues);
        out
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        match serde_json::to_string_pretty(result) {
            Ok(json) => format!("{}\n", json),
            Err(err) => format!("{{\"error\": \"{}\"}}\n", err),
        }
    }
}

/// `mm:ss` of simulated time. Minutes keep counting past an hour.
pub fn clock(at_ms: u64) -> String {
    let seconds = at_ms / 1000;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn write_metadata(out: &mut String, metadata: &RunMetadata) {
    out.push_str("Metadata:\n");
    let _ = writeln!(out, "queues: {}", metadata.queues);
    let _ = writeln!(out, "jitter: {}", metadata.jitter);
    let _ = writeln!(out, "duration_ms: {}", metadata.duration_ms);
    let _ = writeln!(out, "ticks: {}", metadata.ticks);
}

fn write_customers(out: &mut String, customers: &[CustomerSummary]) {
    if customers.is_empty() {
        return;
    }
    out.push_str("Customers:\n");
    for customer in customers {
        let _ = writeln!(out, "{}", customer_line(customer));
    }
}

fn customer_line(customer: &CustomerSummary) -> String {
    let mut parts = Vec::new();
    match (&customer.ticket, &customer.queue, customer.status) {
        (Some(ticket), Some(queue), Some(status)) => {
            parts.push(format!("{} at {}", ticket, queue));
            parts.push(status.to_string());
            match (customer.position, customer.estimated_wait_minutes) {
                (Some(position), Some(wait)) => {
                    parts.push(format!("position {}, ~{} min", position, wait));
                }
                _ if status != TicketStatus::Waiting => {
                    parts.push(format!(
                        "waited {} min",
                        customer.actual_wait_minutes.unwrap_or(0)
                    ));
                }
                _ => {}
            }
        }
        _ => parts.push("no ticket".to_string()),
    }
    parts.push(format!("{} XP (level {})", customer.xp, customer.level));
    if customer.golden_ticket {
        parts.push("golden ticket".to_string());
    }
    if !customer.perks.is_empty() {
        parts.push(format!("perks: {}", customer.perks.join("; ")));
    }
    format!("{}: {}", customer.name, parts.join(", "))
}

fn write_queues(out: &mut String, queues: &[QueueSummary]) {
    out.push_str("Queues:\n");
    for queue in queues {
        let _ = writeln!(
            out,
            "{}: {}, {} waiting, {} served, {} parked, {} cancelled, {} undoable",
            queue.name,
            queue.status,
            queue.waiting,
            queue.served,
            queue.parked,
            queue.cancelled,
            queue.undoable_actions
        );
    }
}

pub fn write_config(config: &ScenarioConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Jitter: {}", config.jitter.label_with_seed(config.seed));
    let _ = writeln!(out, "Tick interval: {}ms", config.tick_interval_ms);
    let _ = writeln!(out, "Horizon: {}ms", config.horizon_ms);
    let _ = writeln!(out, "Starting XP: {}", config.starting_xp);
    out.push_str("Queues:\n");
    for queue in &config.queues {
        let _ = writeln!(
            out,
            "- {} ({}, avg service: {} min, capacity: {})",
            queue.name, queue.status, queue.avg_service_minutes, queue.capacity
        );
    }
    let _ = writeln!(out, "Tickets: {}", config.tickets.len());
    let _ = writeln!(out, "Script steps: {}", config.script.len());
    out
}

pub fn write_rewards(rewards: &[RewardConfig]) -> String {
    let mut out = String::new();
    for reward in rewards {
        let _ = writeln!(
            out,
            "{}: {} ({} XP, {})",
            reward.id, reward.title, reward.cost, reward.effect
        );
    }
    out
}

pub fn write_quests(quests: &[QuestConfig]) -> String {
    let mut out = String::new();
    for quest in quests {
        let _ = writeln!(out, "{}: {} (+{} XP)", quest.id, quest.title, quest.xp);
    }
    out
}

pub fn write_projection(joined: &WaitEstimate, projected: &WaitEstimate, minutes: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Joined: position {} ({} ahead), ~{} min",
        joined.position(),
        joined.current_ahead,
        joined.wait_minutes()
    );
    let _ = writeln!(
        out,
        "After {} min: position {} ({} ahead), ~{} min",
        minutes,
        projected.position(),
        projected.current_ahead,
        projected.wait_minutes()
    );
    if projected.at_front() {
        out.push_str("You're next in line!\n");
    }
    out
}
