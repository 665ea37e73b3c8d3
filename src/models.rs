use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ScenarioConfig {
    pub queues: Vec<QueueConfig>,
    #[serde(default)]
    pub tickets: Vec<TicketSeed>,
    #[serde(default)]
    pub script: Vec<ScriptStep>,
    #[serde(default = "default_quests")]
    pub quests: Vec<QuestConfig>,
    #[serde(default = "default_rewards")]
    pub rewards: Vec<RewardConfig>,
    #[serde(default = "default_starting_xp")]
    pub starting_xp: u32,
    #[serde(default)]
    pub jitter: JitterConfig,
    #[serde(default = "default_jitter_max")]
    pub jitter_max_minutes: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_horizon")]
    pub horizon_ms: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct QueueConfig {
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub avg_service_minutes: u32,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    #[serde(default)]
    pub status: QueueStatus,
}

/// A ticket that already exists when the scenario starts.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TicketSeed {
    pub queue: String,
    pub name: String,
    #[serde(default = "default_purpose")]
    pub purpose: String,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub estimated_wait_minutes: u32,
    #[serde(default)]
    pub joined_at_ms: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ScriptStep {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ScriptAction {
    Join {
        customer: String,
        queue: String,
        #[serde(default = "default_purpose")]
        purpose: String,
    },
    Leave {
        customer: String,
    },
    CompleteQuest {
        customer: String,
        quest: String,
    },
    Purchase {
        customer: String,
        reward: String,
    },
    Serve {
        queue: String,
        ticket: String,
    },
    Skip {
        queue: String,
        ticket: String,
    },
    Hold {
        queue: String,
        ticket: String,
    },
    Requeue {
        queue: String,
        ticket: String,
    },
    Undo {
        queue: String,
    },
    SetStatus {
        queue: String,
        status: QueueStatus,
    },
}

impl ScriptAction {
    pub fn customer(&self) -> Option<&str> {
        match self {
            ScriptAction::Join { customer, .. }
            | ScriptAction::Leave { customer }
            | ScriptAction::CompleteQuest { customer, .. }
            | ScriptAction::Purchase { customer, .. } => Some(customer),
            _ => None,
        }
    }

    pub fn queue(&self) -> Option<&str> {
        match self {
            ScriptAction::Join { queue, .. }
            | ScriptAction::Serve { queue, .. }
            | ScriptAction::Skip { queue, .. }
            | ScriptAction::Hold { queue, .. }
            | ScriptAction::Requeue { queue, .. }
            | ScriptAction::Undo { queue }
            | ScriptAction::SetStatus { queue, .. } => Some(queue),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct QuestConfig {
    pub id: String,
    pub title: String,
    pub xp: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RewardConfig {
    pub id: String,
    pub title: String,
    pub cost: u32,
    pub effect: RewardEffect,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RewardEffect {
    Discount { percent: u32 },
    SkipPlaces { places: u32 },
    Cosmetic,
    Voucher,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum QueueStatus {
    #[default]
    Active,
    Paused,
    Stopped,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    #[default]
    Waiting,
    Called,
    Served,
    Cancelled,
    NoShow,
    Parked,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum JitterConfig {
    #[default]
    Off,
    Seeded,
}

impl JitterConfig {
    pub fn label_with_seed(&self, seed: Option<u64>) -> String {
        match (self, seed) {
            (JitterConfig::Seeded, Some(seed)) => format!("seeded({})", seed),
            (JitterConfig::Seeded, None) => "seeded".to_string(),
            (JitterConfig::Off, _) => "off".to_string(),
        }
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            QueueStatus::Active => "active",
            QueueStatus::Paused => "paused",
            QueueStatus::Stopped => "stopped",
        };
        write!(f, "{}", value)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            TicketStatus::Waiting => "waiting",
            TicketStatus::Called => "called",
            TicketStatus::Served => "served",
            TicketStatus::Cancelled => "cancelled",
            TicketStatus::NoShow => "no-show",
            TicketStatus::Parked => "parked",
        };
        write!(f, "{}", value)
    }
}

impl fmt::Display for JitterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            JitterConfig::Off => "off",
            JitterConfig::Seeded => "seeded",
        };
        write!(f, "{}", value)
    }
}

impl fmt::Display for RewardEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewardEffect::Discount { percent } => write!(f, "{}% discount", percent),
            RewardEffect::SkipPlaces { places } => write!(f, "skip {} places", places),
            RewardEffect::Cosmetic => write!(f, "cosmetic"),
            RewardEffect::Voucher => write!(f, "voucher"),
        }
    }
}

pub fn default_quests() -> Vec<QuestConfig> {
    [
        ("watch-video", "Watch Promo Video", 50),
        ("complete-survey", "Complete Survey", 75),
        ("nba-trivia", "NBA Trivia Quiz", 60),
        ("follow-social", "Follow Social Media", 25),
    ]
    .into_iter()
    .map(|(id, title, xp)| QuestConfig {
        id: id.to_string(),
        title: title.to_string(),
        xp,
    })
    .collect()
}

pub fn default_rewards() -> Vec<RewardConfig> {
    [
        (
            "service-discount",
            "10% Service Discount",
            200,
            RewardEffect::Discount { percent: 10 },
        ),
        (
            "skip-3",
            "Skip 3 Places",
            150,
            RewardEffect::SkipPlaces { places: 3 },
        ),
        ("golden-ticket", "Golden Ticket Skin", 100, RewardEffect::Cosmetic),
        ("coffee-voucher", "Free Coffee Voucher", 75, RewardEffect::Voucher),
    ]
    .into_iter()
    .map(|(id, title, cost, effect)| RewardConfig {
        id: id.to_string(),
        title: title.to_string(),
        cost,
        effect,
    })
    .collect()
}

fn default_starting_xp() -> u32 {
    125
}

fn default_jitter_max() -> u32 {
    9
}

fn default_tick_interval() -> u64 {
    30_000
}

fn default_horizon() -> u64 {
    8 * 60 * 60 * 1000
}

fn default_capacity() -> u32 {
    100
}

fn default_purpose() -> String {
    "Service request".to_string()
}
