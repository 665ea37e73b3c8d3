use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("queues must not be empty")]
    EmptyQueues,
    #[error("at most {max} queues are supported (got {got})")]
    TooManyQueues { max: usize, got: usize },
    #[error("duplicate queue name '{0}'")]
    DuplicateQueueName(String),
    #[error("queue name must not be empty")]
    EmptyQueueName,
    #[error("average service time must be > 0 in queue '{0}'")]
    InvalidServiceTime(String),
    #[error("capacity must be > 0 in queue '{0}'")]
    InvalidCapacity(String),
    #[error("unknown queue '{0}'")]
    UnknownQueue(String),
    #[error("duplicate quest id '{0}'")]
    DuplicateQuest(String),
    #[error("duplicate reward id '{0}'")]
    DuplicateReward(String),
    #[error("tick interval must be > 0")]
    InvalidTickInterval,
    #[error("jitter seed required when jitter is seeded")]
    InvalidJitterSeed,
    #[error("jitter max must be <= 59 minutes (got {0})")]
    InvalidJitterMax(u32),
    #[error("average service time must be > 0")]
    ServiceTimeZero,
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a ticket or queue store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("ticket #{0} not found")]
    TicketNotFound(usize),
    #[error("queue #{0} not found")]
    QueueNotFound(usize),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A user or state condition that aborts an operation without changing
/// anything. Surfaced to the caller as a notice, never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("No actions to undo")]
    NothingToUndo,
    #[error("Not enough XP for {reward}: costs {cost}, have {available}")]
    InsufficientXp {
        reward: String,
        cost: u32,
        available: u32,
    },
    #[error("Unknown quest '{0}'")]
    UnknownQuest(String),
    #[error("Quest '{0}' already completed")]
    QuestAlreadyCompleted(String),
    #[error("Unknown reward '{0}'")]
    UnknownReward(String),
    #[error("{0} is not in a queue")]
    NotInQueue(String),
    #[error("{0} is already in a queue")]
    AlreadyInQueue(String),
    #[error("Ticket {0} not found")]
    UnknownTicket(String),
    #[error("Cannot {action} ticket {ticket}: status is {status}")]
    InvalidTransition {
        ticket: String,
        action: String,
        status: String,
    },
    #[error("{0} is not accepting customers")]
    QueueNotAccepting(String),
    #[error("{0} is full")]
    QueueFull(String),
    #[error("{0}")]
    Store(#[from] StoreError),
}
