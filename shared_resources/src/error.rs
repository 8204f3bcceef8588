use crate::request::Floor;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// Rejected before it reaches the registry.
    #[error("invalid request {origin} -> {destination} for a building with {num_floors} floors")]
    InvalidFloor {
        origin: i64,
        destination: i64,
        num_floors: Floor,
    },
    #[error("cannot move past floor {floor}")]
    AtBoundary { floor: Floor },
    #[error("elevator is full ({capacity} passengers)")]
    CapacityExceeded { capacity: usize },
    #[error("dispatch loop already started")]
    AlreadyStarted,
    #[error("dispatch loop not started")]
    NotStarted,
    #[error("could not spawn dispatch worker: {0}")]
    Spawn(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown dispatch policy '{0}'")]
    UnknownPolicy(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
