use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid match: {0}")]
    Validation(#[from] ValidationError),

    #[error("No match history found")]
    EmptyLog,

    #[error("Failed to persist data: {0}")]
    Persistence(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Unrecognized command: {0}")]
    InvalidCommand(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

/// Which half of a lineup a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Teammates,
    Enemies,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Teammates => write!(f, "teammates"),
            Side::Enemies => write!(f, "enemies"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{side} must list exactly 5 heroes, got {found}")]
    WrongCount { side: Side, found: usize },

    #[error("{side} slot {slot} is empty")]
    EmptyHero { side: Side, slot: usize },

    #[error("{side} contains {hero} more than once")]
    DuplicateHero { side: Side, hero: String },

    #[error("a map is required")]
    EmptyMap,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown role '{0}' (expected Tank, Damage or Support)")]
    UnknownRole(String),

    #[error("name must not be empty")]
    EmptyName,

    #[error("map '{0}' already exists")]
    DuplicateMap(String),
}
