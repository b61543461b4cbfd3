use thiserror::Error;

/// Errors that can occur while searching or stepping an environment
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Twenty48Error {
    #[error("Invalid action index {index} (action set has {num_actions} actions)")]
    InvalidAction { index: usize, num_actions: usize },

    #[error("Environment could not be cloned independently: {0}")]
    EnvironmentClone(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid board: {0}")]
    InvalidBoard(String),
}

/// Convenience Result type for search and environment operations
pub type Result<T> = std::result::Result<T, Twenty48Error>;
