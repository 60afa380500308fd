//! Spell error types

use thiserror::Error;

/// Spell errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpellError {
    #[error("Spell has already been launched")]
    AlreadyLaunched,

    #[error("Spell is not being cast")]
    NotCasting,

    #[error("Spell is already being cast")]
    AlreadyCasting,

    #[error("Invalid spell configuration: {0}")]
    InvalidConfig(String),
}

impl SpellError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result type for spell operations
pub type Result<T> = std::result::Result<T, SpellError>;
