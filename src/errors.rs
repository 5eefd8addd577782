//! Unified error types for the bot.
//!
//! Handler outcomes that users should see (permission denials, persistence faults)
//! are reported as replies rather than returned; the variants here cover what
//! escapes to the framework or to `main`.

use poise::serenity_prelude as serenity;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// An argument failed validation before any side effect took place
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Which argument and why
        message: String,
    },

    /// Raw database error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Discord API or gateway error
    #[error("Discord error: {0}")]
    Discord(Box<serenity::Error>),

    /// Required environment variable missing
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

impl From<serenity::Error> for Error {
    fn from(value: serenity::Error) -> Self {
        Self::Discord(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
