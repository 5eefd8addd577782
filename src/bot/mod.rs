//! Bot layer - Discord-specific interface and command handlers
//!
//! This module adapts poise/serenity to the core: it builds a [`crate::core::session::Session`]
//! per interaction, implements the reply and prompt seams on top of the interaction, and
//! wires the commands into the framework.

/// Framework and client construction
pub mod client;
/// Discord command implementations (general, moderation)
pub mod commands;
/// Prompt controls as serenity components
pub mod components;
/// Error-channel reporting
pub mod console;
/// Rendered replies as serenity embeds
pub mod embeds;
/// Prompt gateway over a command interaction
pub mod prompts;
/// Reply channel over a poise context
pub mod replies;
/// Session extraction from a poise context
pub mod session;

use crate::{config::settings::BotConfig, errors::Error};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared data available to all bot commands.
/// This structure holds the database connection and the settings
/// loaded at startup; neither changes while the bot runs.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Settings from config.toml
    pub config: Arc<BotConfig>,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(database: DatabaseConnection, config: Arc<BotConfig>) -> Self {
        Self { database, config }
    }
}

/// Poise context used by every command
pub type Context<'a> = poise::Context<'a, BotData, Error>;

pub use client::run_bot;
