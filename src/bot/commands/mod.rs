//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Moderation commands
pub mod moderation;

use crate::{bot::BotData, errors::Error};

// Export commands
pub use general::*;
pub use moderation::*;

/// Every command the bot registers, built once at startup.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![help(), warn(), warnings(), clearwarnings()]
}
