//! General Discord commands - help and other utility commands.
//! These commands don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, prompts::InteractionPrompts, replies::CommandReplies, session},
        core::help::{self, CommandEntry},
        errors::Result,
    };

    /// Explains a command picked from a menu.
    #[poise::command(slash_command, guild_only)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let entries: Vec<CommandEntry> = ctx
            .framework()
            .options()
            .commands
            .iter()
            .map(|command| CommandEntry {
                name: command.name.clone(),
                description: command
                    .description
                    .clone()
                    .unwrap_or_else(|| "No description".to_string()),
            })
            .collect();

        let session = session::from_context(ctx).await;
        let prompts = InteractionPrompts::from_context(ctx)?;
        help::show_help(&CommandReplies::new(ctx), &prompts, &session, &entries).await
    }
}

// Re-export all commands
pub use inner::*;
