//! Moderation Discord commands - `warn`, `warnings` and `clearwarnings`.
//!
//! Each command gathers its typed arguments and the invocation session, then hands
//! over to the matching handler in [`crate::core::moderation`].

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, prompts::InteractionPrompts, replies::CommandReplies, session},
        core::moderation,
        errors::Result,
    };
    use poise::serenity_prelude as serenity;

    /// Warns a user
    #[poise::command(slash_command, guild_only)]
    pub async fn warn(
        ctx: Context<'_>,
        #[description = "The user to warn"] user: serenity::User,
        #[description = "The reason for the warning"]
        #[max_length = 1024]
        reason: String,
    ) -> Result<()> {
        let session = session::from_context(ctx).await;
        moderation::warn_user(
            &ctx.data().database,
            &CommandReplies::new(ctx),
            &session,
            &session::target(&user),
            &reason,
        )
        .await
    }

    /// Lists a user's warnings in this server
    #[poise::command(slash_command, guild_only)]
    pub async fn warnings(
        ctx: Context<'_>,
        #[description = "The user to look up"] user: serenity::User,
    ) -> Result<()> {
        let session = session::from_context(ctx).await;
        moderation::list_warnings(
            &ctx.data().database,
            &CommandReplies::new(ctx),
            &session,
            &session::target(&user),
        )
        .await
    }

    /// Clears all of a user's warnings in this server
    #[poise::command(slash_command, guild_only)]
    pub async fn clearwarnings(
        ctx: Context<'_>,
        #[description = "The user whose warnings to clear"] user: serenity::User,
    ) -> Result<()> {
        let session = session::from_context(ctx).await;
        let prompts = InteractionPrompts::from_context(ctx)?;
        moderation::clear_warnings(
            &ctx.data().database,
            &CommandReplies::new(ctx),
            &prompts,
            &session,
            &session::target(&user),
        )
        .await
    }
}

// Re-export all commands
pub use inner::*;
