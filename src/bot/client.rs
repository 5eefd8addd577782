//! Framework and client construction.
//!
//! Builds the poise framework around the command list from [`commands::all`], routes
//! framework errors to formatted replies, registers the slash commands and starts the
//! gateway connection.

use crate::{
    bot::{BotData, commands, console, replies::CommandReplies, session},
    config::settings::BotConfig,
    core::{
        messages,
        reply::{ReplyResult, report_outcome},
    },
    errors::Error,
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::{sync::Arc, time::Instant};
use tracing::{error, info, instrument, warn};

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            let source = format!("/{}", ctx.command().name);
            error!(command = %source, "Error in command: {error}");

            if let Err(e) = console::report(
                ctx.serenity_context(),
                ctx.data().config.error_channel,
                &error.to_string(),
                &source,
            )
            .await
            {
                error!("Failed to post console report: {e}");
            }

            let unknown = ReplyResult::error(messages::UNKNOWN, error.to_string());
            let invoker = session::invoker(ctx.author());
            if let Err(e) = report_outcome(&CommandReplies::new(ctx), &invoker, &unknown, true).await {
                error!("Failed to send error message: {e}");
            }
        }
        poise::FrameworkError::GuildOnly { ctx, .. } => {
            let no_dm = ReplyResult::warning(messages::NO_DIRECT_MESSAGES, "");
            let invoker = session::invoker(ctx.author());
            if let Err(e) = report_outcome(&CommandReplies::new(ctx), &invoker, &no_dm, true).await {
                error!("Failed to send guild-only warning: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

fn log_command_table(commands: &[poise::Command<BotData, Error>]) {
    info!("Loaded {} commands", commands.len());
    for command in commands {
        info!(
            command = %command.name,
            description = command.description.as_deref().unwrap_or(""),
            "Command loaded"
        );
    }
}

async fn register(
    ctx: &serenity::Context,
    commands: &[poise::Command<BotData, Error>],
    dev_guild_id: Option<u64>,
) -> Result<(), serenity::Error> {
    let started = Instant::now();
    match dev_guild_id.filter(|&id| id != 0) {
        Some(guild) => {
            let guild_id = serenity::GuildId::new(guild);
            poise::builtins::register_in_guild(ctx, commands, guild_id).await?;
            info!(%guild_id, "Registered commands in development guild");
        }
        None => {
            poise::builtins::register_globally(ctx, commands).await?;
            info!("Registered commands globally");
        }
    }
    info!(
        elapsed_ms = started.elapsed().as_millis(),
        "Refreshed application commands"
    );
    Ok(())
}

/// Builds the framework and client, then runs until the gateway connection ends.
#[instrument(skip(token, config, database))]
pub async fn run_bot(
    token: String,
    config: Arc<BotConfig>,
    database: DatabaseConnection,
) -> Result<(), serenity::Error> {
    let commands = commands::all();
    log_command_table(&commands);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands,
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                register(ctx, &framework.options().commands, config.dev_guild_id).await?;

                let presence = config
                    .presence
                    .clone()
                    .unwrap_or_else(|| format!("{} is starting up!", ready.user.name));
                ctx.set_activity(Some(serenity::ActivityData::playing(presence)));
                info!("Client is ready");

                Ok(BotData::new(database, config))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILDS | serenity::GatewayIntents::GUILD_MODERATION;

    info!("Setting up Serenity client for Poise framework...");
    let client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await;

    match client {
        Ok(mut c) => {
            info!("Starting bot client...");
            if let Err(why) = c.start().await {
                error!("Client error: {:?}", why);
                return Err(why);
            }
            warn!("Gateway connection closed");
        }
        Err(e) => {
            error!("Error creating client: {:?}", e);
            return Err(e);
        }
    }
    Ok(())
}
