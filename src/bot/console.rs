//! Error-channel ("console") reporting.
//!
//! Failures users cannot act on are posted to the configured error channel so
//! maintainers see them without reading the process logs.

use crate::{bot::embeds, core::reply::RenderedReply, errors::Result};
use poise::serenity_prelude as serenity;
use tracing::debug;

/// Posts `message` from `source` to the error channel, if one is configured.
pub async fn report(
    http: impl serenity::CacheHttp,
    error_channel: Option<u64>,
    message: &str,
    source: &str,
) -> Result<()> {
    let Some(channel) = error_channel.filter(|&id| id != 0) else {
        debug!(source, "No error channel configured, console report skipped");
        return Ok(());
    };
    let channel = serenity::ChannelId::new(channel);

    channel
        .say(http.http(), format!("Incoming message from {source}"))
        .await?;
    channel
        .send_message(
            &http,
            serenity::CreateMessage::new().embed(embeds::to_embed(&RenderedReply::console(
                message, source,
            ))),
        )
        .await?;
    Ok(())
}
