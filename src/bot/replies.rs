//! Reply channel over a poise command context.
//!
//! The deferred response is edited in place with the acknowledgment marker; the
//! rendered reply goes out as a follow-up so it can be private on its own.

use crate::{
    bot::{Context, embeds},
    core::reply::{RenderedReply, ReplyChannel},
    errors::Result,
};
use async_trait::async_trait;
use poise::{CreateReply, serenity_prelude as serenity};
use std::sync::atomic::Ordering;

/// [`ReplyChannel`] for one command invocation.
pub struct CommandReplies<'a> {
    ctx: Context<'a>,
}

impl<'a> CommandReplies<'a> {
    /// Wraps the invocation context.
    #[must_use]
    pub const fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl ReplyChannel for CommandReplies<'_> {
    async fn defer(&self, ephemeral: bool) -> Result<()> {
        if ephemeral {
            self.ctx.defer_ephemeral().await?;
        } else {
            self.ctx.defer().await?;
        }
        Ok(())
    }

    async fn acknowledge(&self, marker: &str) -> Result<()> {
        match self.ctx {
            poise::Context::Application(actx)
                if actx.has_sent_initial_response.load(Ordering::SeqCst) =>
            {
                actx.interaction
                    .edit_response(
                        actx.serenity_context,
                        serenity::EditInteractionResponse::new().content(marker),
                    )
                    .await?;
            }
            _ => {
                self.ctx.say(marker).await?;
            }
        }
        Ok(())
    }

    async fn follow_up(&self, reply: &RenderedReply, ephemeral: bool) -> Result<()> {
        self.ctx
            .send(
                CreateReply::default()
                    .embed(embeds::to_embed(reply))
                    .ephemeral(ephemeral),
            )
            .await?;
        Ok(())
    }
}
