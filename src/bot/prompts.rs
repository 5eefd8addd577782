//! Prompt gateway over a command interaction.
//!
//! Prompts are posted as interaction follow-ups and edited or deleted through the
//! interaction's webhook, so the bot needs no channel permissions of its own.
//! Activations come from a serenity component collector scoped to the prompt message.

use crate::{
    bot::{Context, components},
    core::{
        collector::{ControlActivation, PromptGateway},
        prompt::{ActivationData, Controls},
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use futures::{StreamExt, stream::BoxStream};
use poise::serenity_prelude as serenity;

/// [`PromptGateway`] bound to one slash command interaction.
#[derive(Clone)]
pub struct InteractionPrompts {
    ctx: serenity::Context,
    interaction: serenity::CommandInteraction,
}

impl InteractionPrompts {
    /// Binds to the interaction behind `ctx`; prompts need a slash command invocation.
    pub fn from_context(ctx: Context<'_>) -> Result<Self> {
        match ctx {
            poise::Context::Application(actx) => Ok(Self {
                ctx: actx.serenity_context.clone(),
                interaction: actx.interaction.clone(),
            }),
            poise::Context::Prefix(_) => Err(Error::invalid(
                "prompts are only available to slash commands",
            )),
        }
    }
}

impl ControlActivation for serenity::ComponentInteraction {
    fn user_id(&self) -> u64 {
        self.user.id.get()
    }

    fn data(&self) -> ActivationData {
        match &self.data.kind {
            serenity::ComponentInteractionDataKind::Button => ActivationData::Button {
                custom_id: self.data.custom_id.clone(),
            },
            serenity::ComponentInteractionDataKind::StringSelect { values } => ActivationData::Menu {
                custom_id: self.data.custom_id.clone(),
                values: values.clone(),
            },
            _ => ActivationData::Other,
        }
    }
}

#[async_trait]
impl PromptGateway for InteractionPrompts {
    type Handle = serenity::MessageId;
    type Activation = serenity::ComponentInteraction;

    async fn post(&self, content: &str, controls: &Controls) -> Result<serenity::MessageId> {
        let message = self
            .interaction
            .create_followup(
                &self.ctx,
                serenity::CreateInteractionResponseFollowup::new()
                    .content(content)
                    .components(components::action_rows(controls, false)),
            )
            .await?;
        Ok(message.id)
    }

    fn activations(
        &self,
        handle: &serenity::MessageId,
    ) -> BoxStream<'static, serenity::ComponentInteraction> {
        serenity::ComponentInteractionCollector::new(&self.ctx)
            .message_id(*handle)
            .stream()
            .boxed()
    }

    async fn acknowledge(&self, activation: &serenity::ComponentInteraction) -> Result<()> {
        activation
            .create_response(&self.ctx, serenity::CreateInteractionResponse::Acknowledge)
            .await
            .map_err(Error::from)
    }

    async fn edit(
        &self,
        handle: &serenity::MessageId,
        content: &str,
        controls: &Controls,
        disabled: bool,
    ) -> Result<()> {
        self.interaction
            .edit_followup(
                &self.ctx,
                *handle,
                serenity::CreateInteractionResponseFollowup::new()
                    .content(content)
                    .components(components::action_rows(controls, disabled)),
            )
            .await?;
        Ok(())
    }

    async fn delete(&self, handle: &serenity::MessageId) -> Result<()> {
        self.interaction
            .delete_followup(&self.ctx, *handle)
            .await
            .map_err(Error::from)
    }
}
