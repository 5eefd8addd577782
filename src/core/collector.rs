//! Interactive collector - present controls and wait for the invoker's answer.
//!
//! [`await_selection`] sends one prompt message, waits until the invoking user activates
//! one of its controls or the prompt times out, then disables the controls in place.
//! Every activation on the message is acknowledged so the client never shows a stalled
//! loading state, but only the invoker can resolve the wait.

use crate::{
    core::{
        prompt::{ActivationData, Controls, Prompt, PromptState, Selection},
        session::Session,
    },
    errors::Result,
};
use async_trait::async_trait;
use futures::{StreamExt, stream::BoxStream};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// A component activation as delivered by the gateway.
pub trait ControlActivation: Send {
    /// Id of the user who activated the control
    fn user_id(&self) -> u64;

    /// What the activation carried
    fn data(&self) -> ActivationData;
}

/// Message operations the collector needs from the chat platform.
#[async_trait]
pub trait PromptGateway: Send + Sync {
    /// Reference to a posted prompt message
    type Handle: Clone + Send + Sync + 'static;
    /// A component activation on a prompt message
    type Activation: ControlActivation;

    /// Posts the prompt with enabled controls.
    async fn post(&self, content: &str, controls: &Controls) -> Result<Self::Handle>;

    /// Activations on the posted message, in arrival order.
    fn activations(&self, handle: &Self::Handle) -> BoxStream<'static, Self::Activation>;

    /// Acknowledges an activation without changing the message.
    async fn acknowledge(&self, activation: &Self::Activation) -> Result<()>;

    /// Rewrites the message content and controls.
    async fn edit(
        &self,
        handle: &Self::Handle,
        content: &str,
        controls: &Controls,
        disabled: bool,
    ) -> Result<()>;

    /// Deletes the message.
    async fn delete(&self, handle: &Self::Handle) -> Result<()>;
}

/// Presents `prompt` to the session's invoker and waits for one answer.
///
/// Returns `Ok(None)` when the prompt timed out; that is not an error. On an answer the
/// prompt text is restored with disabled controls and, if requested, the message is
/// deleted after the controls' grace period without holding up the caller. A timed-out
/// prompt is never deleted.
pub async fn await_selection<G>(
    gateway: &G,
    session: &Session,
    prompt: &Prompt,
) -> Result<Option<Selection>>
where
    G: PromptGateway + Clone + 'static,
{
    let controls = prompt.controls();
    let handle = gateway.post(prompt.text(), controls).await?;
    let mut state = PromptState::Pending;
    let deadline = Instant::now() + prompt.timeout();
    let invoker = session.invoker.id;

    let mut activations = gateway.activations(&handle);
    let waiting = async {
        while let Some(activation) = activations.next().await {
            if let Err(e) = gateway.acknowledge(&activation).await {
                warn!("Failed to acknowledge prompt activation: {e}");
            }
            let user_id = activation.user_id();
            if user_id != invoker {
                debug!(user_id, invoker, "Ignoring activation from another user");
                continue;
            }
            if let Some(selection) = controls.resolve(&activation.data()) {
                return Some(selection);
            }
            debug!(user_id, "Ignoring activation that matches no control");
        }
        None
    };
    let selection = tokio::time::timeout_at(deadline, waiting)
        .await
        .ok()
        .flatten();
    drop(activations);

    let delete = match selection {
        Some(_) => {
            state = state.advance(PromptState::Resolved)?;
            gateway.edit(&handle, prompt.text(), controls, true).await?;
            if prompt.deletes_on_resolve() {
                state = state.advance(PromptState::DisabledPendingDeletion)?;
                true
            } else {
                state = state.advance(PromptState::Disabled)?;
                false
            }
        }
        None => {
            state = state.advance(PromptState::TimedOut)?;
            gateway
                .edit(&handle, controls.cancelled_text(), controls, true)
                .await?;
            state = state.advance(PromptState::Disabled)?;
            false
        }
    };
    info!(user_id = invoker, ?state, "Prompt settled");

    if delete {
        let gateway = gateway.clone();
        let grace = controls.grace_period();
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            match gateway.delete(&handle).await {
                Ok(()) => debug!(state = ?PromptState::Deleted, "Prompt deleted"),
                Err(e) => warn!("Failed to delete resolved prompt: {e}"),
            }
        });
    }

    Ok(selection)
}
