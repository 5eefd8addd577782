//! Shared test utilities.
//!
//! In-memory stand-ins for the two Discord-facing seams ([`ReplyChannel`] and
//! [`PromptGateway`]) plus database and session helpers with sensible defaults.

use crate::{
    core::{
        collector::{ControlActivation, PromptGateway},
        prompt::{ActivationData, Controls, MENU_CUSTOM_ID},
        reply::{RenderedReply, ReplyChannel},
        session::{Capability, Invoker, Session, TargetUser},
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use futures::{
    StreamExt,
    stream::{self, BoxStream},
};
use sea_orm::DatabaseConnection;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

/// Guild used by test sessions
pub const TEST_GUILD: u64 = 1_000;
/// Channel used by test sessions
pub const TEST_CHANNEL: u64 = 2_000;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The invoker every test session uses.
#[must_use]
pub fn test_invoker() -> Invoker {
    Invoker {
        id: 42,
        name: "moderator".to_string(),
        avatar_url: Some("https://cdn.discordapp.com/avatars/42/abc.png".to_string()),
    }
}

/// A guild session without capabilities.
#[must_use]
pub fn test_session() -> Session {
    Session::new(test_invoker(), Some(TEST_GUILD), TEST_CHANNEL)
}

/// A guild session holding every capability.
#[must_use]
pub fn moderator_session() -> Session {
    test_session()
        .with_capability(Capability::ViewAuditLog)
        .with_capability(Capability::ModerateMembers)
}

/// A target user.
#[must_use]
pub fn test_target() -> TargetUser {
    TargetUser {
        id: 77,
        name: "troublemaker".to_string(),
    }
}

/// What a [`RecordingReplies`] was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyEvent {
    /// `defer` with the ephemeral flag
    Deferred(bool),
    /// `acknowledge` with the marker
    Acknowledged(String),
    /// `follow_up` with the rendered reply
    FollowUp {
        /// The rendered reply
        reply: RenderedReply,
        /// Whether it was private
        ephemeral: bool,
    },
}

/// A [`ReplyChannel`] that records every call.
#[derive(Debug, Default)]
pub struct RecordingReplies {
    events: Mutex<Vec<ReplyEvent>>,
    fail: bool,
}

impl RecordingReplies {
    /// A channel whose every call fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            events: Mutex::default(),
            fail: true,
        }
    }

    /// Everything recorded so far.
    pub fn events(&self) -> Vec<ReplyEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Only the follow-ups, the user-visible outcomes.
    pub fn follow_ups(&self) -> Vec<RenderedReply> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ReplyEvent::FollowUp { reply, .. } => Some(reply),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: ReplyEvent) -> Result<()> {
        if self.fail {
            return Err(Error::invalid("reply channel unavailable"));
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
        Ok(())
    }
}

#[async_trait]
impl ReplyChannel for RecordingReplies {
    async fn defer(&self, ephemeral: bool) -> Result<()> {
        self.record(ReplyEvent::Deferred(ephemeral))
    }

    async fn acknowledge(&self, marker: &str) -> Result<()> {
        self.record(ReplyEvent::Acknowledged(marker.to_string()))
    }

    async fn follow_up(&self, reply: &RenderedReply, ephemeral: bool) -> Result<()> {
        self.record(ReplyEvent::FollowUp {
            reply: reply.clone(),
            ephemeral,
        })
    }
}

/// A scripted component activation.
#[derive(Debug, Clone)]
pub struct TestActivation {
    user_id: u64,
    data: ActivationData,
}

impl TestActivation {
    /// A button click by `user_id`.
    #[must_use]
    pub fn button(user_id: u64, custom_id: &str) -> Self {
        Self {
            user_id,
            data: ActivationData::Button {
                custom_id: custom_id.to_string(),
            },
        }
    }

    /// A menu submission by `user_id`.
    #[must_use]
    pub fn menu(user_id: u64, values: &[&str]) -> Self {
        Self {
            user_id,
            data: ActivationData::Menu {
                custom_id: MENU_CUSTOM_ID.to_string(),
                values: values.iter().map(ToString::to_string).collect(),
            },
        }
    }
}

impl ControlActivation for TestActivation {
    fn user_id(&self) -> u64 {
        self.user_id
    }

    fn data(&self) -> ActivationData {
        self.data.clone()
    }
}

/// A message operation of a [`ScriptedGateway`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayOp {
    /// `post`
    Post,
    /// `acknowledge`
    Acknowledge,
    /// `edit`
    Edit,
    /// `delete`
    Delete,
}

/// What a [`ScriptedGateway`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    /// Prompt posted
    Posted {
        /// Prompt text
        content: String,
    },
    /// An activation was acknowledged
    Acknowledged,
    /// Prompt edited
    Edited {
        /// New content
        content: String,
        /// Whether controls were disabled
        disabled: bool,
    },
    /// Prompt deleted
    Deleted,
}

impl GatewayEvent {
    const fn op(&self) -> GatewayOp {
        match self {
            Self::Posted { .. } => GatewayOp::Post,
            Self::Acknowledged => GatewayOp::Acknowledge,
            Self::Edited { .. } => GatewayOp::Edit,
            Self::Deleted => GatewayOp::Delete,
        }
    }
}

#[derive(Debug)]
struct GatewayState {
    events: Mutex<Vec<GatewayEvent>>,
    sender: mpsc::UnboundedSender<TestActivation>,
    receiver: Mutex<Option<mpsc::UnboundedReceiver<TestActivation>>>,
    failing: Vec<GatewayOp>,
}

/// A [`PromptGateway`] fed from a queue of scripted activations.
///
/// The queue stays open for the gateway's lifetime, so a prompt with no matching
/// activation waits for its timeout.
#[derive(Debug, Clone)]
pub struct ScriptedGateway {
    state: Arc<GatewayState>,
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self::failing_on(&[])
    }
}

impl ScriptedGateway {
    /// A gateway whose message operations all fail.
    #[must_use]
    pub fn failing() -> Self {
        Self::failing_on(&[
            GatewayOp::Post,
            GatewayOp::Acknowledge,
            GatewayOp::Edit,
            GatewayOp::Delete,
        ])
    }

    /// A gateway where only the listed operations fail.
    #[must_use]
    pub fn failing_on(ops: &[GatewayOp]) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            state: Arc::new(GatewayState {
                events: Mutex::default(),
                sender,
                receiver: Mutex::new(Some(receiver)),
                failing: ops.to_vec(),
            }),
        }
    }

    /// Queues an activation on the prompt message.
    pub fn activate(&self, activation: TestActivation) {
        // The receiver is gone once the prompt settled; late activations are dropped.
        let _ = self.state.sender.send(activation);
    }

    /// Everything recorded so far.
    pub fn events(&self) -> Vec<GatewayEvent> {
        self.state
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, event: GatewayEvent) -> Result<()> {
        if self.state.failing.contains(&event.op()) {
            return Err(Error::invalid(format!("gateway unavailable for {:?}", event.op())));
        }
        self.state
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
        Ok(())
    }
}

#[async_trait]
impl PromptGateway for ScriptedGateway {
    type Handle = u64;
    type Activation = TestActivation;

    async fn post(&self, content: &str, _controls: &Controls) -> Result<u64> {
        self.record(GatewayEvent::Posted {
            content: content.to_string(),
        })?;
        Ok(9_000)
    }

    fn activations(&self, _handle: &u64) -> BoxStream<'static, TestActivation> {
        let receiver = self
            .state
            .receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match receiver {
            Some(receiver) => stream::unfold(receiver, |mut rx| async move {
                rx.recv().await.map(|activation| (activation, rx))
            })
            .boxed(),
            None => stream::pending::<TestActivation>().boxed(),
        }
    }

    async fn acknowledge(&self, _activation: &TestActivation) -> Result<()> {
        self.record(GatewayEvent::Acknowledged)
    }

    async fn edit(
        &self,
        _handle: &u64,
        content: &str,
        _controls: &Controls,
        disabled: bool,
    ) -> Result<()> {
        self.record(GatewayEvent::Edited {
            content: content.to_string(),
            disabled,
        })
    }

    async fn delete(&self, _handle: &u64) -> Result<()> {
        self.record(GatewayEvent::Deleted)
    }
}
