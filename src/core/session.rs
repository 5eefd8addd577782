//! Invocation context shared by every handler.
//!
//! A [`Session`] is built by the bot layer for exactly one interaction and
//! dropped when the handler returns. It carries only plain ids so the core
//! stays independent of the Discord library.

/// The user who triggered an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoker {
    /// Discord user id
    pub id: u64,
    /// Display name used as the embed author
    pub name: String,
    /// Avatar URL, when the user has one
    pub avatar_url: Option<String>,
}

impl Invoker {
    /// Mention markup for the invoker
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// A user an invocation acts upon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUser {
    /// Discord user id
    pub id: u64,
    /// Username at the time of the invocation
    pub name: String,
}

impl TargetUser {
    /// Mention markup for the target
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// Guild permissions handlers may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Read the guild's audit log
    ViewAuditLog,
    /// Time out and otherwise moderate members
    ModerateMembers,
}

impl Capability {
    /// Human-readable permission name as shown in the Discord client.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ViewAuditLog => "View Audit Log",
            Self::ModerateMembers => "Moderate Members",
        }
    }
}

/// Transient context for one user-triggered invocation.
#[derive(Debug, Clone)]
pub struct Session {
    /// Who triggered the interaction
    pub invoker: Invoker,
    /// Guild the interaction came from; `None` in direct messages
    pub guild_id: Option<u64>,
    /// Channel the interaction came from
    pub channel_id: u64,
    capabilities: Vec<Capability>,
}

impl Session {
    /// Creates a session with no granted capabilities.
    #[must_use]
    pub const fn new(invoker: Invoker, guild_id: Option<u64>, channel_id: u64) -> Self {
        Self {
            invoker,
            guild_id,
            channel_id,
            capabilities: Vec::new(),
        }
    }

    /// Grants `capability` to the invoker for this session.
    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// Whether the invoker holds `capability`.
    #[must_use]
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}
