//! Reply formatting - the four-way outcome convention every command reports through.
//!
//! A handler describes its outcome as a [`ReplyResult`]; [`report_outcome`] validates it,
//! renders it into a [`RenderedReply`] and delivers it through a [`ReplyChannel`] in two
//! phases: a one-line acknowledgment edit of the deferred reply, then a follow-up carrying
//! the full embed. The channel is a trait so handlers can be exercised without Discord.

use crate::{
    core::{messages, session::Invoker},
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

const BLURPLE: u32 = 0x0058_65F2;
const ORANGE: u32 = 0x00E6_7E22;
const RED: u32 = 0x00ED_4245;

/// Outcome classification driving the rendered response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// The operation completed
    Success,
    /// The operation completed with a minor problem
    Warning,
    /// The operation failed
    Error,
    /// Informational, nothing failed
    Information,
}

impl ReplyKind {
    /// Embed title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Information => "Information",
        }
    }

    /// Embed colour as `0xRRGGBB`
    #[must_use]
    pub const fn color(self) -> u32 {
        match self {
            Self::Success | Self::Information => BLURPLE,
            Self::Warning => ORANGE,
            Self::Error => RED,
        }
    }

    /// Embed footer
    #[must_use]
    pub const fn footer(self) -> &'static str {
        match self {
            Self::Success => "The operation was completed successfully with no errors",
            Self::Warning => "The operation was completed successfully with a minor error",
            Self::Error => "The operation failed to complete due to an error",
            Self::Information => "The operation is pending completion",
        }
    }

    /// One-line marker written into the deferred reply before the follow-up
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Success => "🔓 [CMD-OK]",
            Self::Warning => "🔐 [CMD-WARN]",
            Self::Error => "🔒 [CMD-ERROR]",
            Self::Information => "🔏 [CMD-INFO]",
        }
    }
}

impl TryFrom<u8> for ReplyKind {
    type Error = Error;

    /// Numeric kinds: 1 success, 2 warning, 3 error, 4 information.
    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Success),
            2 => Ok(Self::Warning),
            3 => Ok(Self::Error),
            4 => Ok(Self::Information),
            other => Err(Error::invalid(format!(
                "reply kind must be between 1 and 4, got {other}"
            ))),
        }
    }
}

impl FromStr for ReplyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "information" | "info" => Ok(Self::Information),
            other => Err(Error::invalid(format!("unknown reply kind `{other}`"))),
        }
    }
}

impl fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// An extra name/value pair shown beneath the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyField {
    /// Field heading
    pub name: String,
    /// Field body
    pub value: String,
    /// Whether Discord may lay the field out side by side with others
    pub inline: bool,
}

/// A handler outcome: kind, message code and optional elaboration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyResult {
    kind: ReplyKind,
    code: String,
    elaboration: String,
    fields: Vec<ReplyField>,
}

impl ReplyResult {
    /// Builds a result of any kind.
    pub fn new(kind: ReplyKind, code: impl Into<String>, elaboration: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            elaboration: elaboration.into(),
            fields: Vec::new(),
        }
    }

    /// A success outcome.
    pub fn success(code: impl Into<String>) -> Self {
        Self::new(ReplyKind::Success, code, String::new())
    }

    /// A warning outcome; `expected` clarifies what was expected instead.
    pub fn warning(code: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::new(ReplyKind::Warning, code, expected)
    }

    /// An error outcome; `expected` clarifies what was expected instead.
    pub fn error(code: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::new(ReplyKind::Error, code, expected)
    }

    /// An informational outcome.
    pub fn information(code: impl Into<String>) -> Self {
        Self::new(ReplyKind::Information, code, String::new())
    }

    /// Appends an embed field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(ReplyField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// The outcome kind
    #[must_use]
    pub const fn kind(&self) -> ReplyKind {
        self.kind
    }

    /// The message code as given by the handler
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The elaboration as given by the handler
    #[must_use]
    pub fn elaboration(&self) -> &str {
        &self.elaboration
    }

    /// Resolves the description text.
    ///
    /// Known codes become their canonical text, unknown codes are shown verbatim; an
    /// unknown code on an error gets an explanation instead. Warning and error
    /// elaborations follow on their own quoted line.
    #[must_use]
    pub fn description(&self) -> String {
        let resolved = match (messages::canonical_text(&self.code), self.kind) {
            (Some(text), _) => text.to_string(),
            (None, ReplyKind::Error) => format!(
                "I don't understand the error \"{}\". Please report this to the bot maintainers!",
                self.code
            ),
            (None, _) => self.code.clone(),
        };

        match self.kind {
            ReplyKind::Warning | ReplyKind::Error if !self.elaboration.is_empty() => {
                format!("{resolved}\n> {}", self.elaboration)
            }
            _ => resolved,
        }
    }

    /// Validates the result and renders it for `invoker`.
    pub fn render(&self, invoker: &Invoker) -> Result<RenderedReply> {
        if self.code.trim().is_empty() {
            return Err(Error::invalid(format!(
                "{} reply needs a message code",
                self.kind
            )));
        }

        Ok(RenderedReply {
            title: self.kind.title().to_string(),
            color: self.kind.color(),
            description: self.description(),
            footer: self.kind.footer().to_string(),
            author: Some(invoker.clone()),
            fields: self.fields.clone(),
            timestamp: Utc::now(),
        })
    }
}

/// A fully resolved embed, independent of the Discord library.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReply {
    /// Embed title
    pub title: String,
    /// Embed colour
    pub color: u32,
    /// Embed body
    pub description: String,
    /// Embed footer
    pub footer: String,
    /// Embed author, if attributed to a user
    pub author: Option<Invoker>,
    /// Extra fields
    pub fields: Vec<ReplyField>,
    /// Render time
    pub timestamp: DateTime<Utc>,
}

impl RenderedReply {
    /// Embed posted to the error channel for failures the bot cannot surface otherwise.
    #[must_use]
    pub fn console(message: &str, source: &str) -> Self {
        Self {
            title: "Message to Console".to_string(),
            color: RED,
            description: message.to_string(),
            footer: format!("Source: {source}"),
            author: None,
            fields: Vec::new(),
            timestamp: Utc::now(),
        }
    }
}

/// Two-phase reply surface of one interaction.
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    /// Acknowledges the interaction with a placeholder so the platform does not time out.
    async fn defer(&self, ephemeral: bool) -> Result<()>;

    /// Replaces the deferred placeholder with a one-line marker.
    async fn acknowledge(&self, marker: &str) -> Result<()>;

    /// Sends the rendered reply as a follow-up.
    async fn follow_up(&self, reply: &RenderedReply, ephemeral: bool) -> Result<()>;
}

/// Validates, renders and delivers `result`.
///
/// Sends exactly one acknowledgment edit and one follow-up. Nothing is sent when
/// validation fails, and delivery errors are returned as-is.
pub async fn report_outcome<C>(
    channel: &C,
    invoker: &Invoker,
    result: &ReplyResult,
    ephemeral: bool,
) -> Result<()>
where
    C: ReplyChannel + ?Sized,
{
    let rendered = result.render(invoker)?;
    tracing::debug!(kind = %result.kind(), code = result.code(), ephemeral, "Reporting outcome");

    channel.acknowledge(result.kind().marker()).await?;
    channel.follow_up(&rendered, ephemeral).await
}
