//! Core logic - framework-agnostic reply formatting, prompt collection and moderation.
//!
//! Nothing in here depends on the Discord library; the bot layer plugs in through the
//! [`reply::ReplyChannel`] and [`collector::PromptGateway`] traits.

/// Interactive collector: await one answer to a prompt
pub mod collector;
/// Help handler
pub mod help;
/// Canonical message-code table
pub mod messages;
/// Moderation handlers
pub mod moderation;
/// Prompt controls and lifecycle
pub mod prompt;
/// Reply formatting and delivery
pub mod reply;
/// Invocation context
pub mod session;
/// Warning persistence
pub mod warning;
