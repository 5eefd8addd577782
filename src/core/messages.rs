//! Canonical message codes.
//!
//! Handlers report outcomes with short bracketed codes; the reply formatter
//! swaps a known code for its human-readable text before rendering.

/// User is on cooldown
pub const COOLDOWN: &str = "[ERR-CLD]";
/// Invoking user lacks a required permission
pub const USER_PERMISSION: &str = "[ERR-UPRM]";
/// Bot lacks a required permission
pub const BOT_PERMISSION: &str = "[ERR-BPRM]";
/// Arguments missing or malformed
pub const BAD_ARGUMENTS: &str = "[ERR-ARGS]";
/// Catch-all for failures nothing else explains
pub const UNKNOWN: &str = "[ERR-UNK]";
/// A database statement failed
pub const QUERY_FAILED: &str = "[ERR-MSQL]";
/// Slash command used outside a server
pub const NO_DIRECT_MESSAGES: &str = "[WARN-NODM]";
/// Command still under development
pub const IN_DEVELOPMENT: &str = "[INFO-DEV]";

const TABLE: &[(&str, &str)] = &[
    (COOLDOWN, "You are on cooldown!"),
    (
        USER_PERMISSION,
        "You do not have the proper permissions to execute this command.",
    ),
    (
        BOT_PERMISSION,
        "I do not have the proper permissions to execute this command.",
    ),
    (
        BAD_ARGUMENTS,
        "You have not supplied the correct parameters. Please check again.",
    ),
    (
        UNKNOWN,
        "I can't tell why an issue spawned. Please report this to the bot maintainers!",
    ),
    (QUERY_FAILED, "An error occurred while executing the query."),
    (
        NO_DIRECT_MESSAGES,
        "Sorry, but all slash commands only work in a server, not DMs.",
    ),
    (
        IN_DEVELOPMENT,
        "This command is in development. This should not be expected to work",
    ),
];

/// Looks up the canonical text for `code`, if it is a known code.
#[must_use]
pub fn canonical_text(code: &str) -> Option<&'static str> {
    TABLE
        .iter()
        .find_map(|&(known, text)| (known == code).then_some(text))
}
