//! Moderation handlers - issue, list and clear warnings.
//!
//! Every handler follows the same protocol: defer the interaction, check the invoker's
//! capability, validate arguments, perform one persistence operation and report exactly
//! one outcome. Permission denials are posted publicly so they stay visible in the
//! channel.

use crate::{
    core::{
        collector::{PromptGateway, await_selection},
        messages,
        prompt::{ButtonSet, ButtonTone, Prompt, PromptButton},
        reply::{ReplyChannel, ReplyResult, report_outcome},
        session::{Capability, Session, TargetUser},
        warning::{self, NewWarning},
    },
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, DbErr};

/// Most warnings listed in one reply (Discord caps embeds at 25 fields).
const MAX_LISTED: usize = 25;
/// Longest accepted warning reason; an embed field value holds at most 1024 characters.
pub const MAX_REASON_CHARS: usize = 1024;
const MAX_FIELD_VALUE_CHARS: usize = 1024;
/// Characters left for fields once title, description, footer and author are counted
/// against the 6000 character embed total.
const FIELD_BUDGET_CHARS: usize = 5000;
const CONFIRM_ID: &str = "clear-confirm";
const CANCEL_ID: &str = "clear-cancel";
const CONFIRM_TIMEOUT_SECS: u64 = 30;

/// Defers, then checks the guild and `capability`. Reports and returns `None` on failure.
///
/// Capabilities only exist inside a guild, so a direct message is turned away before
/// any permission check.
async fn admit<R>(replies: &R, session: &Session, capability: Capability) -> Result<Option<u64>>
where
    R: ReplyChannel + ?Sized,
{
    replies.defer(false).await?;

    let Some(guild_id) = session.guild_id else {
        let no_dm = ReplyResult::warning(messages::NO_DIRECT_MESSAGES, "Run this command in a server");
        report_outcome(replies, &session.invoker, &no_dm, true).await?;
        return Ok(None);
    };

    if !session.has(capability) {
        let denied = ReplyResult::error(
            messages::USER_PERMISSION,
            format!("Missing: `{}`", capability.label()),
        );
        report_outcome(replies, &session.invoker, &denied, false).await?;
        return Ok(None);
    }

    Ok(Some(guild_id))
}

/// Cuts `text` to at most `max` characters, marking the cut with an ellipsis.
fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

fn persistence_failure(err: &DbErr) -> ReplyResult {
    ReplyResult::error(
        messages::QUERY_FAILED,
        format!("[{}] {err}", warning::fault_code(err)),
    )
}

/// Issues a warning to `target`.
pub async fn warn_user<R>(
    db: &DatabaseConnection,
    replies: &R,
    session: &Session,
    target: &TargetUser,
    reason: &str,
) -> Result<()>
where
    R: ReplyChannel + ?Sized,
{
    let Some(guild_id) = admit(replies, session, Capability::ViewAuditLog).await? else {
        return Ok(());
    };

    let reason = reason.trim();
    if reason.is_empty() {
        let missing = ReplyResult::error(messages::BAD_ARGUMENTS, "Missing: `reason`");
        return report_outcome(replies, &session.invoker, &missing, true).await;
    }
    if reason.chars().count() > MAX_REASON_CHARS {
        let too_long = ReplyResult::error(
            messages::BAD_ARGUMENTS,
            format!("`reason` is longer than {MAX_REASON_CHARS} characters"),
        );
        return report_outcome(replies, &session.invoker, &too_long, true).await;
    }

    let new = NewWarning {
        guild_id,
        user_id: target.id,
        reason: reason.to_string(),
        moderator_id: session.invoker.id,
    };
    let (outcome, ephemeral) = match warning::record_warning(db, new).await {
        Ok(0) => (
            ReplyResult::error(
                messages::QUERY_FAILED,
                "Failed to warn user for an unknown reason",
            ),
            true,
        ),
        Ok(_) => (
            ReplyResult::success(format!(
                "A warning has been issued to {} (ID: {})",
                target.mention(),
                target.id
            ))
            .with_field("Reason", reason, true)
            .with_field(
                "Overseer",
                format!("{} (ID: {})", session.invoker.mention(), session.invoker.id),
                true,
            ),
            false,
        ),
        Err(e) => {
            tracing::error!(user_id = target.id, "Failed to record warning: {e}");
            (persistence_failure(&e), false)
        }
    };

    report_outcome(replies, &session.invoker, &outcome, ephemeral).await
}

/// Lists the warnings `target` has received in this guild.
pub async fn list_warnings<R>(
    db: &DatabaseConnection,
    replies: &R,
    session: &Session,
    target: &TargetUser,
) -> Result<()>
where
    R: ReplyChannel + ?Sized,
{
    let Some(guild_id) = admit(replies, session, Capability::ViewAuditLog).await? else {
        return Ok(());
    };

    let warnings = match warning::warnings_for_user(db, guild_id, target.id).await {
        Ok(warnings) => warnings,
        Err(Error::Database(e)) => {
            let failed = persistence_failure(&e);
            return report_outcome(replies, &session.invoker, &failed, false).await;
        }
        Err(e) => return Err(e),
    };

    let outcome = if warnings.is_empty() {
        ReplyResult::information(format!("{} has no warnings", target.mention()))
    } else {
        let mut fields = Vec::new();
        let mut used = 0;
        for w in warnings.iter().take(MAX_LISTED) {
            let name = format!("{} - {}", w.id, w.created_at.format("%Y-%m-%d %H:%M UTC"));
            let moderator = format!("\nby <@{}>", w.moderator_id);
            let reason = clip(
                &w.reason,
                MAX_FIELD_VALUE_CHARS.saturating_sub(moderator.chars().count()),
            );
            let value = format!("{reason}{moderator}");
            let size = name.chars().count() + value.chars().count();
            if used + size > FIELD_BUDGET_CHARS {
                break;
            }
            used += size;
            fields.push((name, value));
        }

        let truncated = if fields.len() < warnings.len() {
            format!(" (showing the latest {})", fields.len())
        } else {
            String::new()
        };
        let summary = format!(
            "{} has {} warning{}{truncated}",
            target.mention(),
            warnings.len(),
            if warnings.len() == 1 { "" } else { "s" }
        );
        fields
            .into_iter()
            .fold(ReplyResult::information(summary), |reply, (name, value)| {
                reply.with_field(name, value, false)
            })
    };

    report_outcome(replies, &session.invoker, &outcome, false).await
}

/// Asks for confirmation, then removes every warning of `target` in this guild.
pub async fn clear_warnings<R, G>(
    db: &DatabaseConnection,
    replies: &R,
    prompts: &G,
    session: &Session,
    target: &TargetUser,
) -> Result<()>
where
    R: ReplyChannel + ?Sized,
    G: PromptGateway + Clone + 'static,
{
    let Some(guild_id) = admit(replies, session, Capability::ModerateMembers).await? else {
        return Ok(());
    };

    let buttons = ButtonSet::new(vec![
        PromptButton::new(CONFIRM_ID, "Clear warnings").tone(ButtonTone::Danger),
        PromptButton::new(CANCEL_ID, "Keep them").tone(ButtonTone::Secondary),
    ])?;
    let prompt = Prompt::new(buttons, CONFIRM_TIMEOUT_SECS)?
        .content(format!(
            "Clear every warning of {} in this server?",
            target.mention()
        ))
        .delete_on_resolve(true);

    let selection = await_selection(prompts, session, &prompt).await?;
    if selection.as_ref().and_then(|s| s.first_value()) != Some(CONFIRM_ID) {
        let kept = ReplyResult::information(format!(
            "No warnings were cleared for {}",
            target.mention()
        ));
        return report_outcome(replies, &session.invoker, &kept, true).await;
    }

    let outcome = match warning::clear_warnings(db, guild_id, target.id).await {
        Ok(0) => ReplyResult::information(format!("{} had no warnings to clear", target.mention())),
        Ok(cleared) => ReplyResult::success(format!(
            "Cleared {cleared} warning{} of {} (ID: {})",
            if cleared == 1 { "" } else { "s" },
            target.mention(),
            target.id
        )),
        Err(e) => {
            tracing::error!(user_id = target.id, "Failed to clear warnings: {e}");
            persistence_failure(&e)
        }
    };

    report_outcome(replies, &session.invoker, &outcome, false).await
}
