//! Session extraction from a poise context.

use crate::{
    bot::Context,
    core::session::{Capability, Invoker, Session, TargetUser},
};
use poise::serenity_prelude as serenity;

/// Maps a serenity user onto the invoker shown as reply author.
#[must_use]
pub fn invoker(user: &serenity::User) -> Invoker {
    Invoker {
        id: user.id.get(),
        name: user.name.clone(),
        avatar_url: user.avatar_url(),
    }
}

/// Maps a serenity user onto a command target.
#[must_use]
pub fn target(user: &serenity::User) -> TargetUser {
    TargetUser {
        id: user.id.get(),
        name: user.name.clone(),
    }
}

fn capabilities(permissions: serenity::Permissions) -> Vec<Capability> {
    let admin = permissions.contains(serenity::Permissions::ADMINISTRATOR);
    [
        (Capability::ViewAuditLog, serenity::Permissions::VIEW_AUDIT_LOG),
        (Capability::ModerateMembers, serenity::Permissions::MODERATE_MEMBERS),
    ]
    .into_iter()
    .filter(|&(_, required)| admin || permissions.contains(required))
    .map(|(capability, _)| capability)
    .collect()
}

/// Builds the session of the current invocation.
///
/// Capabilities come from the member's resolved channel permissions, which Discord
/// sends along with every guild interaction.
pub async fn from_context(ctx: Context<'_>) -> Session {
    let permissions = ctx
        .author_member()
        .await
        .and_then(|member| member.permissions)
        .unwrap_or_else(serenity::Permissions::empty);

    capabilities(permissions).into_iter().fold(
        Session::new(
            invoker(ctx.author()),
            ctx.guild_id().map(serenity::GuildId::get),
            ctx.channel_id().get(),
        ),
        Session::with_capability,
    )
}
