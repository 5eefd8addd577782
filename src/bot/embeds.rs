//! Rendered replies as serenity embeds.

use crate::core::reply::RenderedReply;
use poise::serenity_prelude as serenity;

/// Converts a rendered reply into an embed.
#[must_use]
pub fn to_embed(reply: &RenderedReply) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(&reply.title)
        .colour(reply.color)
        .description(&reply.description)
        .footer(serenity::CreateEmbedFooter::new(&reply.footer));

    if let Some(author) = &reply.author {
        let mut embed_author = serenity::CreateEmbedAuthor::new(&author.name);
        if let Some(avatar) = &author.avatar_url {
            embed_author = embed_author.icon_url(avatar);
        }
        embed = embed.author(embed_author);
    }

    if let Ok(timestamp) = serenity::Timestamp::from_unix_timestamp(reply.timestamp.timestamp()) {
        embed = embed.timestamp(timestamp);
    }

    embed.fields(
        reply
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.value.clone(), field.inline)),
    )
}
