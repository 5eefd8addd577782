//! Help handler - lets the invoker pick a command from a menu and explains it.

use crate::{
    core::{
        collector::{PromptGateway, await_selection},
        prompt::{Menu, MenuOption, Prompt, Selection},
        reply::{ReplyChannel, ReplyResult, report_outcome},
        session::Session,
    },
    errors::{Error, Result},
};

const HELP_TIMEOUT_SECS: u64 = 60;

/// A registered command as listed in the help menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    /// Slash command name
    pub name: String,
    /// One-line description
    pub description: String,
}

fn help_menu(entries: &[CommandEntry]) -> Result<Menu> {
    let options = entries
        .iter()
        .map(|entry| {
            MenuOption::new(format!("/{}", entry.name), entry.name.clone())
                .description(entry.description.clone())
        })
        .collect();
    Menu::single(options)
}

/// Shows a menu of `entries` and describes the one the invoker picks.
pub async fn show_help<R, G>(
    replies: &R,
    prompts: &G,
    session: &Session,
    entries: &[CommandEntry],
) -> Result<()>
where
    R: ReplyChannel + ?Sized,
    G: PromptGateway + Clone + 'static,
{
    if entries.is_empty() {
        return Err(Error::invalid("no commands to describe"));
    }
    let menu = help_menu(entries)?;
    let prompt = Prompt::new(menu, HELP_TIMEOUT_SECS)?
        .content("Which command do you need help with?")
        .delete_on_resolve(true);

    replies.defer(true).await?;
    let picked = match await_selection(prompts, session, &prompt).await? {
        Some(Selection::Options(options)) => options
            .first()
            .and_then(|option| entries.iter().find(|e| e.name == option.value)),
        _ => None,
    };

    let outcome = match picked {
        Some(entry) => ReplyResult::information(format!("**/{}**\n{}", entry.name, entry.description)),
        None => ReplyResult::information("No command was selected"),
    };
    report_outcome(replies, &session.invoker, &outcome, true).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{
        GatewayEvent, RecordingReplies, ReplyEvent, ScriptedGateway, TestActivation, test_session,
    };

    fn entries() -> Vec<CommandEntry> {
        vec![
            CommandEntry {
                name: "warn".to_string(),
                description: "Warns a user".to_string(),
            },
            CommandEntry {
                name: "help".to_string(),
                description: "Explains a command".to_string(),
            },
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_selected_command_is_described() {
        let replies = RecordingReplies::default();
        let gateway = ScriptedGateway::default();
        let session = test_session();
        gateway.activate(TestActivation::menu(session.invoker.id, &["warn"]));

        show_help(&replies, &gateway, &session, &entries())
            .await
            .unwrap();

        assert_eq!(replies.events()[0], ReplyEvent::Deferred(true));
        let follow_ups = replies.follow_ups();
        assert_eq!(follow_ups.len(), 1);
        assert_eq!(follow_ups[0].description, "**/warn**\nWarns a user");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_reports_nothing_selected() {
        let replies = RecordingReplies::default();
        let gateway = ScriptedGateway::default();

        show_help(&replies, &gateway, &test_session(), &entries())
            .await
            .unwrap();

        assert_eq!(replies.follow_ups()[0].description, "No command was selected");
        assert!(gateway.events().contains(&GatewayEvent::Edited {
            content: "❌ Cancelled".to_string(),
            disabled: true
        }));
    }

    #[tokio::test]
    async fn test_no_entries_fails_before_sending() {
        let replies = RecordingReplies::default();
        let gateway = ScriptedGateway::default();

        let result = show_help(&replies, &gateway, &test_session(), &[]).await;

        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
        assert!(replies.events().is_empty());
        assert!(gateway.events().is_empty());
    }
}
