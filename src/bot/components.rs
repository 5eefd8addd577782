//! Prompt controls as serenity components.
//!
//! Buttons are laid out five to a row; a menu always occupies a single row.

use crate::core::prompt::{
    BUTTONS_PER_ROW, ButtonTone, Controls, MENU_CUSTOM_ID, MenuOption, PromptButton,
};
use poise::serenity_prelude as serenity;

fn menu_option(option: &MenuOption) -> serenity::CreateSelectMenuOption {
    let mut built = serenity::CreateSelectMenuOption::new(&option.label, &option.value)
        .default_selection(option.default);
    if let Some(description) = &option.description {
        built = built.description(description);
    }
    built
}

const fn style(tone: ButtonTone) -> serenity::ButtonStyle {
    match tone {
        ButtonTone::Primary => serenity::ButtonStyle::Primary,
        ButtonTone::Secondary => serenity::ButtonStyle::Secondary,
        ButtonTone::Success => serenity::ButtonStyle::Success,
        ButtonTone::Danger => serenity::ButtonStyle::Danger,
    }
}

fn button(button: &PromptButton, disabled: bool) -> serenity::CreateButton {
    serenity::CreateButton::new(&button.custom_id)
        .label(&button.label)
        .style(style(button.tone))
        .disabled(disabled)
}

/// Builds the action rows for `controls`, optionally disabled.
#[must_use]
pub fn action_rows(controls: &Controls, disabled: bool) -> Vec<serenity::CreateActionRow> {
    match controls {
        Controls::Menu(menu) => {
            let kind = serenity::CreateSelectMenuKind::String {
                options: menu.options().iter().map(menu_option).collect(),
            };
            let select = serenity::CreateSelectMenu::new(MENU_CUSTOM_ID, kind)
                .min_values(menu.bounds().min())
                .max_values(menu.bounds().max())
                .disabled(disabled);
            vec![serenity::CreateActionRow::SelectMenu(select)]
        }
        Controls::Buttons(set) => set
            .buttons()
            .chunks(BUTTONS_PER_ROW)
            .map(|row| {
                serenity::CreateActionRow::Buttons(
                    row.iter().map(|b| button(b, disabled)).collect(),
                )
            })
            .collect(),
    }
}
