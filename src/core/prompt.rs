//! Prompt controls and lifecycle.
//!
//! A [`Prompt`] is a message carrying either a select [`Menu`] or a [`ButtonSet`].
//! Both are validated when built, so a prompt that reaches the collector is always
//! sendable: non-empty, within Discord's component limits, with unique ids and sane
//! selection bounds.

use crate::errors::{Error, Result};
use std::{collections::HashSet, time::Duration};

/// Custom id of the select menu on a prompt message.
pub const MENU_CUSTOM_ID: &str = "await-menu";
/// Text shown when the caller gives no prompt text.
pub const DEFAULT_PROMPT: &str = "Please select an option";
/// Most options a menu can carry.
pub const MAX_MENU_OPTIONS: usize = 25;
/// Most buttons a single action row can carry.
pub const BUTTONS_PER_ROW: usize = 5;
/// Most buttons a prompt can carry (five full rows).
pub const MAX_BUTTONS: usize = BUTTONS_PER_ROW * 5;

const MENU_GRACE: Duration = Duration::from_millis(1500);
const BUTTON_GRACE: Duration = Duration::from_secs(5);

/// One entry of a select menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    /// Text shown to the user
    pub label: String,
    /// Value reported back when selected
    pub value: String,
    /// Optional secondary line
    pub description: Option<String>,
    /// Preselected when the menu is shown
    pub default: bool,
}

impl MenuOption {
    /// Creates an option with no description.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
            default: false,
        }
    }

    /// Sets the secondary line.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// How many options the user must pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionBounds {
    min: u8,
    max: u8,
}

impl SelectionBounds {
    /// Fewest options the user must pick
    #[must_use]
    pub const fn min(self) -> u8 {
        self.min
    }

    /// Most options the user may pick
    #[must_use]
    pub const fn max(self) -> u8 {
        self.max
    }

    fn admits(self, count: usize) -> bool {
        (usize::from(self.min)..=usize::from(self.max)).contains(&count)
    }
}

/// A validated select menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    options: Vec<MenuOption>,
    bounds: SelectionBounds,
}

impl Menu {
    /// Builds a menu letting the user pick between `min` and `max` of `options`.
    pub fn new(options: Vec<MenuOption>, min: u8, max: u8) -> Result<Self> {
        if options.is_empty() {
            return Err(Error::invalid("a menu needs at least one option"));
        }
        if options.len() > MAX_MENU_OPTIONS {
            return Err(Error::invalid(format!(
                "a menu holds at most {MAX_MENU_OPTIONS} options, got {}",
                options.len()
            )));
        }
        if max == 0 || min > max || usize::from(max) > options.len() {
            return Err(Error::invalid(format!(
                "selection bounds [{min}, {max}] do not fit {} options",
                options.len()
            )));
        }
        ensure_unique(options.iter().map(|o| o.value.as_str()), "option value")?;

        Ok(Self {
            options,
            bounds: SelectionBounds { min, max },
        })
    }

    /// Builds a menu where exactly one option must be picked.
    pub fn single(options: Vec<MenuOption>) -> Result<Self> {
        Self::new(options, 1, 1)
    }

    /// The options in display order
    #[must_use]
    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    /// The selection bounds
    #[must_use]
    pub const fn bounds(&self) -> SelectionBounds {
        self.bounds
    }

    fn resolve(&self, values: &[String]) -> Option<Vec<MenuOption>> {
        if !self.bounds.admits(values.len()) {
            return None;
        }
        values
            .iter()
            .map(|value| self.options.iter().find(|o| &o.value == value).cloned())
            .collect()
    }
}

/// Visual style of a prompt button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonTone {
    /// Blurple
    #[default]
    Primary,
    /// Grey
    Secondary,
    /// Green
    Success,
    /// Red
    Danger,
}

/// One button of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptButton {
    /// Id reported back when clicked
    pub custom_id: String,
    /// Text on the button
    pub label: String,
    /// Style
    pub tone: ButtonTone,
}

impl PromptButton {
    /// Creates a primary button.
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            tone: ButtonTone::Primary,
        }
    }

    /// Sets the style.
    #[must_use]
    pub const fn tone(mut self, tone: ButtonTone) -> Self {
        self.tone = tone;
        self
    }
}

/// A validated set of buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSet {
    buttons: Vec<PromptButton>,
}

impl ButtonSet {
    /// Builds a button set.
    pub fn new(buttons: Vec<PromptButton>) -> Result<Self> {
        if buttons.is_empty() {
            return Err(Error::invalid("a prompt needs at least one button"));
        }
        if buttons.len() > MAX_BUTTONS {
            return Err(Error::invalid(format!(
                "a prompt holds at most {MAX_BUTTONS} buttons, got {}",
                buttons.len()
            )));
        }
        ensure_unique(buttons.iter().map(|b| b.custom_id.as_str()), "button id")?;
        Ok(Self { buttons })
    }

    /// The buttons in display order
    #[must_use]
    pub fn buttons(&self) -> &[PromptButton] {
        &self.buttons
    }

    fn resolve(&self, custom_id: &str) -> Option<PromptButton> {
        self.buttons
            .iter()
            .find(|b| b.custom_id == custom_id)
            .cloned()
    }
}

fn ensure_unique<'a>(ids: impl Iterator<Item = &'a str>, what: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(Error::invalid(format!("{what} must not be empty")));
        }
        if !seen.insert(id) {
            return Err(Error::invalid(format!("duplicate {what} `{id}`")));
        }
    }
    Ok(())
}

/// The controls attached to a prompt message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Controls {
    /// A select menu
    Menu(Menu),
    /// A set of buttons
    Buttons(ButtonSet),
}

impl Controls {
    /// How long a resolved prompt stays visible before deletion.
    #[must_use]
    pub const fn grace_period(&self) -> Duration {
        match self {
            Self::Menu(_) => MENU_GRACE,
            Self::Buttons(_) => BUTTON_GRACE,
        }
    }

    /// Content a prompt shows once it timed out.
    #[must_use]
    pub const fn cancelled_text(&self) -> &'static str {
        match self {
            Self::Menu(_) => "❌ Cancelled",
            Self::Buttons(_) => "🔒 Cancelled",
        }
    }

    /// Maps an activation onto the controls it selected, if all of them belong to this set.
    #[must_use]
    pub fn resolve(&self, activation: &ActivationData) -> Option<Selection> {
        match (self, activation) {
            (Self::Menu(menu), ActivationData::Menu { custom_id, values })
                if custom_id == MENU_CUSTOM_ID =>
            {
                menu.resolve(values).map(Selection::Options)
            }
            (Self::Buttons(set), ActivationData::Button { custom_id }) => {
                set.resolve(custom_id).map(Selection::Button)
            }
            _ => None,
        }
    }
}

impl From<Menu> for Controls {
    fn from(menu: Menu) -> Self {
        Self::Menu(menu)
    }
}

impl From<ButtonSet> for Controls {
    fn from(buttons: ButtonSet) -> Self {
        Self::Buttons(buttons)
    }
}

/// What a component activation carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationData {
    /// A button click
    Button {
        /// Id of the clicked button
        custom_id: String,
    },
    /// A menu submission
    Menu {
        /// Id of the menu
        custom_id: String,
        /// Submitted option values
        values: Vec<String>,
    },
    /// Any other component kind
    Other,
}

/// The controls a user picked, cloned from the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Menu options in submission order
    Options(Vec<MenuOption>),
    /// The clicked button
    Button(PromptButton),
}

impl Selection {
    /// The first selected menu value or the clicked button id.
    #[must_use]
    pub fn first_value(&self) -> Option<&str> {
        match self {
            Self::Options(options) => options.first().map(|o| o.value.as_str()),
            Self::Button(button) => Some(button.custom_id.as_str()),
        }
    }
}

/// A request to present controls and wait for one answer.
#[derive(Debug, Clone)]
pub struct Prompt {
    controls: Controls,
    timeout: Duration,
    content: Option<String>,
    delete_on_resolve: bool,
}

impl Prompt {
    /// Creates a prompt valid for `timeout_secs` seconds.
    pub fn new(controls: impl Into<Controls>, timeout_secs: u64) -> Result<Self> {
        if timeout_secs == 0 {
            return Err(Error::invalid("prompt timeout must be greater than zero"));
        }
        Ok(Self {
            controls: controls.into(),
            timeout: Duration::from_secs(timeout_secs),
            content: None,
            delete_on_resolve: false,
        })
    }

    /// Sets the text shown above the controls.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Deletes the message after its grace period once the user answered.
    #[must_use]
    pub const fn delete_on_resolve(mut self, delete: bool) -> Self {
        self.delete_on_resolve = delete;
        self
    }

    /// The attached controls
    #[must_use]
    pub const fn controls(&self) -> &Controls {
        &self.controls
    }

    /// How long the prompt waits
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Text shown above the controls
    #[must_use]
    pub fn text(&self) -> &str {
        self.content
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_PROMPT)
    }

    /// Whether a resolved prompt gets deleted
    #[must_use]
    pub const fn deletes_on_resolve(&self) -> bool {
        self.delete_on_resolve
    }
}

/// Lifecycle of a prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    /// Sent, waiting for an answer
    Pending,
    /// The invoker answered in time
    Resolved,
    /// Nobody qualifying answered in time
    TimedOut,
    /// Controls disabled after a timeout, or after an answer that keeps the message
    Disabled,
    /// Controls disabled after an answer, deletion scheduled
    DisabledPendingDeletion,
    /// Message removed
    Deleted,
}

impl PromptState {
    /// Moves to `next`, rejecting transitions the lifecycle does not allow.
    pub fn advance(self, next: Self) -> Result<Self> {
        let allowed = matches!(
            (self, next),
            (Self::Pending, Self::Resolved | Self::TimedOut)
                | (Self::Resolved, Self::Disabled | Self::DisabledPendingDeletion)
                | (Self::TimedOut, Self::Disabled)
                | (Self::DisabledPendingDeletion, Self::Deleted)
        );
        if allowed {
            Ok(next)
        } else {
            Err(Error::invalid(format!(
                "prompt cannot move from {self:?} to {next:?}"
            )))
        }
    }

    /// Whether no further transition is possible
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Disabled | Self::Deleted)
    }
}
