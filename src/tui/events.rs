//! Input event translation.
//!
//! # Overview
//!
//! [`EventHandler`] turns raw [`InputEvent`]s from a surface into
//! [`PickerEvent`]s the picking loop understands:
//! - Keys bound in the active [`KeyBindings`] become actions
//! - Unbound printable characters extend the search query
//! - Resizes are passed through
//! - Everything else is ignored

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::Action;
use super::keybindings::{KeyBindings, KeybindingProfile};
use super::surface::InputEvent;

/// What the picking loop should do with an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    /// Perform a bound action.
    Action(Action),
    /// Append a character to the query.
    Input(char),
    /// The terminal now has `(columns, rows)`.
    Resize(u16, u16),
    /// Nothing to do.
    Ignored,
}

/// Maps terminal input to picker events using a keybinding set.
#[derive(Debug, Clone, Default)]
pub struct EventHandler {
    bindings: KeyBindings,
}

impl EventHandler {
    /// Create a handler with the default (universal) profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler for a built-in profile.
    #[must_use]
    pub fn with_profile(profile: KeybindingProfile) -> Self {
        Self::with_bindings(KeyBindings::from_profile(profile))
    }

    /// Create a handler with an explicit binding set.
    #[must_use]
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    /// The active bindings.
    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Translate one input event.
    #[must_use]
    pub fn translate(&self, event: &InputEvent) -> PickerEvent {
        match event {
            InputEvent::Resize(columns, rows) => PickerEvent::Resize(*columns, *rows),
            InputEvent::Key(key) => self.translate_key(key),
        }
    }

    fn translate_key(&self, key: &KeyEvent) -> PickerEvent {
        if key.kind == KeyEventKind::Release {
            return PickerEvent::Ignored;
        }
        if let Some(action) = self.bindings.resolve(key) {
            log::trace!("Key {} -> {}", KeyBindings::format_key(key), action);
            return PickerEvent::Action(action);
        }
        match printable_char(key) {
            Some(c) => PickerEvent::Input(c),
            None => {
                log::trace!("Ignoring unbound key {}", KeyBindings::format_key(key));
                PickerEvent::Ignored
            }
        }
    }
}

/// The character a key types into the query, if any.
///
/// Only plain or shifted characters count; chords with Ctrl or Alt and
/// control characters never reach the query.
fn printable_char(key: &KeyEvent) -> Option<char> {
    let KeyCode::Char(c) = key.code else {
        return None;
    };
    let modifiers = key.modifiers.difference(KeyModifiers::SHIFT);
    if !modifiers.is_empty() || c.is_control() {
        return None;
    }
    Some(c)
}
