//! Keybinding configuration for the picker.
//!
//! This module maps terminal key events to picker [`Action`]s. Two profiles
//! are provided, and either can be extended with custom key mappings from
//! the configuration file.
//!
//! # Profiles
//!
//! - [`KeybindingProfile::Universal`]: arrow keys plus single-letter
//!   shortcuts (`k`/`w` up, `j`/`s` down, `l`/`d`/Space confirm, `q` abort).
//!   This is the default.
//! - [`KeybindingProfile::Standard`]: arrow and named keys only, so every
//!   letter can be typed into the search query.
//!
//! Keys that resolve to no action are not lost: printable characters are
//! appended to the search query by the event handler.
//!
//! # Example
//!
//! ```
//! use listpick::tui::keybindings::{KeyBindings, KeybindingProfile};
//! use listpick::tui::Action;
//! use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
//!
//! let bindings = KeyBindings::from_profile(KeybindingProfile::Universal);
//!
//! let j_key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
//! let down_key = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
//!
//! assert_eq!(bindings.resolve(&j_key), Some(Action::NavigateDown));
//! assert_eq!(bindings.resolve(&down_key), Some(Action::NavigateDown));
//! ```

use std::collections::HashMap;

use clap::ValueEnum;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::Action;

/// Minimum similarity for an action name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Keybinding profile presets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Hash,
    ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum KeybindingProfile {
    /// Arrow keys plus single-letter shortcuts.
    ///
    /// Letters bound to actions cannot be typed into the search query.
    #[default]
    Universal,

    /// Arrow and named keys only.
    ///
    /// Every printable character goes to the search query.
    Standard,
}

impl std::fmt::Display for KeybindingProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Universal => "universal",
            Self::Standard => "standard",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for KeybindingProfile {
    type Err = KeybindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "universal" | "default" => Ok(Self::Universal),
            "standard" | "arrows" | "arrow" => Ok(Self::Standard),
            _ => Err(KeybindingError::InvalidProfile(s.to_string())),
        }
    }
}

/// Error type for keybinding operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeybindingError {
    /// Invalid profile name.
    #[error("Unknown keybinding profile: '{0}'. Valid profiles: universal, standard")]
    InvalidProfile(String),

    /// Invalid key specification.
    #[error("Invalid key specification: '{0}'. Examples: 'j', 'Ctrl+c', 'Down', 'Space', 'F1'")]
    InvalidKeySpec(String),

    /// Invalid action name.
    #[error("Unknown action: '{name}'.{}", suggestion_hint(.suggestion))]
    InvalidAction {
        /// The name that was given.
        name: String,
        /// The closest valid action name, if any is close enough.
        suggestion: Option<String>,
    },
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" Did you mean '{name}'?"),
        None => format!(" Valid actions: {}", Action::all_names().join(", ")),
    }
}

/// Keybinding configuration mapping actions to key events.
///
/// Multiple keys can trigger the same action. A key is bound to at most one
/// action.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// The profile these bindings are based on.
    profile: KeybindingProfile,

    /// Mapping from actions to the key events that trigger them.
    action_keys: HashMap<Action, Vec<KeyEvent>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_profile(KeybindingProfile::Universal)
    }
}

impl KeyBindings {
    /// Create keybindings from a specific profile.
    #[must_use]
    pub fn from_profile(profile: KeybindingProfile) -> Self {
        let action_keys = match profile {
            KeybindingProfile::Universal => Self::universal_bindings(),
            KeybindingProfile::Standard => Self::standard_bindings(),
        };

        Self {
            profile,
            action_keys,
        }
    }

    /// Get the keybinding profile.
    #[must_use]
    pub fn profile(&self) -> KeybindingProfile {
        self.profile
    }

    /// Resolve a key event to an action.
    ///
    /// Returns `None` for unbound keys and for key release events (some
    /// terminals send these). Repeats of a held key resolve like presses.
    ///
    /// # Example
    ///
    /// ```
    /// use listpick::tui::keybindings::KeyBindings;
    /// use listpick::tui::Action;
    /// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    ///
    /// let bindings = KeyBindings::default();
    /// let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
    ///
    /// assert_eq!(bindings.resolve(&key), Some(Action::Abort));
    /// ```
    #[must_use]
    pub fn resolve(&self, key: &KeyEvent) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        self.action_keys
            .iter()
            .find(|(_, keys)| keys.iter().any(|k| Self::key_matches(k, key)))
            .map(|(action, _)| *action)
    }

    /// Check if a key event matches a target key event.
    ///
    /// Matches code and modifiers, ignoring kind and state.
    fn key_matches(target: &KeyEvent, actual: &KeyEvent) -> bool {
        target.code == actual.code && target.modifiers == actual.modifiers
    }

    /// Get the keys bound to a specific action.
    ///
    /// Returns an empty slice if the action is not bound.
    #[must_use]
    pub fn keys_for_action(&self, action: &Action) -> &[KeyEvent] {
        self.action_keys
            .get(action)
            .map_or(&[], |keys| keys.as_slice())
    }

    /// Human-readable string for the first key bound to an action.
    #[must_use]
    pub fn key_hint(&self, action: &Action) -> String {
        self.keys_for_action(action)
            .first()
            .map_or_else(String::new, Self::format_key)
    }

    /// Format a key event as a human-readable string.
    #[must_use]
    pub fn format_key(key: &KeyEvent) -> String {
        let mut parts = Vec::new();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt");
        }
        if key.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift");
        }

        let key_name = match key.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::PageUp => "PgUp".to_string(),
            KeyCode::PageDown => "PgDn".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        };

        if parts.is_empty() {
            key_name
        } else {
            parts.push(&key_name);
            parts.join("+")
        }
    }

    /// Parse a key specification string into a KeyEvent.
    ///
    /// Supports formats like:
    /// - Simple keys: "j", "k", "Space", "Enter", "Esc"
    /// - Arrow keys: "Up", "Down", "Left", "Right"
    /// - Special keys: "PageUp", "PgDn", "Home", "End", "Backspace"
    /// - Function keys: "F1" to "F12"
    /// - With modifiers: "Ctrl+c", "Alt+j", "Ctrl+Shift+a"
    ///
    /// # Errors
    ///
    /// Returns `KeybindingError::InvalidKeySpec` if the key specification
    /// cannot be parsed.
    ///
    /// # Example
    ///
    /// ```
    /// use listpick::tui::keybindings::KeyBindings;
    /// use crossterm::event::{KeyCode, KeyModifiers};
    ///
    /// let key = KeyBindings::parse_key("Ctrl+n").unwrap();
    /// assert_eq!(key.code, KeyCode::Char('n'));
    /// assert_eq!(key.modifiers, KeyModifiers::CONTROL);
    /// ```
    pub fn parse_key(spec: &str) -> Result<KeyEvent, KeybindingError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(KeybindingError::InvalidKeySpec(spec.to_string()));
        }

        // Split on '+' but handle edge case of '+' key itself
        let parts: Vec<&str> = if spec == "+" {
            vec!["+"]
        } else {
            spec.split('+').map(str::trim).collect()
        };

        let mut modifiers = KeyModifiers::NONE;
        let mut key_part = None;

        for (i, part) in parts.iter().enumerate() {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" | "meta" | "option" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => {
                    if i != parts.len() - 1 {
                        return Err(KeybindingError::InvalidKeySpec(format!(
                            "'{spec}' - unexpected modifier position for '{part}'"
                        )));
                    }
                    key_part = Some(*part);
                }
            }
        }

        let key_str = key_part.ok_or_else(|| {
            KeybindingError::InvalidKeySpec(format!("'{spec}' - missing key after modifiers"))
        })?;

        let code = Self::parse_key_code(key_str)
            .ok_or_else(|| KeybindingError::InvalidKeySpec(spec.to_string()))?;

        Ok(KeyEvent::new(code, modifiers))
    }

    /// Parse a key code from a string.
    fn parse_key_code(s: &str) -> Option<KeyCode> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(KeyCode::Char(c));
        }

        let lower = s.to_lowercase();

        if let Some(n) = lower.strip_prefix('f').and_then(|rest| rest.parse::<u8>().ok()) {
            return (1..=12).contains(&n).then_some(KeyCode::F(n));
        }

        match lower.as_str() {
            "space" | "spc" => Some(KeyCode::Char(' ')),
            "enter" | "return" | "ret" | "cr" => Some(KeyCode::Enter),
            "esc" | "escape" => Some(KeyCode::Esc),
            "tab" => Some(KeyCode::Tab),
            "backtab" | "shifttab" => Some(KeyCode::BackTab),
            "backspace" | "bs" => Some(KeyCode::Backspace),
            "delete" | "del" => Some(KeyCode::Delete),
            "insert" | "ins" => Some(KeyCode::Insert),

            "up" | "uparrow" => Some(KeyCode::Up),
            "down" | "downarrow" => Some(KeyCode::Down),
            "left" | "leftarrow" => Some(KeyCode::Left),
            "right" | "rightarrow" => Some(KeyCode::Right),

            "pageup" | "pgup" | "page_up" => Some(KeyCode::PageUp),
            "pagedown" | "pgdn" | "pgdown" | "page_down" => Some(KeyCode::PageDown),
            "home" => Some(KeyCode::Home),
            "end" => Some(KeyCode::End),

            _ => None,
        }
    }

    /// Parse an action name from a string.
    ///
    /// # Errors
    ///
    /// Returns `KeybindingError::InvalidAction` if the action name is not
    /// recognized, suggesting the closest valid name when one is similar.
    ///
    /// # Example
    ///
    /// ```
    /// use listpick::tui::keybindings::KeyBindings;
    /// use listpick::tui::Action;
    ///
    /// let action = KeyBindings::parse_action("navigate_down").unwrap();
    /// assert_eq!(action, Action::NavigateDown);
    /// ```
    pub fn parse_action(name: &str) -> Result<Action, KeybindingError> {
        name.parse::<Action>().map_err(|_| {
            let normalized = name.trim().to_lowercase().replace('-', "_");
            let suggestion = Action::all_names()
                .into_iter()
                .map(|candidate| (candidate, strsim::jaro_winkler(&normalized, candidate)))
                .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(candidate, _)| candidate.to_string());
            KeybindingError::InvalidAction {
                name: name.to_string(),
                suggestion,
            }
        })
    }

    /// Merge custom keybindings with profile defaults.
    ///
    /// Custom keys are added to the existing bindings for each action. A key
    /// that was bound to a different action is moved, so the override wins.
    ///
    /// # Errors
    ///
    /// Returns an error if any action name or key specification is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use listpick::tui::keybindings::{KeyBindings, KeybindingProfile};
    /// use std::collections::HashMap;
    ///
    /// let mut custom = HashMap::new();
    /// custom.insert("navigate_down".to_string(), vec!["Ctrl+n".to_string()]);
    ///
    /// let bindings = KeyBindings::from_profile(KeybindingProfile::Standard)
    ///     .with_custom_overrides(&custom)
    ///     .unwrap();
    /// ```
    pub fn with_custom_overrides(
        mut self,
        custom: &HashMap<String, Vec<String>>,
    ) -> Result<Self, KeybindingError> {
        for (action_name, key_specs) in custom {
            let action = Self::parse_action(action_name)?;

            for key_spec in key_specs {
                let key_event = Self::parse_key(key_spec)?;

                for (other_action, other_keys) in &mut self.action_keys {
                    if *other_action != action {
                        other_keys.retain(|k| !Self::key_matches(k, &key_event));
                    }
                }

                let keys = self.action_keys.entry(action).or_default();
                if !keys.iter().any(|k| Self::key_matches(k, &key_event)) {
                    keys.push(key_event);
                }
            }
        }

        Ok(self)
    }

    /// Create keybindings from a profile with custom overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if any custom binding is invalid.
    pub fn from_profile_with_custom(
        profile: KeybindingProfile,
        custom: &HashMap<String, Vec<String>>,
    ) -> Result<Self, KeybindingError> {
        Self::from_profile(profile).with_custom_overrides(custom)
    }

    // =========================================================================
    // Profile Binding Definitions
    // =========================================================================

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Keys shared by every profile.
    fn standard_bindings() -> HashMap<Action, Vec<KeyEvent>> {
        let mut bindings = HashMap::new();

        bindings.insert(Action::NavigateUp, vec![Self::key(KeyCode::Up)]);
        bindings.insert(Action::NavigateDown, vec![Self::key(KeyCode::Down)]);
        bindings.insert(Action::GoToTop, vec![Self::key(KeyCode::Home)]);
        bindings.insert(Action::GoToBottom, vec![Self::key(KeyCode::End)]);
        bindings.insert(Action::PageUp, vec![Self::key(KeyCode::PageUp)]);
        bindings.insert(Action::PageDown, vec![Self::key(KeyCode::PageDown)]);
        bindings.insert(Action::DeleteChar, vec![Self::key(KeyCode::Backspace)]);

        bindings.insert(
            Action::Confirm,
            vec![Self::key(KeyCode::Enter), Self::key(KeyCode::Right)],
        );

        bindings.insert(
            Action::Abort,
            vec![
                Self::key(KeyCode::Esc),
                Self::ctrl('c'),
                Self::key(KeyCode::Left),
            ],
        );

        bindings
    }

    /// Standard keys plus single-letter shortcuts.
    fn universal_bindings() -> HashMap<Action, Vec<KeyEvent>> {
        let mut bindings = Self::standard_bindings();

        let letters: [(Action, &[char]); 4] = [
            (Action::NavigateUp, &['k', 'w']),
            (Action::NavigateDown, &['j', 's']),
            (Action::Confirm, &[' ', 'l', 'd']),
            (Action::Abort, &['q']),
        ];
        for (action, chars) in letters {
            bindings
                .entry(action)
                .or_default()
                .extend(chars.iter().map(|c| Self::key(KeyCode::Char(*c))));
        }

        bindings
    }
}
