//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. The TOML config file (platform config dir, or `--config`)
//! 3. `LISTPICK_*` environment variables
//! 4. CLI flags, applied by the caller on the extracted [`Config`]
//!
//! # Example file
//!
//! ```toml
//! keybinding_profile = "standard"
//! text_color = "gray"
//! selected_text_color = "yellow"
//! selected_text_bold = true
//!
//! [custom_keybindings]
//! confirm = ["Enter", "Tab"]
//! abort = ["Esc", "Ctrl+g"]
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tui::keybindings::{KeyBindings, KeybindingError, KeybindingProfile};
use crate::tui::{PickerConfig, Theme};

/// Prefix of environment variables read as configuration.
pub const ENV_PREFIX: &str = "LISTPICK_";

/// Name of the config file inside the platform config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Custom keybindings: action name to key specifications.
pub type CustomKeybindings = HashMap<String, Vec<String>>;

/// Error loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A layer could not be read or has values of the wrong type.
    #[error("invalid configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// A custom keybinding could not be parsed.
    #[error("invalid keybinding: {0}")]
    Keybinding(#[from] KeybindingError),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Built-in key profile.
    pub keybinding_profile: KeybindingProfile,
    /// Per-action key overrides applied on top of the profile.
    pub custom_keybindings: CustomKeybindings,
    /// Foreground of the prompt and unselected rows.
    pub text_color: Color,
    /// Background of the whole picker.
    pub background_color: Color,
    /// Foreground of the highlighted row.
    pub selected_text_color: Color,
    /// Whether the highlighted row is bold.
    pub selected_text_bold: bool,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            keybinding_profile: KeybindingProfile::default(),
            custom_keybindings: CustomKeybindings::new(),
            text_color: theme.text_color,
            background_color: theme.background_color,
            selected_text_color: theme.selected_text_color,
            selected_text_bold: theme.selected_text_bold,
        }
    }
}

impl Config {
    /// Load defaults, the platform config file (if any) and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if the file or an environment variable
    /// holds an invalid value.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::extract(Self::figment(&path)),
            None => {
                log::debug!("No platform config directory, skipping config file");
                Self::extract(Self::base_figment().merge(Env::prefixed(ENV_PREFIX).split("__")))
            }
        }
    }

    /// Load defaults, the given config file and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if `path` does not exist and
    /// [`ConfigError::Load`] if a layer holds an invalid value.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Self::extract(Self::figment(path))
    }

    /// The layered figment for a config file path.
    ///
    /// A missing file contributes nothing.
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Self::base_figment()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn base_figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Config = figment.extract()?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "listpick").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Colours for the picker.
    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme {
            text_color: self.text_color,
            background_color: self.background_color,
            selected_text_color: self.selected_text_color,
            selected_text_bold: self.selected_text_bold,
        }
    }

    /// Resolve the profile and custom overrides into key bindings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Keybinding`] for an unknown action name or an
    /// unparsable key.
    pub fn keybindings(&self) -> Result<KeyBindings, ConfigError> {
        Ok(KeyBindings::from_profile_with_custom(
            self.keybinding_profile,
            &self.custom_keybindings,
        )?)
    }

    /// Everything a picking session needs.
    ///
    /// # Errors
    ///
    /// See [`Config::keybindings`].
    pub fn picker_config(&self) -> Result<PickerConfig, ConfigError> {
        Ok(PickerConfig {
            theme: self.theme(),
            keybindings: self.keybindings()?,
        })
    }
}
