//! Command-line interface definitions for listpick.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Pick from positional choices
//! listpick "Deploy to:" staging production
//!
//! # Pick a line from stdin
//! git branch --format='%(refname:short)' | listpick "Checkout branch:"
//!
//! # Machine-readable result with the choice id
//! ls | listpick "File:" --output json
//! ```

use clap::{Parser, ValueEnum};
use ratatui::style::Color;
use std::path::PathBuf;

use crate::tui::KeybindingProfile;

/// Interactive terminal list picker with incremental search.
///
/// Shows PROMPT above a list of choices, lets you move through them with the
/// keyboard and narrow them by typing, then prints the picked value on
/// stdout. The picker itself is drawn on stderr.
#[derive(Debug, Parser)]
#[command(name = "listpick")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Text shown above the choices (newlines start extra header rows)
    #[arg(value_name = "PROMPT")]
    pub prompt: String,

    /// Choices to pick from; read one per line from stdin when omitted or "-"
    #[arg(value_name = "CHOICES")]
    pub choices: Vec<String>,

    /// How to print the picked choice
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Print the choice id before the value, tab separated (plain output only)
    #[arg(long)]
    pub print_id: bool,

    /// Keybinding profile (overrides the config file)
    #[arg(long, value_enum, value_name = "PROFILE")]
    pub profile: Option<KeybindingProfile>,

    /// Path to a config file instead of the platform default
    #[arg(short, long, value_name = "PATH", env = "LISTPICK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Colour of the prompt and unselected choices (e.g. white, gray, #c0c0c0)
    #[arg(long, value_name = "COLOR", value_parser = parse_color)]
    pub text_color: Option<Color>,

    /// Background colour of the picker
    #[arg(long, value_name = "COLOR", value_parser = parse_color)]
    pub background_color: Option<Color>,

    /// Colour of the highlighted choice
    #[arg(long, value_name = "COLOR", value_parser = parse_color)]
    pub selected_text_color: Option<Color>,

    /// Draw the highlighted choice in bold
    #[arg(long)]
    pub bold: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Append log output to this file (stderr is taken by the picker)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
}

impl Cli {
    /// Whether choices should be read from stdin.
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.choices.is_empty() || self.choices == ["-"]
    }
}

/// Output format of the picked choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The value on its own line
    Plain,
    /// A JSON object with `value` and `id`
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a colour name, `#rrggbb` hex value or ANSI index.
///
/// # Errors
///
/// Returns a message naming the rejected input.
pub fn parse_color(s: &str) -> Result<Color, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Color cannot be empty".to_string());
    }
    s.parse::<Color>()
        .map_err(|_| format!("Unknown color: '{s}'. Examples: white, light-blue, #ff8800, 208"))
}
