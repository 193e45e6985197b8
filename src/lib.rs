//! listpick - Interactive Terminal List Picker
//!
//! Shows a prompt above a list of choices in the terminal, lets the user move
//! through them with the keyboard and narrow them with an incremental
//! substring search, and returns the confirmed choice together with its
//! position in the original list.
//!
//! # Library use
//!
//! ```no_run
//! use listpick::{pick, PickError, PickerConfig};
//!
//! match pick("Deploy to:", ["staging", "production"], &PickerConfig::default()) {
//!     Ok(picked) => println!("deploying to {}", picked.value),
//!     Err(PickError::NoSelection) => println!("cancelled"),
//!     Err(e) => eprintln!("picker failed: {e}"),
//! }
//! ```
//!
//! The pure picking model lives in [`picker`]; the terminal front end lives
//! in [`tui`].

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod picker;
pub mod tui;

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Context;

pub use error::{ExitCode, PickError, PickResult};
pub use picker::{Choice, Picked};
pub use tui::{pick, pick_with, PickerConfig};

use cli::{Cli, OutputFormat};
use config::Config;

/// Run the listpick binary: load settings, gather choices, pick, print.
///
/// # Errors
///
/// Returns an error if logging, configuration, reading stdin or the picking
/// session fails. A [`PickError`] inside the chain decides the exit code.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .context("failed to open log file")?;

    let config = load_config(&cli)?;
    let picker_config = config
        .picker_config()
        .context("failed to resolve keybindings")?;

    let choices = read_choices(&cli)?;
    log::debug!("Picking from {} choices", choices.len());

    let picked = pick(&cli.prompt, choices, &picker_config)?;

    let mut stdout = io::stdout().lock();
    match cli.output {
        OutputFormat::Plain if cli.print_id => writeln!(stdout, "{}\t{}", picked.id, picked.value)?,
        OutputFormat::Plain => writeln!(stdout, "{}", picked.value)?,
        OutputFormat::Json => writeln!(stdout, "{}", serde_json::to_string(&picked)?)?,
    }
    stdout.flush()?;

    Ok(ExitCode::Success)
}

/// Layer the config file and environment, then apply CLI overrides.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    if let Some(profile) = cli.profile {
        config.keybinding_profile = profile;
    }
    if let Some(color) = cli.text_color {
        config.text_color = color;
    }
    if let Some(color) = cli.background_color {
        config.background_color = color;
    }
    if let Some(color) = cli.selected_text_color {
        config.selected_text_color = color;
    }
    if cli.bold {
        config.selected_text_bold = true;
    }
    Ok(config)
}

/// Positional choices, or one choice per non-empty stdin line.
fn read_choices(cli: &Cli) -> anyhow::Result<Vec<String>> {
    if !cli.reads_stdin() {
        return Ok(cli.choices.clone());
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        log::warn!("Reading choices from the terminal, one per line; finish with Ctrl-D");
    }
    parse_choice_lines(stdin.lock()).context("failed to read choices from stdin")
}

/// Split input into choices, dropping blank lines and CR line endings.
fn parse_choice_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut choices = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if !line.is_empty() {
            choices.push(line.to_string());
        }
    }
    Ok(choices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use ratatui::style::Color;
    use std::io::Cursor;

    #[test]
    fn test_parse_choice_lines() {
        let input = Cursor::new("alpha\r\n\nbeta\ngamma");
        let choices = parse_choice_lines(input).unwrap();
        assert_eq!(choices, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_positional_choices() {
        let cli = Cli::try_parse_from(["listpick", "P", "x", "y"]).unwrap();
        assert_eq!(read_choices(&cli).unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_cli_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "text_color = \"gray\"\nkeybinding_profile = \"universal\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "listpick",
            "P",
            "--config",
            path.to_str().unwrap(),
            "--profile",
            "standard",
            "--bold",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();

        assert_eq!(config.text_color, Color::Gray);
        assert_eq!(config.keybinding_profile, tui::KeybindingProfile::Standard);
        assert!(config.selected_text_bold);
    }
}
