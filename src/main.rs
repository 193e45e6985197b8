//! listpick - Interactive Terminal List Picker
//!
//! Entry point for the listpick CLI application.

use clap::Parser;
use listpick::{
    cli::Cli,
    error::{ExitCode, StructuredError},
};
use yansi::Paint;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();
    let json_errors = cli.json_errors;
    if cli.no_color {
        yansi::disable();
    }

    match listpick::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::for_error(&err);

            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                match serde_json::to_string_pretty(&structured) {
                    Ok(json) => eprintln!("{}", json),
                    Err(_) => eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err),
                }
            } else if exit_code != ExitCode::NoSelection {
                // An abort is the user's choice, not something to report
                let prefix = format!("[{}] Error:", exit_code.code_prefix());
                eprintln!("{} {:#}", prefix.red().bold(), err);
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
