//! Picking loop.
//!
//! This module provides the entry points that run an interactive picking
//! session from start to finish.
//!
//! # Threading
//!
//! The session and the surface are moved into a dedicated loop thread which
//! owns them exclusively. The caller blocks on a one-shot channel until the
//! loop reports the final result. If the loop thread dies without reporting,
//! the caller gets [`PickError::Internal`].
//!
//! # Event Loop
//!
//! The loop follows this pattern:
//! 1. Read the surface size and recompute the page size
//! 2. Render the current state and synchronize the surface
//! 3. Block until the next input event
//! 4. Apply it to the session
//!
//! It stops once the session is confirmed or aborted. The surface is dropped
//! (restoring the terminal) before the result is sent back.
//!
//! # Example
//!
//! ```no_run
//! use listpick::tui::{pick, PickerConfig};
//!
//! let picked = pick("Pick a fruit:", ["apple", "banana"], &PickerConfig::default());
//! match picked {
//!     Ok(choice) => println!("{} (#{})", choice.value, choice.id),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use std::sync::mpsc;
use std::thread;

use super::app::App;
use super::events::{EventHandler, PickerEvent};
use super::keybindings::KeyBindings;
use super::surface::{Surface, TerminalSurface};
use super::theme::Theme;
use super::ui::render;
use crate::error::{PickError, PickResult};
use crate::picker::Picked;

/// Name of the loop thread, visible in panics and debuggers.
const LOOP_THREAD_NAME: &str = "listpick-loop";

/// Cosmetic options and key bindings for a session.
#[derive(Debug, Clone, Default)]
pub struct PickerConfig {
    /// Colours of the prompt and rows.
    pub theme: Theme,
    /// Key to action mapping.
    pub keybindings: KeyBindings,
}

/// Run an interactive session on the controlling terminal.
///
/// The picker is drawn on stderr so stdout stays free for the caller.
///
/// # Errors
///
/// - [`PickError::NoChoices`] if `choices` is empty; the terminal is not touched
/// - [`PickError::NoSelection`] if the user aborted or confirmed with nothing visible
/// - [`PickError::Surface`] if the terminal could not be set up, drawn or read
/// - [`PickError::Internal`] if the loop broke an invariant or died
pub fn pick<I, S>(prompt: &str, choices: I, config: &PickerConfig) -> PickResult<Picked>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let app = App::new(prompt, choices)?;
    let surface = TerminalSurface::stderr(config.theme.base_style())?;
    run_session(surface, app, config)
}

/// Run a session on any surface.
///
/// The surface is dropped before this returns, whatever the outcome.
///
/// # Errors
///
/// Same as [`pick`].
pub fn pick_with<Srf, I, S>(
    surface: Srf,
    prompt: &str,
    choices: I,
    config: &PickerConfig,
) -> PickResult<Picked>
where
    Srf: Surface + Send + 'static,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let app = App::new(prompt, choices)?;
    run_session(surface, app, config)
}

/// Move the session into the loop thread and wait for its result.
fn run_session<Srf>(surface: Srf, app: App, config: &PickerConfig) -> PickResult<Picked>
where
    Srf: Surface + Send + 'static,
{
    let handler = EventHandler::with_bindings(config.keybindings.clone());
    let theme = config.theme;
    let (done_tx, done_rx) = mpsc::sync_channel(1);

    log::debug!(
        "Starting session with {} choices",
        app.session().choices().len()
    );

    let handle = thread::Builder::new()
        .name(LOOP_THREAD_NAME.to_string())
        .spawn(move || {
            let mut surface = surface;
            let mut app = app;
            let result = run_loop(&mut surface, &mut app, &handler, &theme).and_then(|()| app.result());
            drop(surface);
            // The receiver only disappears if the caller is gone too.
            let _ = done_tx.send(result);
        })
        .map_err(|e| PickError::Internal(format!("failed to start picking loop: {e}")))?;

    let result = done_rx.recv().unwrap_or_else(|_| {
        Err(PickError::Internal(
            "picking loop exited without reporting a result".to_string(),
        ))
    });
    if handle.join().is_err() {
        log::error!("Picking loop panicked");
    }

    match &result {
        Ok(picked) => log::debug!("Picked #{} {:?}", picked.id, picked.value),
        Err(e) => log::debug!("Session ended: {}", e),
    }
    result
}

/// Render and handle input until the session ends.
///
/// # Errors
///
/// Returns [`PickError::Surface`] on I/O failure and
/// [`PickError::Internal`] if rendering finds the selection lost.
pub fn run_loop<S: Surface + ?Sized>(
    surface: &mut S,
    app: &mut App,
    handler: &EventHandler,
    theme: &Theme,
) -> PickResult<()> {
    while !app.should_quit() {
        let (columns, rows) = surface.size()?;
        app.set_terminal_size(usize::from(columns), usize::from(rows));
        render(surface, app, theme)?;

        match handler.translate(&surface.poll_event()?) {
            PickerEvent::Action(action) => {
                app.handle_action(action);
            }
            PickerEvent::Input(c) => app.handle_input(c),
            // picked up from surface.size() on the next frame
            PickerEvent::Resize(columns, rows) => {
                log::trace!("Resize event {}x{}", columns, rows);
            }
            PickerEvent::Ignored => {}
        }
    }

    log::debug!("Picking loop finished: {:?}", app.outcome());
    Ok(())
}
