//! Terminal User Interface module.
//!
//! This module provides the interactive picker drawn with ratatui on a
//! crossterm backend.
//!
//! # Overview
//!
//! The TUI module consists of:
//! - [`app`]: Controller state (session, prompt, terminal size, actions)
//! - [`events`]: Translation of terminal input into picker events
//! - [`keybindings`]: Key profiles and user overrides
//! - [`surface`]: The display surface abstraction and its terminal implementation
//! - [`theme`]: Colours of the prompt and rows
//! - [`ui`]: Frame rendering
//! - [`run`]: The picking loop and its entry points
//!
//! # Architecture
//!
//! The TUI follows a unidirectional data flow:
//! 1. Events are read from the surface (crossterm)
//! 2. Events are translated to Actions or typed characters
//! 3. Actions modify the App state
//! 4. The UI renders based on the current App state
//!
//! # Example
//!
//! ```
//! use listpick::tui::{Action, App};
//!
//! let mut app = App::new("Pick one:", ["alpha", "beta", "gamma"]).unwrap();
//!
//! app.handle_action(Action::NavigateDown);
//! app.handle_action(Action::Confirm);
//!
//! let picked = app.result().unwrap();
//! assert_eq!(picked.value, "beta");
//! assert_eq!(picked.id, 1);
//! ```

pub mod app;
pub mod events;
pub mod keybindings;
pub mod run;
pub mod surface;
pub mod theme;
pub mod ui;

// Re-export commonly used types
pub use app::{Action, App};
pub use events::{EventHandler, PickerEvent};
pub use keybindings::{KeyBindings, KeybindingError, KeybindingProfile};
pub use run::{pick, pick_with, run_loop, PickerConfig};
pub use surface::{CrosstermEvents, EventSource, InputEvent, Surface, TerminalSurface};
pub use theme::Theme;
pub use ui::render;
