//! Picker controller state.
//!
//! # Overview
//!
//! The [`App`] struct is the state owned by the picking loop. It wraps the
//! [`Session`] (choices, query, outcome) together with what the loop knows
//! about the terminal: the prompt lines drawn as the header and the current
//! terminal size, from which the page size is derived.
//!
//! Input is applied through [`App::handle_action`] for bound keys and
//! [`App::handle_input`] for printable characters typed into the query.
//!
//! # Example
//!
//! ```
//! use listpick::tui::app::{Action, App};
//!
//! let mut app = App::new("Pick:", ["a", "b", "c"]).unwrap();
//! app.handle_action(Action::NavigateDown);
//! app.handle_action(Action::NavigateDown);
//! app.handle_action(Action::Confirm);
//!
//! let picked = app.result().unwrap();
//! assert_eq!((picked.value.as_str(), picked.id), ("c", 2));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{PickError, PickResult};
use crate::picker::{
    compute_page_size, Choice, Direction, Outcome, Picked, Session, Viewport,
};

/// User action triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move the selection one entry up
    NavigateUp,
    /// Move the selection one entry down
    NavigateDown,
    /// Move the selection one page up
    PageUp,
    /// Move the selection one page down
    PageDown,
    /// Jump to the first visible choice
    GoToTop,
    /// Jump to the last visible choice
    GoToBottom,
    /// Drop the last character of the search query
    DeleteChar,
    /// Confirm the highlighted choice
    Confirm,
    /// Abort without choosing
    Abort,
}

impl Action {
    /// Every action, in display order.
    #[must_use]
    pub fn all() -> &'static [Action] {
        &[
            Self::NavigateUp,
            Self::NavigateDown,
            Self::PageUp,
            Self::PageDown,
            Self::GoToTop,
            Self::GoToBottom,
            Self::DeleteChar,
            Self::Confirm,
            Self::Abort,
        ]
    }

    /// Configuration name of the action (e.g. `navigate_down`).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::NavigateUp => "navigate_up",
            Self::NavigateDown => "navigate_down",
            Self::PageUp => "page_up",
            Self::PageDown => "page_down",
            Self::GoToTop => "go_to_top",
            Self::GoToBottom => "go_to_bottom",
            Self::DeleteChar => "delete_char",
            Self::Confirm => "confirm",
            Self::Abort => "abort",
        }
    }

    /// Configuration names of every action.
    #[must_use]
    pub fn all_names() -> Vec<&'static str> {
        Self::all().iter().map(Action::name).collect()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = String;

    /// Parse an action name, ignoring case and treating `-` like `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::all()
            .iter()
            .copied()
            .find(|action| action.name() == normalized)
            .ok_or_else(|| s.to_string())
    }
}

/// Terminal height assumed until the first size report.
const DEFAULT_ROWS: usize = 24;
/// Terminal width assumed until the first size report.
const DEFAULT_COLUMNS: usize = 80;

/// State of the picking loop.
///
/// Owned exclusively by the loop thread; nothing else mutates it while a
/// session runs.
#[derive(Debug, Clone)]
pub struct App {
    /// Choices, query and outcome
    session: Session,
    /// Prompt split into header rows
    prompt: Vec<String>,
    /// Terminal width in cells
    columns: usize,
    /// Terminal height in rows
    rows: usize,
    /// Step for page-up/page-down
    page_size: usize,
}

impl App {
    /// Create the controller state for a new session.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::NoChoices`] when `choices` is empty.
    pub fn new<I, S>(prompt: &str, choices: I) -> PickResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::with_session(prompt, Session::new(choices)?))
    }

    /// Wrap an existing session.
    #[must_use]
    pub fn with_session(prompt: &str, session: Session) -> Self {
        let prompt: Vec<String> = prompt.split('\n').map(str::to_string).collect();
        let header = prompt.len();
        Self {
            session,
            prompt,
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            page_size: compute_page_size(DEFAULT_ROWS, header),
        }
    }

    // ==================== Accessors ====================

    /// The picking session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Prompt lines, one per header row.
    #[must_use]
    pub fn prompt_lines(&self) -> &[String] {
        &self.prompt
    }

    /// Number of header rows.
    #[must_use]
    pub fn header_lines(&self) -> usize {
        self.prompt.len()
    }

    /// Current search query.
    #[must_use]
    pub fn query(&self) -> &str {
        self.session.query()
    }

    /// The highlighted choice, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Choice> {
        self.session.choices().selected()
    }

    /// Step used by page-up/page-down.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Terminal size as `(columns, rows)`.
    #[must_use]
    pub fn terminal_size(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// Record a new terminal size and recompute the page size.
    pub fn set_terminal_size(&mut self, columns: usize, rows: usize) {
        if (columns, rows) != (self.columns, self.rows) {
            log::debug!(
                "Terminal size: {}x{} -> {}x{}",
                self.columns,
                self.rows,
                columns,
                rows
            );
        }
        self.columns = columns;
        self.rows = rows;
        self.page_size = compute_page_size(rows, self.header_lines());
    }

    /// Whether the loop should stop.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.session.is_done()
    }

    /// Current outcome.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.session.outcome()
    }

    /// The window of visible choices to draw this frame.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::Internal`] when choices are visible but none of
    /// them is selected.
    pub fn viewport(&self) -> PickResult<Viewport> {
        let choices = self.session.choices();
        let visible = choices.visible_count();
        let selected = choices.selected_position();
        if visible > 0 && selected.is_none() {
            return Err(PickError::Internal(format!(
                "selection lost while {visible} choices are visible"
            )));
        }
        Ok(Viewport::compute(
            self.header_lines(),
            self.rows,
            selected,
            visible,
        ))
    }

    /// Final result of the session.
    ///
    /// # Errors
    ///
    /// See [`Session::result`].
    pub fn result(&self) -> PickResult<Picked> {
        self.session.result()
    }

    // ==================== Input Handling ====================

    /// Handle a bound action and update state accordingly.
    ///
    /// Returns true if the action was handled. Every action is ignored once
    /// the session has ended.
    pub fn handle_action(&mut self, action: Action) -> bool {
        if self.should_quit() {
            log::trace!("Ignoring {:?}: session already ended", action);
            return false;
        }
        log::trace!("Handling action: {:?}", action);

        let page = self.page_size;
        let choices = self.session.choices_mut();
        match action {
            Action::NavigateUp => {
                choices.move_selection(Direction::Up, 1);
            }
            Action::NavigateDown => {
                choices.move_selection(Direction::Down, 1);
            }
            Action::PageUp => {
                choices.move_selection(Direction::Up, page);
            }
            Action::PageDown => {
                choices.move_selection(Direction::Down, page);
            }
            Action::GoToTop => {
                choices.move_to_first();
            }
            Action::GoToBottom => {
                choices.move_to_last();
            }
            Action::DeleteChar => self.session.pop_char(),
            Action::Confirm => self.session.confirm(),
            Action::Abort => self.session.abort(),
        }
        true
    }

    /// Append a typed character to the search query.
    pub fn handle_input(&mut self, c: char) {
        if self.should_quit() {
            return;
        }
        self.session.push_char(c);
        log::trace!("Query is now {:?}", self.session.query());
    }
}
