//! Frame rendering.
//!
//! # Overview
//!
//! A frame has two parts:
//! - Header rows holding the prompt, one line per row, starting at column 1
//! - Choice rows holding the window of visible choices below the header
//!
//! The selected row is drawn as `"> value"` from column 1 in the selected
//! style; every other row starts at column 3 in the base style, so values
//! line up. A non-empty query is drawn on the last header row one column
//! after the prompt text.
//!
//! # Example
//!
//! ```no_run
//! use listpick::tui::{render, App, Surface, Theme};
//!
//! fn draw(surface: &mut impl Surface, app: &App) -> listpick::PickResult<()> {
//!     render(surface, app, &Theme::default())
//! }
//! ```

use unicode_width::UnicodeWidthStr;

use super::app::App;
use super::surface::Surface;
use super::theme::Theme;
use crate::error::PickResult;

/// Column where the prompt and the selection marker start.
const MARKER_COLUMN: u16 = 1;
/// Column where unselected values start, aligned with `"> "`.
const VALUE_COLUMN: u16 = 3;
/// Prefix of the selected row.
const SELECTED_MARKER: &str = "> ";

/// Draw one full frame and push it to the screen.
///
/// # Errors
///
/// Returns [`crate::PickError::Surface`] if the surface cannot be cleared or
/// synchronized, and [`crate::PickError::Internal`] if the selection was
/// lost while choices are still visible.
pub fn render<S: Surface + ?Sized>(surface: &mut S, app: &App, theme: &Theme) -> PickResult<()> {
    let viewport = app.viewport()?;

    surface.clear()?;
    render_header(surface, app, theme);

    let choices = app.session().choices();
    let visible = choices.visible();
    let header = app.header_lines();
    for (offset, id) in visible[viewport.range()].iter().enumerate() {
        let Some(choice) = choices.get(*id) else {
            continue;
        };
        let y = to_cell(header + offset);
        if choice.is_selected() {
            let line = format!("{SELECTED_MARKER}{}", choice.value());
            surface.draw_text(MARKER_COLUMN, y, &line, theme.selected_style());
        } else {
            surface.draw_text(VALUE_COLUMN, y, choice.value(), theme.base_style());
        }
    }

    surface.synchronize()?;
    Ok(())
}

/// Draw the prompt lines and the query.
fn render_header<S: Surface + ?Sized>(surface: &mut S, app: &App, theme: &Theme) {
    let lines = app.prompt_lines();
    for (y, line) in lines.iter().enumerate() {
        surface.draw_text(MARKER_COLUMN, to_cell(y), line, theme.base_style());
    }

    let query = app.query();
    if query.is_empty() {
        return;
    }
    let last = lines.len().saturating_sub(1);
    let prompt_width = lines.last().map_or(0, |line| line.width());
    let x = to_cell(usize::from(MARKER_COLUMN) + prompt_width + 1);
    surface.draw_text(x, to_cell(last), query, theme.selected_style());
}

/// Clamp a row or column index to the surface coordinate range.
fn to_cell(index: usize) -> u16 {
    u16::try_from(index).unwrap_or(u16::MAX)
}
