//! Viewport windowing for the choice list.
//!
//! The terminal shows the prompt lines first, then as many visible choices
//! as fit below them. The window is recomputed from scratch on every frame:
//! it starts at the top while the selection fits on screen, and otherwise
//! scrolls so that the selected choice sits on the last row.

use std::ops::Range;

/// The contiguous run of visible choices drawn in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Index (into the visible list) of the first drawn choice.
    pub start: usize,
    /// Number of drawn choices.
    pub len: usize,
}

impl Viewport {
    /// Compute the window for the current frame.
    ///
    /// # Arguments
    ///
    /// * `header_lines` - Rows taken by the prompt
    /// * `rows` - Terminal height
    /// * `selected` - Position of the selection inside the visible list
    /// * `visible` - Number of visible choices
    #[must_use]
    pub fn compute(header_lines: usize, rows: usize, selected: Option<usize>, visible: usize) -> Self {
        let capacity = rows.saturating_sub(header_lines);
        if capacity == 0 || visible == 0 {
            return Self::default();
        }

        let start = match selected {
            Some(position) if position >= capacity => position + 1 - capacity,
            _ => 0,
        };
        let len = capacity.min(visible.saturating_sub(start));

        Self { start, len }
    }

    /// Range of visible-list indices covered by the window.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// Whether `position` (an index into the visible list) is drawn.
    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        self.range().contains(&position)
    }
}

/// Step used by page-up and page-down.
///
/// One less than the rows available to choices, so a page move keeps one
/// row of context. When the prompt alone fills the terminal the row count is
/// returned unchanged.
#[must_use]
pub fn compute_page_size(rows: usize, header_lines: usize) -> usize {
    if rows > header_lines {
        rows - header_lines - 1
    } else {
        rows
    }
}
