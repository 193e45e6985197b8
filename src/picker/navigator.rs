//! Selection movement over the visible choices.
//!
//! # Overview
//!
//! Movement always happens inside the ordered list of visible choices and
//! is clamped to its ends: moving past the first or last entry leaves the
//! selection where it is. The same primitive serves single steps (arrow and
//! vi keys), page steps, and jumps to either end (a step as large as the
//! visible list always lands exactly on the first or last entry).
//!
//! # Example
//!
//! ```
//! use listpick::picker::{ChoiceStore, Direction};
//!
//! let mut store = ChoiceStore::new(["a", "b", "c"]);
//! let moved = store.move_selection(Direction::Down, 5).unwrap();
//! assert_eq!(moved.id(), 2);
//! ```

use super::choice::{Choice, ChoiceStore};

/// Direction of a selection move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the first visible choice.
    Up,
    /// Towards the last visible choice.
    Down,
}

impl ChoiceStore {
    /// Move the selection `step` entries in `direction`.
    ///
    /// Returns the newly selected choice, or `None` when no choice is
    /// visible. When no visible choice is selected (right after a filter
    /// hid the previous one) the first visible choice is selected instead
    /// of moving. A step of zero is treated as one.
    pub fn move_selection(&mut self, direction: Direction, step: usize) -> Option<&Choice> {
        let visible = self.visible();
        let last = visible.len().checked_sub(1)?;

        let target = match self.selected_position() {
            None => visible[0],
            Some(current) => {
                let step = step.max(1);
                let index = match direction {
                    Direction::Up => current.saturating_sub(step),
                    Direction::Down => current.saturating_add(step).min(last),
                };
                visible[index]
            }
        };

        self.select(target);
        log::trace!("Move {:?} by {}: selected id {}", direction, step, target);
        self.get(target)
    }

    /// Move one entry up.
    pub fn move_up(&mut self) -> Option<&Choice> {
        self.move_selection(Direction::Up, 1)
    }

    /// Move one entry down.
    pub fn move_down(&mut self) -> Option<&Choice> {
        self.move_selection(Direction::Down, 1)
    }

    /// Jump to the first visible choice.
    pub fn move_to_first(&mut self) -> Option<&Choice> {
        let count = self.visible_count();
        self.move_selection(Direction::Up, count)
    }

    /// Jump to the last visible choice.
    pub fn move_to_last(&mut self) -> Option<&Choice> {
        let count = self.visible_count();
        self.move_selection(Direction::Down, count)
    }
}
