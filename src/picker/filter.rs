//! Substring filtering of the choice store.
//!
//! Every query edit reapplies the whole query from scratch: hidden flags are
//! recomputed for every choice, then the selection is repaired. Filtering is
//! never treated as narrowing the previous result set, so deleting a
//! character after the selected choice was hidden behaves the same as typing
//! the shorter query directly.

use super::choice::ChoiceStore;

impl ChoiceStore {
    /// Recompute hidden flags for `query` and reset the selection.
    ///
    /// A choice stays visible when its value contains `query` as a literal,
    /// case-sensitive substring. The empty query shows everything.
    ///
    /// After the flags are updated the first visible choice in id order is
    /// selected, so a previously selected choice that the query hid never
    /// keeps the marker. If nothing is visible the selection is cleared
    /// entirely.
    pub fn apply_query(&mut self, query: &str) {
        for choice in self.choices_mut() {
            choice.hidden = !choice.value().contains(query);
        }

        match self.visible().first().copied() {
            Some(first) => {
                self.select(first);
            }
            None => self.clear_selection(),
        }

        log::trace!(
            "Applied query {:?}: {} of {} visible, selected = {:?}",
            query,
            self.visible_count(),
            self.len(),
            self.selected().map(|c| c.id())
        );
    }
}
