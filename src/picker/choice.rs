//! Canonical choice storage.
//!
//! # Overview
//!
//! The [`ChoiceStore`] owns every [`Choice`] of a picking session in its
//! original input order. Each choice carries an explicit, immutable `id`
//! (its position in the input list), so identity survives filtering: hiding
//! a choice never reorders or removes it from storage.
//!
//! Navigation and filtering never index the store by screen position.
//! They work on derived views such as [`ChoiceStore::visible`], which
//! returns the ids of the non-hidden choices in id order.
//!
//! # Example
//!
//! ```
//! use listpick::picker::ChoiceStore;
//!
//! let store = ChoiceStore::new(vec!["a".to_string(), "b".to_string()]);
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.selected().map(|c| c.id()), Some(0));
//! ```

use std::fmt;

/// A single entry of the list being picked from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    id: usize,
    value: String,
    pub(crate) selected: bool,
    pub(crate) hidden: bool,
}

impl Choice {
    /// Create a visible, unselected choice.
    #[must_use]
    pub fn new(id: usize, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
            selected: false,
            hidden: false,
        }
    }

    /// Position of this choice in the original input list.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// The text of this choice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether this choice carries the selection marker.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Whether the current query hides this choice.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Whether this choice is shown under the current query.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.value)
    }
}

/// Ordered, identity-stable set of choices with selection and hidden flags.
///
/// The store keeps the invariant that at most one visible choice is
/// selected. The filter engine and the navigator (implemented in sibling
/// modules) maintain the stronger invariant that exactly one visible choice
/// is selected whenever any choice is visible.
#[derive(Debug, Clone, Default)]
pub struct ChoiceStore {
    choices: Vec<Choice>,
}

impl ChoiceStore {
    /// Build the store from the input list.
    ///
    /// Ids are assigned `0..n` in input order and the first choice (if any)
    /// starts out selected.
    #[must_use]
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut choices: Vec<Choice> = values
            .into_iter()
            .enumerate()
            .map(|(id, value)| Choice::new(id, value))
            .collect();

        if let Some(first) = choices.first_mut() {
            first.selected = true;
        }

        log::debug!("Choice store built with {} choices", choices.len());
        Self { choices }
    }

    /// Number of choices, hidden ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Whether the store holds no choices at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Look a choice up by id.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&Choice> {
        self.choices.get(id)
    }

    /// Iterate over every choice in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Choice> {
        self.choices.iter()
    }

    /// Ids of the visible choices, in id order.
    #[must_use]
    pub fn visible(&self) -> Vec<usize> {
        self.choices
            .iter()
            .filter(|c| c.is_visible())
            .map(Choice::id)
            .collect()
    }

    /// Number of visible choices.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.choices.iter().filter(|c| c.is_visible()).count()
    }

    /// The selected visible choice, if there is one.
    #[must_use]
    pub fn selected(&self) -> Option<&Choice> {
        self.choices
            .iter()
            .find(|c| c.selected && c.is_visible())
    }

    /// Index of the selected choice within [`ChoiceStore::visible`].
    #[must_use]
    pub fn selected_position(&self) -> Option<usize> {
        self.choices
            .iter()
            .filter(|c| c.is_visible())
            .position(|c| c.selected)
    }

    /// Remove the selection marker from every choice.
    pub fn clear_selection(&mut self) {
        for choice in &mut self.choices {
            choice.selected = false;
        }
    }

    /// Move the selection marker to `id`, clearing it everywhere else.
    ///
    /// Returns `false` (and changes nothing) when `id` is out of range or
    /// names a hidden choice.
    pub(crate) fn select(&mut self, id: usize) -> bool {
        if !self.choices.get(id).is_some_and(Choice::is_visible) {
            return false;
        }
        for choice in &mut self.choices {
            choice.selected = choice.id == id;
        }
        true
    }

    pub(crate) fn choices_mut(&mut self) -> &mut [Choice] {
        &mut self.choices
    }
}
