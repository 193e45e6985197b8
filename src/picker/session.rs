//! State of one picking session.
//!
//! A [`Session`] bundles the choice store, the search query and the
//! outcome. It is created once from the input list and only its flags and
//! query change afterwards. Once the outcome leaves [`Outcome::Pending`] the
//! session is finished and further edits are ignored.

use super::choice::{Choice, ChoiceStore};
use crate::error::{PickError, PickResult};

/// How a session ended (or that it has not ended yet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// The user is still picking.
    #[default]
    Pending,
    /// The user confirmed the highlighted choice.
    Confirmed,
    /// The user aborted without choosing.
    Aborted,
}

impl Outcome {
    /// Whether the session has ended.
    #[must_use]
    pub fn is_done(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// The confirmed choice returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Picked {
    /// Text of the chosen entry.
    pub value: String,
    /// Position of the chosen entry in the input list.
    pub id: usize,
}

/// Choices, search query and outcome of one picking session.
#[derive(Debug, Clone)]
pub struct Session {
    choices: ChoiceStore,
    query: String,
    outcome: Outcome,
}

impl Session {
    /// Start a session over `values`.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::NoChoices`] when `values` is empty.
    pub fn new<I, S>(values: I) -> PickResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices = ChoiceStore::new(values);
        if choices.is_empty() {
            return Err(PickError::NoChoices);
        }
        Ok(Self {
            choices,
            query: String::new(),
            outcome: Outcome::Pending,
        })
    }

    /// The choice store.
    #[must_use]
    pub fn choices(&self) -> &ChoiceStore {
        &self.choices
    }

    /// Mutable access to the choice store for navigation.
    pub fn choices_mut(&mut self) -> &mut ChoiceStore {
        &mut self.choices
    }

    /// The current search query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The current outcome.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Whether the session has ended.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.outcome.is_done()
    }

    /// Append `c` to the query and refilter.
    pub fn push_char(&mut self, c: char) {
        if self.is_done() {
            return;
        }
        self.query.push(c);
        self.choices.apply_query(&self.query);
    }

    /// Drop the last query character and refilter.
    ///
    /// Does nothing when the query is already empty.
    pub fn pop_char(&mut self) {
        if self.is_done() || self.query.pop().is_none() {
            return;
        }
        self.choices.apply_query(&self.query);
    }

    /// End the session keeping the current selection.
    pub fn confirm(&mut self) {
        if self.is_done() {
            return;
        }
        log::debug!(
            "Session confirmed with selection {:?}",
            self.choices.selected().map(Choice::id)
        );
        self.outcome = Outcome::Confirmed;
    }

    /// End the session discarding the selection.
    pub fn abort(&mut self) {
        if self.is_done() {
            return;
        }
        log::debug!("Session aborted");
        self.choices.clear_selection();
        self.outcome = Outcome::Aborted;
    }

    /// Turn the final state into the caller-facing result.
    ///
    /// # Errors
    ///
    /// - [`PickError::NoSelection`] when the session was aborted, or
    ///   confirmed while no visible choice was selected.
    /// - [`PickError::Internal`] when the session is still pending, a
    ///   hidden choice carries the selection marker, or visible choices
    ///   remain with none selected.
    pub fn result(&self) -> PickResult<Picked> {
        match self.outcome {
            Outcome::Pending => Err(PickError::Internal(
                "picking loop ended before the session finished".to_string(),
            )),
            Outcome::Aborted => Err(PickError::NoSelection),
            Outcome::Confirmed => {
                if let Some(choice) = self.choices.selected() {
                    return Ok(Picked {
                        value: choice.value().to_string(),
                        id: choice.id(),
                    });
                }
                if let Some(stale) = self.choices.iter().find(|c| c.is_selected()) {
                    return Err(PickError::Internal(format!(
                        "confirmed choice {} is hidden by the query",
                        stale.id()
                    )));
                }
                if self.choices.visible_count() > 0 {
                    return Err(PickError::Internal(format!(
                        "selection lost with {} visible choices",
                        self.choices.visible_count()
                    )));
                }
                Err(PickError::NoSelection)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_input() {
        let result = Session::new(Vec::<String>::new());
        assert!(matches!(result, Err(PickError::NoChoices)));
    }

    #[test]
    fn test_push_and_pop_char() {
        let mut session = Session::new(["apple", "banana", "cherry"]).unwrap();
        session.push_char('a');
        session.push_char('n');
        assert_eq!(session.query(), "an");
        assert_eq!(session.choices().visible(), vec![1]);

        session.pop_char();
        assert_eq!(session.query(), "a");
        assert_eq!(session.choices().visible(), vec![0, 1]);
    }

    #[test]
    fn test_pop_on_empty_query_is_noop() {
        let mut session = Session::new(["x", "y"]).unwrap();
        session.choices_mut().move_down();
        session.pop_char();
        assert_eq!(session.query(), "");
        assert_eq!(session.choices().selected().map(Choice::id), Some(1));
    }

    #[test]
    fn test_pop_multibyte_char() {
        let mut session = Session::new(["日本", "中国"]).unwrap();
        session.push_char('日');
        assert_eq!(session.choices().visible(), vec![0]);
        session.pop_char();
        assert_eq!(session.query(), "");
        assert_eq!(session.choices().visible_count(), 2);
    }

    #[test]
    fn test_confirm_returns_value_and_id() {
        let mut session = Session::new(["a", "b", "c"]).unwrap();
        session.choices_mut().move_down();
        session.choices_mut().move_down();
        session.confirm();
        assert_eq!(
            session.result().unwrap(),
            Picked {
                value: "c".to_string(),
                id: 2
            }
        );
    }

    #[test]
    fn test_abort_clears_selection() {
        let mut session = Session::new(["x", "y"]).unwrap();
        session.abort();
        assert_eq!(session.outcome(), Outcome::Aborted);
        assert!(session.choices().selected().is_none());
        assert!(matches!(session.result(), Err(PickError::NoSelection)));
    }

    #[test]
    fn test_confirm_with_nothing_visible() {
        let mut session = Session::new(["x", "y"]).unwrap();
        session.push_char('z');
        session.confirm();
        assert!(matches!(session.result(), Err(PickError::NoSelection)));
    }

    #[test]
    fn test_pending_result_is_internal_fault() {
        let session = Session::new(["x"]).unwrap();
        assert!(matches!(session.result(), Err(PickError::Internal(_))));
    }

    #[test]
    fn test_finished_session_ignores_edits() {
        let mut session = Session::new(["x", "y"]).unwrap();
        session.confirm();
        session.push_char('y');
        session.abort();
        assert_eq!(session.query(), "");
        assert_eq!(session.outcome(), Outcome::Confirmed);
    }

    #[test]
    fn test_hidden_selection_is_internal_fault() {
        let mut session = Session::new(["x", "y"]).unwrap();
        session.choices_mut().choices_mut()[0].hidden = true;
        session.confirm();
        assert!(matches!(session.result(), Err(PickError::Internal(_))));
    }

    #[test]
    fn test_lost_selection_with_visible_choices_is_internal_fault() {
        let mut session = Session::new(["x", "y"]).unwrap();
        session.choices_mut().clear_selection();
        session.confirm();
        assert!(matches!(session.result(), Err(PickError::Internal(_))));
    }
}
