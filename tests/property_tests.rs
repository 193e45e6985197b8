use listpick::picker::{compute_page_size, ChoiceStore, Direction, Session, Viewport};
use listpick::tui::{Action, App};
use proptest::prelude::*;

fn values() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-c]{0,4}", 1..30)
}

proptest! {
    #[test]
    fn test_downs_reach_last_and_stop(values in values()) {
        let mut store = ChoiceStore::new(values.clone());
        let n = values.len();

        for _ in 0..n.saturating_sub(1) {
            store.move_selection(Direction::Down, 1);
        }
        prop_assert_eq!(store.selected().map(|c| c.id()), Some(n - 1));

        let again = store.move_selection(Direction::Down, 1).map(|c| c.id());
        prop_assert_eq!(again, Some(n - 1));
    }

    #[test]
    fn test_home_and_end(values in values(), query in "[a-c]{0,2}", steps in 0usize..10) {
        let mut store = ChoiceStore::new(values);
        store.apply_query(&query);
        for _ in 0..steps {
            store.move_selection(Direction::Down, 1);
        }
        let visible = store.visible();

        let first = store.move_to_first().map(|c| c.id());
        prop_assert_eq!(first, visible.first().copied());

        let last = store.move_to_last().map(|c| c.id());
        prop_assert_eq!(last, visible.last().copied());
    }

    #[test]
    fn test_query_visible_set(values in values(), query in "[a-c]{0,3}") {
        let mut store = ChoiceStore::new(values.clone());
        store.apply_query(&query);

        let expected: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.contains(query.as_str()))
            .map(|(id, _)| id)
            .collect();
        prop_assert_eq!(&store.visible(), &expected);
        prop_assert_eq!(store.selected().map(|c| c.id()), expected.first().copied());
        prop_assert!(store.iter().filter(|c| c.is_selected()).count() <= 1);
    }

    #[test]
    fn test_selection_always_visible(
        values in values(),
        keys in prop::collection::vec(0u8..6, 0..40),
    ) {
        let mut app = App::new("P", values).unwrap();
        for key in keys {
            match key {
                0 => { app.handle_action(Action::NavigateDown); }
                1 => { app.handle_action(Action::NavigateUp); }
                2 => { app.handle_action(Action::PageDown); }
                3 => { app.handle_action(Action::DeleteChar); }
                4 => app.handle_input('a'),
                _ => app.handle_input('b'),
            }
            let choices = app.session().choices();
            match app.selected() {
                Some(choice) => prop_assert!(choice.is_visible()),
                None => prop_assert_eq!(choices.visible_count(), 0),
            }
            prop_assert!(app.viewport().is_ok());
        }
    }

    #[test]
    fn test_backspace_on_empty_query_is_noop(values in values(), downs in 0usize..5) {
        let mut session = Session::new(values).unwrap();
        for _ in 0..downs {
            session.choices_mut().move_selection(Direction::Down, 1);
        }
        let before = session.choices().selected().map(|c| c.id());

        session.pop_char();

        prop_assert_eq!(session.query(), "");
        prop_assert_eq!(session.choices().selected().map(|c| c.id()), before);
        prop_assert_eq!(session.choices().visible_count(), session.choices().len());
    }

    #[test]
    fn test_page_moves_never_go_backwards(
        values in values(),
        rows in 0usize..50,
        header in 1usize..5,
    ) {
        let page = compute_page_size(rows, header);
        let mut store = ChoiceStore::new(values);

        let before = store.selected_position().unwrap_or(0);
        store.move_selection(Direction::Down, page);
        let after = store.selected_position().unwrap_or(0);
        prop_assert!(after >= before);
        prop_assert!(after < store.visible_count());

        store.move_selection(Direction::Up, page);
        prop_assert!(store.selected_position().unwrap_or(0) <= after);
    }

    #[test]
    fn test_viewport_contains_selection(
        header in 1usize..4,
        rows in 0usize..40,
        visible in 0usize..100,
        selected in 0usize..100,
    ) {
        let selected = if visible == 0 { None } else { Some(selected % visible) };
        let viewport = Viewport::compute(header, rows, selected, visible);

        prop_assert!(viewport.len <= rows.saturating_sub(header));
        prop_assert!(viewport.start + viewport.len <= visible);
        if let Some(position) = selected {
            if rows > header {
                prop_assert!(viewport.contains(position));
            }
        }
    }

    #[test]
    fn test_confirm_returns_visible_choice(values in values(), query in "[a-c]{0,2}") {
        let mut session = Session::new(values.clone()).unwrap();
        for c in query.chars() {
            session.push_char(c);
        }
        let selected = session.choices().selected().map(|c| c.id());
        session.confirm();

        match session.result() {
            Ok(picked) => {
                prop_assert_eq!(Some(picked.id), selected);
                prop_assert_eq!(&picked.value, &values[picked.id]);
                prop_assert!(picked.value.contains(query.as_str()));
            }
            Err(_) => prop_assert!(selected.is_none()),
        }
    }
}
