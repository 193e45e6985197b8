//! End-to-end picking sessions driven by a scripted surface.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use listpick::tui::keybindings::{KeyBindings, KeybindingProfile};
use listpick::tui::{pick_with, InputEvent, PickerConfig, Surface};
use listpick::PickError;
use ratatui::style::Style;

#[derive(Debug, Default)]
struct Record {
    frames: Vec<Vec<String>>,
    dropped: bool,
}

/// Surface that replays input events and records every synchronized frame.
struct ScriptedSurface {
    columns: u16,
    rows: u16,
    events: VecDeque<InputEvent>,
    grid: Vec<Vec<char>>,
    record: Arc<Mutex<Record>>,
}

impl ScriptedSurface {
    fn new(columns: u16, rows: u16, events: Vec<InputEvent>) -> (Self, Arc<Mutex<Record>>) {
        let record = Arc::new(Mutex::new(Record::default()));
        let surface = Self {
            columns,
            rows,
            events: events.into(),
            grid: Vec::new(),
            record: Arc::clone(&record),
        };
        (surface, record)
    }
}

impl Surface for ScriptedSurface {
    fn size(&self) -> io::Result<(u16, u16)> {
        Ok((self.columns, self.rows))
    }

    fn clear(&mut self) -> io::Result<()> {
        self.grid = vec![vec![' '; usize::from(self.columns)]; usize::from(self.rows)];
        Ok(())
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str, _style: Style) {
        let Some(row) = self.grid.get_mut(usize::from(y)) else {
            return;
        };
        for (offset, c) in text.chars().enumerate() {
            if let Some(cell) = row.get_mut(usize::from(x) + offset) {
                *cell = c;
            }
        }
    }

    fn synchronize(&mut self) -> io::Result<()> {
        let frame = self
            .grid
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect();
        self.record.lock().unwrap().frames.push(frame);
        Ok(())
    }

    fn poll_event(&mut self) -> io::Result<InputEvent> {
        let event = self
            .events
            .pop_front()
            .ok_or_else(|| io::Error::other("script exhausted"))?;
        if let InputEvent::Resize(columns, rows) = event {
            self.columns = columns;
            self.rows = rows;
        }
        Ok(event)
    }
}

impl Drop for ScriptedSurface {
    fn drop(&mut self) {
        self.record.lock().unwrap().dropped = true;
    }
}

fn key(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn typed(text: &str) -> Vec<InputEvent> {
    text.chars().map(|c| key(KeyCode::Char(c))).collect()
}

fn standard() -> PickerConfig {
    PickerConfig {
        keybindings: KeyBindings::from_profile(KeybindingProfile::Standard),
        ..PickerConfig::default()
    }
}

#[test]
fn test_down_down_enter_picks_third() {
    let (surface, record) = ScriptedSurface::new(
        20,
        6,
        vec![key(KeyCode::Down), key(KeyCode::Down), key(KeyCode::Enter)],
    );

    let picked = pick_with(surface, "Pick:", ["a", "b", "c"], &PickerConfig::default()).unwrap();

    assert_eq!(picked.value, "c");
    assert_eq!(picked.id, 2);

    let record = record.lock().unwrap();
    assert!(record.dropped);
    assert_eq!(record.frames.len(), 3);
    assert_eq!(record.frames[0][..4], [" Pick:", " > a", "   b", "   c"]);
    assert_eq!(record.frames[2][..4], [" Pick:", "   a", "   b", " > c"]);
}

#[test]
fn test_search_then_confirm() {
    let mut events = typed("an");
    events.push(key(KeyCode::Enter));
    let (surface, record) = ScriptedSurface::new(30, 5, events);

    let picked = pick_with(
        surface,
        "Fruit:",
        ["apple", "banana", "cherry"],
        &PickerConfig::default(),
    )
    .unwrap();

    assert_eq!(picked.value, "banana");
    assert_eq!(picked.id, 1);

    let record = record.lock().unwrap();
    let last = record.frames.last().unwrap();
    assert_eq!(last[0], " Fruit: an");
    assert_eq!(last[1], " > banana");
    assert_eq!(last[2], "");
}

#[test]
fn test_empty_choices_never_render() {
    let (surface, record) = ScriptedSurface::new(20, 5, vec![key(KeyCode::Enter)]);

    let err = pick_with(surface, "Pick:", Vec::<String>::new(), &PickerConfig::default())
        .unwrap_err();

    assert!(matches!(err, PickError::NoChoices));
    let record = record.lock().unwrap();
    assert!(record.frames.is_empty());
    assert!(record.dropped);
}

#[test]
fn test_escape_aborts() {
    let (surface, record) = ScriptedSurface::new(20, 5, vec![key(KeyCode::Esc)]);

    let err = pick_with(surface, "Pick:", ["x", "y"], &PickerConfig::default()).unwrap_err();

    assert!(matches!(err, PickError::NoSelection));
    assert!(record.lock().unwrap().dropped);
}

#[test]
fn test_ctrl_c_aborts() {
    let ctrl_c = InputEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    let (surface, _record) = ScriptedSurface::new(20, 5, vec![ctrl_c]);

    let err = pick_with(surface, "Pick:", ["x", "y"], &standard()).unwrap_err();

    assert!(matches!(err, PickError::NoSelection));
}

#[test]
fn test_confirm_with_nothing_visible() {
    let mut events = typed("zz");
    events.push(key(KeyCode::Enter));
    let (surface, record) = ScriptedSurface::new(20, 5, events);

    let err = pick_with(surface, "Pick:", ["x", "y"], &PickerConfig::default()).unwrap_err();

    assert!(matches!(err, PickError::NoSelection));
    let record = record.lock().unwrap();
    assert_eq!(record.frames.last().unwrap()[..2], [" Pick: zz", ""]);
}

#[test]
fn test_backspace_restores_choices() {
    let mut events = typed("zz");
    events.push(key(KeyCode::Backspace));
    events.push(key(KeyCode::Backspace));
    events.push(key(KeyCode::Backspace));
    events.push(key(KeyCode::End));
    events.push(key(KeyCode::Enter));
    let (surface, _record) = ScriptedSurface::new(20, 5, events);

    let picked = pick_with(surface, "Pick:", ["x", "y"], &PickerConfig::default()).unwrap();

    assert_eq!(picked.value, "y");
}

#[test]
fn test_page_down_uses_terminal_height() {
    // 6 rows, 1 header row: page step is 4
    let (surface, _record) =
        ScriptedSurface::new(20, 6, vec![key(KeyCode::PageDown), key(KeyCode::Enter)]);
    let values: Vec<String> = (0..20).map(|i| format!("item{i}")).collect();

    let picked = pick_with(surface, "Pick:", values, &PickerConfig::default()).unwrap();

    assert_eq!(picked.id, 4);
    assert_eq!(picked.value, "item4");
}

#[test]
fn test_resize_changes_window() {
    let mut events = vec![key(KeyCode::Down); 5];
    events.push(InputEvent::Resize(20, 11));
    events.push(key(KeyCode::Enter));
    let (surface, record) = ScriptedSurface::new(20, 4, events);
    let values: Vec<String> = (0..10).map(|i| format!("item{i}")).collect();

    let picked = pick_with(surface, "P", values, &PickerConfig::default()).unwrap();
    assert_eq!(picked.id, 5);

    let record = record.lock().unwrap();
    // before the resize only three choice rows fit
    let before = &record.frames[5];
    assert_eq!(before, &[" P", "   item3", "   item4", " > item5"]);
    // afterwards the whole list fits again
    let after = record.frames.last().unwrap();
    assert_eq!(after.len(), 11);
    assert_eq!(after[1], "   item0");
    assert_eq!(after[6], " > item5");
    assert_eq!(after[10], "   item9");
}

#[test]
fn test_standard_profile_types_letters() {
    let mut events = typed("jk");
    events.push(key(KeyCode::Enter));
    let (surface, _record) = ScriptedSurface::new(20, 5, events);

    let picked = pick_with(surface, "Pick:", ["abc", "xjkx", "jk"], &standard()).unwrap();

    assert_eq!(picked.value, "xjkx");
    assert_eq!(picked.id, 1);
}

#[test]
fn test_surface_failure_is_reported() {
    let (surface, record) = ScriptedSurface::new(20, 5, vec![key(KeyCode::Down)]);

    let err = pick_with(surface, "Pick:", ["x", "y"], &PickerConfig::default()).unwrap_err();

    assert!(matches!(err, PickError::Surface(_)));
    assert!(record.lock().unwrap().dropped);
}

struct PanickingSurface;

impl Surface for PanickingSurface {
    fn size(&self) -> io::Result<(u16, u16)> {
        Ok((10, 5))
    }

    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn draw_text(&mut self, _x: u16, _y: u16, _text: &str, _style: Style) {}

    fn synchronize(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn poll_event(&mut self) -> io::Result<InputEvent> {
        panic!("input device vanished");
    }
}

#[test]
fn test_loop_death_is_internal_fault() {
    let err = pick_with(PanickingSurface, "Pick:", ["x"], &PickerConfig::default()).unwrap_err();

    assert!(matches!(err, PickError::Internal(_)));
}
