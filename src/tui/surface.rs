//! Display surface abstraction.
//!
//! # Overview
//!
//! The picking loop only talks to the terminal through the [`Surface`]
//! trait: it asks for the size, clears, draws styled text at cell
//! positions, synchronizes the frame to the screen and blocks for the next
//! input event.
//!
//! [`TerminalSurface`] is the real implementation. It stages draw calls in a
//! ratatui [`Buffer`] and flushes them through a ratatui [`Terminal`] on
//! [`Surface::synchronize`]. Events come from an [`EventSource`]; for a real
//! terminal that is [`CrosstermEvents`].
//!
//! # Terminal Management
//!
//! [`TerminalSurface::stderr`] takes over the terminal by:
//! - Enabling raw mode (unbuffered input, no echo)
//! - Entering the alternate screen buffer
//! - Hiding the cursor
//!
//! A [`TerminalGuard`] reverts all of this when the surface is dropped, on
//! every exit path including partial initialization and panics.

use std::io::{self, Stderr};
use std::panic::{self, PanicHookInfo};
use std::sync::Arc;
use std::thread;

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::Terminal;
use unicode_width::UnicodeWidthChar;

/// Input delivered by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized to `(columns, rows)`.
    Resize(u16, u16),
}

/// Abstract terminal the picker draws on.
///
/// Implementations release the terminal in `Drop`.
pub trait Surface {
    /// Size as `(columns, rows)`.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Start a new frame, filling it with the base style.
    fn clear(&mut self) -> io::Result<()>;

    /// Draw `text` starting at cell `(x, y)`.
    ///
    /// Each character advances the cursor by its display width. Text past
    /// the right edge is clipped.
    fn draw_text(&mut self, x: u16, y: u16, text: &str, style: Style);

    /// Push the current frame to the screen.
    fn synchronize(&mut self) -> io::Result<()>;

    /// Block until the next input event.
    fn poll_event(&mut self) -> io::Result<InputEvent>;
}

/// Blocking source of input events.
pub trait EventSource {
    /// Block until the next event.
    fn next_event(&mut self) -> io::Result<InputEvent>;
}

impl<F> EventSource for F
where
    F: FnMut() -> io::Result<InputEvent>,
{
    fn next_event(&mut self) -> io::Result<InputEvent> {
        self()
    }
}

/// Key and resize events read from the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<InputEvent> {
        loop {
            match event::read()? {
                Event::Key(key) => return Ok(InputEvent::Key(key)),
                Event::Resize(columns, rows) => return Ok(InputEvent::Resize(columns, rows)),
                other => log::trace!("Ignoring terminal event: {:?}", other),
            }
        }
    }
}

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Scoped ownership of the terminal modes.
///
/// Created before any terminal mode is changed, so dropping it after a
/// partial setup still restores whatever was changed. While alive it also
/// installs a panic hook that restores the terminal before the panic
/// message is printed.
pub struct TerminalGuard {
    previous_hook: Arc<PanicHook>,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen on stderr.
    ///
    /// # Errors
    ///
    /// Returns the I/O error of the first terminal command that fails. The
    /// terminal is restored before returning.
    pub fn acquire() -> io::Result<Self> {
        log::debug!("Setting up terminal");

        let previous_hook: Arc<PanicHook> = Arc::new(panic::take_hook());
        let chained = Arc::clone(&previous_hook);
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            chained(info);
        }));
        let guard = Self { previous_hook };

        terminal::enable_raw_mode()?;
        execute!(io::stderr(), EnterAlternateScreen, cursor::Hide)?;

        log::debug!("Terminal setup complete");
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
        // set_hook panics on a panicking thread; leave the chained hook in place
        if thread::panicking() {
            return;
        }
        let previous = Arc::clone(&self.previous_hook);
        panic::set_hook(Box::new(move |info| previous(info)));
    }
}

/// Restore the terminal to its original state.
///
/// Every step is attempted even if an earlier one fails.
fn restore_terminal() {
    log::debug!("Restoring terminal");
    let _ = terminal::disable_raw_mode();
    let _ = execute!(io::stderr(), LeaveAlternateScreen, cursor::Show);
}

/// [`Surface`] backed by a ratatui [`Terminal`].
pub struct TerminalSurface<B: Backend, E: EventSource> {
    terminal: Terminal<B>,
    events: E,
    staged: Buffer,
    base_style: Style,
    // Dropped last so the terminal is restored after ratatui lets go of it.
    _guard: Option<TerminalGuard>,
}

impl TerminalSurface<CrosstermBackend<Stderr>, CrosstermEvents> {
    /// Take over the controlling terminal, drawing to stderr.
    ///
    /// Stdout stays free for the picked value.
    ///
    /// # Errors
    ///
    /// Returns the I/O error of a failed terminal setup step; the terminal
    /// is restored before returning.
    pub fn stderr(base_style: Style) -> io::Result<Self> {
        let guard = TerminalGuard::acquire()?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;
        let mut surface = Self::new(terminal, CrosstermEvents, base_style);
        surface._guard = Some(guard);
        Ok(surface)
    }
}

impl<B: Backend, E: EventSource> TerminalSurface<B, E> {
    /// Wrap an already set-up terminal.
    pub fn new(terminal: Terminal<B>, events: E, base_style: Style) -> Self {
        Self {
            terminal,
            events,
            staged: Buffer::empty(Rect::default()),
            base_style,
            _guard: None,
        }
    }

    /// The wrapped terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend, E: EventSource> Surface for TerminalSurface<B, E> {
    fn size(&self) -> io::Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }

    fn clear(&mut self) -> io::Result<()> {
        let (width, height) = self.size()?;
        let area = Rect::new(0, 0, width, height);
        self.staged = Buffer::empty(area);
        self.staged.set_style(area, self.base_style);
        Ok(())
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str, style: Style) {
        let area = self.staged.area;
        if y >= area.bottom() {
            return;
        }

        let mut x = x;
        for c in text.chars() {
            let (symbol, width) = match c.width() {
                Some(0) => continue,
                Some(width) => (c, width as u16),
                None => (' ', 1),
            };
            if x.saturating_add(width) > area.right() {
                break;
            }
            if let Some(cell) = self.staged.cell_mut((x, y)) {
                cell.set_char(symbol).set_style(style);
            }
            // cells covered by a wide character stay blank
            for trailing in x + 1..x + width {
                if let Some(cell) = self.staged.cell_mut((trailing, y)) {
                    cell.reset();
                    cell.set_style(style);
                }
            }
            x += width;
        }
    }

    fn synchronize(&mut self) -> io::Result<()> {
        let staged = &self.staged;
        self.terminal.draw(|frame| {
            let target = frame.buffer_mut();
            let area = target.area.intersection(staged.area);
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    if let (Some(src), Some(dst)) = (staged.cell((x, y)), target.cell_mut((x, y))) {
                        *dst = src.clone();
                    }
                }
            }
        })?;
        Ok(())
    }

    fn poll_event(&mut self) -> io::Result<InputEvent> {
        let event = self.events.next_event()?;
        if let InputEvent::Resize(columns, rows) = event {
            log::debug!("Resize to {}x{}, forcing full redraw", columns, rows);
            self.terminal.autoresize()?;
            self.terminal.clear()?;
        }
        Ok(event)
    }
}
