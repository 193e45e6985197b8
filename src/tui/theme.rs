//! Picker colours.
//!
//! This module provides the `Theme` struct holding the four cosmetic options
//! of the picker: base text colour, background colour, the text colour of
//! the highlighted row and whether that row is bold. Themes never affect
//! navigation or filtering.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Colours used to draw the prompt and the choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Foreground of the prompt and unselected rows.
    pub text_color: Color,
    /// Background of the whole surface.
    pub background_color: Color,
    /// Foreground of the highlighted row.
    pub selected_text_color: Color,
    /// Whether the highlighted row is drawn bold.
    pub selected_text_bold: bool,
}

impl Theme {
    /// White on black, highlighted row not bold (default).
    pub fn dark() -> Self {
        Self {
            text_color: Color::White,
            background_color: Color::Black,
            selected_text_color: Color::White,
            selected_text_bold: false,
        }
    }

    /// Style of the prompt and unselected rows.
    #[must_use]
    pub fn base_style(&self) -> Style {
        Style::default()
            .fg(self.text_color)
            .bg(self.background_color)
    }

    /// Style of the highlighted row.
    #[must_use]
    pub fn selected_style(&self) -> Style {
        let style = Style::default()
            .fg(self.selected_text_color)
            .bg(self.background_color);
        if self.selected_text_bold {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_white_on_black() {
        let theme = Theme::default();
        assert_eq!(theme.text_color, Color::White);
        assert_eq!(theme.background_color, Color::Black);
        assert!(!theme.selected_text_bold);
    }

    #[test]
    fn test_selected_style_bold() {
        let mut theme = Theme::dark();
        assert!(!theme.selected_style().add_modifier.contains(Modifier::BOLD));

        theme.selected_text_bold = true;
        theme.selected_text_color = Color::Yellow;
        let style = theme.selected_style();
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(style.fg, Some(Color::Yellow));
        assert_eq!(style.bg, Some(Color::Black));
    }

    #[test]
    fn test_base_style() {
        let theme = Theme {
            text_color: Color::Black,
            background_color: Color::White,
            ..Theme::default()
        };
        let style = theme.base_style();
        assert_eq!(style.fg, Some(Color::Black));
        assert_eq!(style.bg, Some(Color::White));
        assert!(!style.add_modifier.contains(Modifier::BOLD));
    }
}
