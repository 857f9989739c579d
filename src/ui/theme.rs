//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for equipment that is running.
    pub on: Color,
    /// Color for fetch errors.
    pub error: Color,
    /// Fill color of gauge bars.
    pub gauge: Color,
    /// Fill color of gauges outside their nominal range.
    pub gauge_out_of_range: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            on: Color::Green,
            error: Color::Red,
            gauge: Color::Cyan,
            gauge_out_of_range: Color::Yellow,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            on: Color::Green,
            error: Color::Red,
            gauge: Color::Blue,
            gauge_out_of_range: Color::Magenta,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for an ON/OFF status cell.
    pub fn state_style(&self, value: &str) -> Style {
        match value {
            "ON" => Style::default().fg(self.on).add_modifier(Modifier::BOLD),
            "OFF" => Style::default().add_modifier(Modifier::DIM),
            _ => Style::default(),
        }
    }
}
