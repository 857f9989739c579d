//! Terminal rendering of the dashboard.
//!
//! ```text
//! ┌ header: title, temperatures ─────────────────────────────┐
//! ├ gauges (3x3) ──────────────────────┬ control table ──────┤
//! │                                    │ Control   Status    │
//! │                                    │ ...                 │
//! ├ status bar ────────────────────────┴─────────────────────┤
//! ```

pub mod common;
pub mod controls;
pub mod gauges;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Minimum terminal size for a usable display.
pub const MIN_WIDTH: u16 = 90;
pub const MIN_HEIGHT: u16 = 16;

/// Draw the full dashboard into the frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5);
        frame.render_widget(paragraph, centered.intersection(area));
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Min(12),   // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    let content = Layout::horizontal([
        Constraint::Fill(1),                       // Gauges
        Constraint::Length(controls::TABLE_WIDTH), // Control table
    ])
    .split(chunks[1]);

    common::render_header(frame, app, chunks[0]);
    gauges::render(frame, app, content[0]);
    controls::render(frame, app, content[1]);
    common::render_status_bar(frame, app, chunks[2]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}
