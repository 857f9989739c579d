//! Common UI components shared across the dashboard.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::render::TextId;
use crate::scheduler::PollState;

/// Render the header bar with the temperature readouts.
///
/// Displays: title, firmware version, air/water temperatures, poll activity.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let board = app.gauges.target();

    let mut spans = vec![Span::styled(
        " POOL MANAGER ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(version) = app.firmware_version {
        spans.push(Span::styled(
            format!("fw {} ", version),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    for id in TextId::ALL {
        spans.push(Span::raw("│ "));
        spans.push(Span::raw(format!("{} ", id.label())));
        spans.push(Span::styled(
            format!("{} ", board.text(id).unwrap_or("--")),
            Style::default().fg(app.theme.highlight),
        ));
    }

    if app.is_polling() {
        spans.push(Span::styled(
            "│ ⟳",
            Style::default().fg(app.theme.highlight),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows: data source, time since last update, last error, available controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph = Paragraph::new(format!(" {} ", msg))
            .style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some((target, err)) = app.last_error() {
        let paragraph = Paragraph::new(format!(
            " {} | {} {} error: {} | r:retry q:quit",
            app.source_description(),
            target.label(),
            err.kind(),
            err
        ))
        .style(Style::default().fg(app.theme.error));
        frame.render_widget(paragraph, area);
        return;
    }

    let updated = match app.last_gauge_update {
        Some(at) => format!("Updated {:.1}s ago", at.elapsed().as_secs_f64()),
        None if app.gauge_poll == PollState::Polling => "Loading...".to_string(),
        None => "Waiting for data".to_string(),
    };

    let status = format!(
        " {} | {} | r:refresh t:time ?:help q:quit",
        app.source_description(),
        updated
    );
    let paragraph = Paragraph::new(status)
        .style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  r         Refresh control table"),
        Line::from("  t         Toggle ISO / time-of-day"),
        Line::from("  ?         Toggle this help"),
        Line::from("  q / Esc   Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 10u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
