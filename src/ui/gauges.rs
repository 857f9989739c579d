//! Gauge panel rendering.
//!
//! Draws the nine gauges in a 3x3 grid. A gauge that has never received a
//! value is drawn empty with a `--` label.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::app::App;
use crate::render::GaugeId;

/// Render the gauge grid.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([Constraint::Ratio(1, 3); 3]).split(area);
    let board = app.gauges.target();

    for (row_area, ids) in rows.iter().zip(GaugeId::ALL.chunks(3)) {
        let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]);
        let cells = columns.split(*row_area);
        for (cell, id) in cells.iter().zip(ids) {
            let value = board.value(*id);
            let (ratio, in_range) = match value {
                Some(v) => scale(*id, v),
                None => (0.0, true),
            };
            let color = if in_range {
                app.theme.gauge
            } else {
                app.theme.gauge_out_of_range
            };

            let gauge = Gauge::default()
                .block(
                    Block::default()
                        .title(format!(" {} ", id.title()))
                        .borders(Borders::ALL)
                        .border_type(app.theme.border_type)
                        .border_style(Style::default().fg(app.theme.border)),
                )
                .gauge_style(Style::default().fg(color))
                .ratio(ratio)
                .label(value_label(*id, value));

            frame.render_widget(gauge, *cell);
        }
    }
}

/// Position of `value` on the gauge dial, clamped to `0.0..=1.0`, and
/// whether the value lies within the dial's range.
pub fn scale(id: GaugeId, value: f64) -> (f64, bool) {
    let (min, max) = id.range();
    if !value.is_finite() {
        return (0.0, false);
    }
    let ratio = (value - min) / (max - min);
    (ratio.clamp(0.0, 1.0), (min..=max).contains(&value))
}

fn value_label(id: GaugeId, value: Option<f64>) -> String {
    let Some(value) = value else {
        return "--".to_string();
    };
    let precision = match id {
        GaugeId::Ph | GaugeId::Pressure => 2,
        GaugeId::Orp | GaugeId::Filtration | GaugeId::PhTankFill | GaugeId::ChlorineTankFill => 0,
        _ => 1,
    };
    let unit = id.unit();
    if unit.is_empty() {
        format!("{:.*}", precision, value)
    } else {
        format!("{:.*} {}", precision, value, unit)
    }
}
