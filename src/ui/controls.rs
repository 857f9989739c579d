//! Control table rendering.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::app::App;

/// Width of the label column; fits the longest control label.
pub const LABEL_WIDTH: u16 = 25;
/// Width of the status column; fits an ISO-8601 timestamp with a UTC offset.
pub const VALUE_WIDTH: u16 = 25;
/// Outer width of the table: both columns, the column gap and the borders.
pub const TABLE_WIDTH: u16 = LABEL_WIDTH + 1 + VALUE_WIDTH + 2;

/// Render the control table exactly as last built by the renderer.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Controls [r:refresh] ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(table) = app.controls.target().table() else {
        frame.render_widget(block, area);
        return;
    };

    let header = Row::new(table.headers.iter().map(|h| Cell::from(*h)))
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.label),
                Cell::from(row.value.clone())
                    .style(app.theme.state_style(&row.value)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(LABEL_WIDTH),
        Constraint::Length(VALUE_WIDTH),
    ];

    let widget = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EpochStyle, TimeFormatter, Zone};
    use crate::render::control::labels;

    #[test]
    fn test_columns_fit_content() {
        for label in labels() {
            assert!(label.chars().count() <= LABEL_WIDTH as usize, "{}", label);
        }

        // Local rendering carries a `+HH:MM` offset instead of `Z`
        let formatter = TimeFormatter::new(Zone::Local, EpochStyle::Iso);
        let widest = formatter.format_epoch(1_700_000_000).chars().count();
        assert!(widest <= VALUE_WIDTH as usize);
    }
}
