use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{resources::Column, ui::theme::Theme};

/// Renders rows under `columns`. An empty list shows `empty_message` as a
/// single line across the full table width.
pub fn render_table(
    frame: &mut Frame<'_>,
    area: Rect,
    columns: &[Column],
    rows: Vec<Vec<String>>,
    selected: Option<usize>,
    empty_message: &str,
    theme: &Theme,
) {
    let widths = columns
        .iter()
        .map(|column| Constraint::Percentage(column.width))
        .collect::<Vec<_>>();
    let header = Row::new(
        columns
            .iter()
            .map(|column| Cell::from(column.header))
            .collect::<Vec<_>>(),
    )
    .style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    if rows.is_empty() {
        let [header_area, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
        frame.render_widget(
            Table::new(Vec::<Row>::new(), widths.clone()).header(header),
            header_area,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                empty_message.to_string(),
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            body,
        );
        return;
    }

    let rows = rows
        .into_iter()
        .map(|cells| Row::new(cells.into_iter().map(Cell::from).collect::<Vec<_>>()))
        .collect::<Vec<_>>();
    let table = Table::new(rows, widths)
        .header(header)
        .style(Style::default().fg(theme.text))
        .row_highlight_style(Style::default().bg(theme.highlight).fg(theme.accent))
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut state);
}
