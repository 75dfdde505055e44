use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    forms::FieldView,
    select::AsyncSelect,
    ui::{
        components::{card::Card, centered_rect},
        theme::Theme,
    },
};

/// Options shown under a focused dropdown.
const VISIBLE_OPTIONS: usize = 6;

pub fn render_modal(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    fields: &[FieldView<'_>],
    can_submit: bool,
    theme: &Theme,
) {
    let popup = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup);
    let inner = Card::new(title, theme).focused(true).render_frame(frame, popup);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .margin(1)
        .split(inner);

    let mut lines = Vec::new();
    for field in fields {
        lines.push(field_line(field, theme));
        if field.focused
            && let Some(select) = field.select
        {
            lines.extend(option_lines(select, theme));
        }
    }
    frame.render_widget(Paragraph::new(lines), layout[0]);

    let submit_style = if can_submit {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
    };
    let footer = Line::from(vec![
        Span::styled("Enter", submit_style),
        Span::raw(" save  "),
        Span::styled("Tab", Style::default().fg(theme.accent)),
        Span::raw(" next  "),
        Span::styled("Esc", Style::default().fg(theme.accent)),
        Span::raw(" cancel"),
    ]);
    frame.render_widget(Paragraph::new(footer), layout[1]);
}

fn field_line(field: &FieldView<'_>, theme: &Theme) -> Line<'static> {
    let marker = if field.required { "*" } else { "" };
    let label_style = if field.focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    let cursor = if field.focused && field.select.is_none() {
        "│"
    } else {
        ""
    };

    Line::from(vec![
        Span::styled(format!("{:<14}", format!("{}{marker}", field.label)), label_style),
        Span::styled(
            format!("{}{cursor}", field.value),
            Style::default().fg(theme.text),
        ),
    ])
}

fn option_lines(select: &AsyncSelect, theme: &Theme) -> Vec<Line<'static>> {
    let options = select.options();
    let start = select
        .highlighted()
        .saturating_sub(VISIBLE_OPTIONS.saturating_sub(1));

    let mut lines = options
        .iter()
        .enumerate()
        .skip(start)
        .take(VISIBLE_OPTIONS)
        .map(|(index, option)| {
            let chosen = select.selected() == Some(option.id);
            let prefix = if chosen { "● " } else { "  " };
            let style = if index == select.highlighted() {
                Style::default().bg(theme.highlight).fg(theme.accent)
            } else if option.is_placeholder() {
                Style::default().fg(theme.dim)
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(Span::styled(
                format!("{:14}{prefix}{}", "", option.label),
                style,
            ))
        })
        .collect::<Vec<_>>();

    let status = if select.is_loading() {
        Some("Loading...")
    } else if options.is_empty() {
        Some("No options")
    } else if select.has_next_page() {
        Some("more...")
    } else {
        None
    };
    if let Some(status) = status {
        lines.push(Line::from(Span::styled(
            format!("{:14}  {status}", ""),
            Style::default().fg(theme.dim),
        )));
    }
    lines
}
