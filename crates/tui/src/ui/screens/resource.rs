use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    forms::Form,
    page::{ResourcePage, RowMenuItem},
    resources::Resource,
    ui::{
        components::{card::Card, centered_box, modal, table},
        theme::Theme,
    },
};

pub fn render<R: Resource>(frame: &mut Frame<'_>, area: Rect, page: &ResourcePage<R>) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let inner = Card::new(R::TITLE_PLURAL, &theme)
        .focused(!page.modal().is_open())
        .render_frame(frame, layout[0]);
    let rows = page.items().iter().map(R::cells).collect::<Vec<_>>();
    let selected = (!rows.is_empty()).then_some(page.selected());
    table::render_table(
        frame,
        inner,
        R::columns(),
        rows,
        selected,
        R::EMPTY_MESSAGE,
        &theme,
    );

    render_status(frame, layout[1], page, &theme);

    if let Some(item) = page.row_menu() {
        render_row_menu(frame, area, item, &theme);
    }

    let modal = page.modal();
    if modal.is_open() {
        let form = modal.form();
        modal::render_modal(
            frame,
            area,
            &modal.title(),
            &form.fields(),
            form.can_submit(),
            &theme,
        );
    }
}

fn render_status<R: Resource>(
    frame: &mut Frame<'_>,
    area: Rect,
    page: &ResourcePage<R>,
    theme: &Theme,
) {
    let mut spans = vec![Span::styled(
        format!(" {} total", page.count()),
        Style::default().fg(theme.dim),
    )];
    if page.has_previous() {
        spans.push(Span::styled("  ◀ prev", Style::default().fg(theme.accent)));
    }
    if page.has_next() {
        spans.push(Span::styled("  next ▶", Style::default().fg(theme.accent)));
    }
    if page.is_loading() {
        spans.push(Span::styled("  loading…", Style::default().fg(theme.warning)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_row_menu(frame: &mut Frame<'_>, area: Rect, active: RowMenuItem, theme: &Theme) {
    let popup = centered_box(20, 4, area);
    frame.render_widget(Clear, popup);
    let inner = Card::new("Actions", theme).focused(true).render_frame(frame, popup);

    let lines = RowMenuItem::ALL
        .iter()
        .map(|item| {
            let style = if *item == active {
                Style::default()
                    .fg(theme.accent)
                    .bg(theme.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(Span::styled(format!(" {}", item.label()), style))
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), inner);
}
