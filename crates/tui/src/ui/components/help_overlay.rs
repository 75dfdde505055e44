use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::Card,
            centered_rect,
            hints::{KeyHint, common, hints_to_spans},
            tabs,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    if !state.help {
        return;
    }

    let theme = Theme::default();
    let popup = centered_rect(70, 60, area);
    frame.render_widget(Clear, popup);
    let inner = Card::new("Keybinds", &theme)
        .focused(true)
        .render_frame(frame, popup);

    frame.render_widget(Paragraph::new(help_lines(&theme)), inner);
}

fn section(title: &'static str, hints: &[KeyHint], theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(title, Style::default().fg(theme.dim))),
        Line::from(hints_to_spans(hints, theme)),
        Line::default(),
    ]
}

fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(tabs::tab_shortcuts(theme)), Line::default()];

    let mut list = common::list_navigation();
    list.extend(common::crud_operations());
    lines.extend(section("Lists", &list, theme));
    lines.extend(section("Pages", &common::paging(), theme));
    lines.extend(section("Row actions", &common::row_menu(), theme));

    let mut form = common::form_editing();
    form.push(KeyHint::new("Space", "toggle"));
    form.push(KeyHint::new("←→", "account type"));
    lines.extend(section("Forms", &form, theme));
    lines.extend(section("Dropdowns", &common::dropdown(), theme));

    lines.push(Line::from(vec![
        Span::styled("Esc", Style::default().fg(theme.accent)),
        Span::raw(" close  "),
        Span::styled("Ctrl+C", Style::default().fg(theme.accent)),
        Span::raw(" quit"),
    ]));

    lines
}
