pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, Screen, Section},
    forms::FieldView,
    page::ResourcePage,
    resources::Resource,
    ui::components::hints::{self, KeyHint, common},
};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.screen {
        Screen::TokenPrompt => screens::login::render(frame, area, state),
        Screen::Main => render_shell(frame, area, state),
    }
    components::toast::render(frame, area, state.toasts.current());
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    let pages = &state.pages;
    match state.section {
        Section::AccountTypes => screens::resource::render(frame, layout[2], &pages.account_types),
        Section::Accounts => screens::resource::render(frame, layout[2], &pages.accounts),
        Section::Categories => screens::resource::render(frame, layout[2], &pages.categories),
        Section::Transactions => screens::resource::render(frame, layout[2], &pages.transactions),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    components::help_overlay::render(frame, area, state);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(" Pocketbook", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("Backend", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", state.base_url)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    let context = context_hints(state);
    if !context.is_empty() {
        parts.push(hints::hint_separator(theme));
        parts.extend(hints::hints_to_spans(&context, theme));
    }

    parts.push(hints::hint_separator(theme));
    parts.extend(hints::hints_to_spans(&common::global_shortcuts(), theme));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// Hints for whatever currently has focus on the active page.
fn context_hints(state: &AppState) -> Vec<KeyHint> {
    let pages = &state.pages;
    match state.section {
        Section::AccountTypes => page_hints(&pages.account_types),
        Section::Accounts => page_hints(&pages.accounts),
        Section::Categories => page_hints(&pages.categories),
        Section::Transactions => page_hints(&pages.transactions),
    }
}

fn page_hints<R: Resource>(page: &ResourcePage<R>) -> Vec<KeyHint> {
    use crate::forms::Form;

    let modal = page.modal();
    if modal.is_open() {
        let fields = modal.form().fields();
        let on_dropdown = fields
            .iter()
            .any(|field: &FieldView<'_>| field.focused && field.select.is_some());
        return if on_dropdown {
            common::dropdown()
        } else {
            common::form_editing()
        };
    }
    if page.row_menu().is_some() {
        return common::row_menu();
    }

    let mut hints = common::list_navigation();
    hints.extend(common::crud_operations());
    hints.extend(common::paging());
    hints
}
