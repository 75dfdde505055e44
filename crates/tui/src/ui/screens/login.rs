use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::AppState,
    ui::{components::centered_box, theme::Theme},
};

/// Token prompt shown when no access token is configured.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let card_area = centered_box(48, 7, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" access token ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Backend
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Token
        ])
        .margin(1)
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            state.base_url.as_str(),
            Style::default().fg(theme.dim),
        )),
        rows[0],
    );

    let prompt = &state.token_prompt;
    let display = format!("{}│", mask_token(&prompt.value));
    frame.render_widget(
        Paragraph::new(Span::styled(display, Style::default().fg(theme.accent))),
        rows[2],
    );

    if let Some(message) = &prompt.message {
        let error_area = Rect {
            x: card_area.x,
            y: card_area.y + card_area.height,
            width: card_area.width,
            height: 1,
        }
        .intersection(area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            error_area,
        );
    }
}

/// One bullet per character.
fn mask_token(token: &str) -> String {
    "•".repeat(token.chars().count())
}
