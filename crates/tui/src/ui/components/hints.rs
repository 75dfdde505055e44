use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

/// Creates a separator span for dividing hint groups.
pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Common hint groups for reuse across screens.
pub mod common {
    use super::KeyHint;

    pub fn list_navigation() -> Vec<KeyHint> {
        vec![KeyHint::new("↑↓", "select"), KeyHint::new("Enter", "actions")]
    }

    pub fn crud_operations() -> Vec<KeyHint> {
        vec![
            KeyHint::new("a", "add"),
            KeyHint::new("e", "edit"),
            KeyHint::new("d", "delete"),
        ]
    }

    pub fn paging() -> Vec<KeyHint> {
        vec![
            KeyHint::new("n", "next"),
            KeyHint::new("p", "prev"),
            KeyHint::new("r", "reload"),
        ]
    }

    pub fn row_menu() -> Vec<KeyHint> {
        vec![
            KeyHint::new("↑↓", "choose"),
            KeyHint::new("Enter", "confirm"),
            KeyHint::new("Esc", "close"),
        ]
    }

    pub fn form_editing() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("Enter", "save"),
            KeyHint::new("Esc", "cancel"),
        ]
    }

    /// Dropdown fields inside a form.
    pub fn dropdown() -> Vec<KeyHint> {
        vec![
            KeyHint::new("type", "search"),
            KeyHint::new("↑↓", "browse"),
            KeyHint::new("→", "pick"),
            KeyHint::new("Del", "clear"),
        ]
    }

    pub fn global_shortcuts() -> Vec<KeyHint> {
        vec![KeyHint::new("?", "help"), KeyHint::new("q", "quit")]
    }
}
