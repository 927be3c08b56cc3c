//! Shared rendering for form overlays.
//!
//! Both create/edit forms render as a vertical list of labeled fields with
//! the validation error (if any) directly under the offending field. Only
//! the rendering lives here; field state belongs to the core form models.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::theme;

/// How a field presents and accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, edited in place.
    Text,
    /// Cycles through fixed options with ←/→.
    Choice,
    /// Visible but not editable (immutable post-creation, or gated off).
    Locked,
}

/// One renderable field row.
pub struct FieldRow<'a> {
    pub label: &'a str,
    pub value: String,
    pub kind: FieldKind,
    pub error: Option<&'a str>,
    pub focused: bool,
}

impl FieldRow<'_> {
    /// Lines for this field: the field line plus an optional error line.
    pub fn lines(&self) -> Vec<Line<'static>> {
        let marker = if self.focused { "▸ " } else { "  " };

        let value_style = match self.kind {
            FieldKind::Locked => Style::default().fg(theme::BORDER_GRAY),
            _ if self.focused => Style::default()
                .fg(theme::ACCENT_AMBER)
                .add_modifier(Modifier::BOLD),
            _ => Style::default().fg(theme::DIM_WHITE),
        };

        let shown = match self.kind {
            FieldKind::Choice => format!("‹ {} ›", self.value),
            _ if self.value.is_empty() => "\u{2500}".into(),
            _ => self.value.clone(),
        };

        let cursor = if self.focused && self.kind == FieldKind::Text {
            "█"
        } else {
            ""
        };

        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("{marker}{:<18}", self.label),
                Style::default().fg(theme::ACCENT_TEAL),
            ),
            Span::styled(format!("{shown}{cursor}"), value_style),
        ])];

        if let Some(error) = self.error {
            lines.push(Line::from(Span::styled(
                format!("    {error}"),
                theme::field_error(),
            )));
        }

        lines
    }
}
