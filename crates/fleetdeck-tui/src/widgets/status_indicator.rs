//! Colored status glyphs for table cells.

use ratatui::style::Style;
use ratatui::text::Span;

use fleetdeck_core::model::{AlertStatus, WarehouseStatus};

use crate::theme;

/// Colored dot + label for a warehouse status.
pub fn warehouse_status_span(status: WarehouseStatus) -> Span<'static> {
    let (glyph, color) = match status {
        WarehouseStatus::Active => ("● ACTIVE", theme::SUCCESS_GREEN),
        WarehouseStatus::Inactive => ("○ INACTIVE", theme::BORDER_GRAY),
        WarehouseStatus::Suspended => ("◌ SUSPENDED", theme::WARNING_YELLOW),
    };
    Span::styled(glyph, Style::default().fg(color))
}

/// Colored dot + label for an alert status.
pub fn alert_status_span(status: AlertStatus) -> Span<'static> {
    match status {
        AlertStatus::Active => {
            Span::styled("● ACTIVE", Style::default().fg(theme::ERROR_RED))
        }
        AlertStatus::Resolved => {
            Span::styled("○ RESOLVED", Style::default().fg(theme::SUCCESS_GREEN))
        }
    }
}
