//! Alerts screen — vehicle alert list with a map-marker detail view and an
//! expandable ignition history.
//!
//! Alert data is client-side sample data (no backing endpoint yet); filters
//! are applied locally.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;
use tokio::sync::mpsc::UnboundedSender;

use fleetdeck_core::mock;
use fleetdeck_core::model::{Alert, AlertStatus, AlertType, IgnitionEvent};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::status_indicator;

pub struct AlertsScreen {
    focused: bool,
    alerts: Vec<Alert>,
    history: Vec<IgnitionEvent>,
    table_state: TableState,
    status_filter: Option<AlertStatus>,
    type_filter: Option<AlertType>,
    detail_open: bool,
    history_expanded: bool,
}

impl AlertsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            alerts: mock::vehicle_alerts(),
            history: mock::ignition_history(),
            table_state: TableState::default(),
            status_filter: None,
            type_filter: None,
            detail_open: false,
            history_expanded: false,
        }
    }

    fn filtered(&self) -> Vec<&Alert> {
        self.alerts
            .iter()
            .filter(|a| self.status_filter.is_none_or(|s| a.status == s))
            .filter(|a| self.type_filter.is_none_or(|t| a.alert_type == t))
            .collect()
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected_alert(&self) -> Option<Alert> {
        self.filtered()
            .get(self.selected_index())
            .map(|a| (*a).clone())
    }

    fn select(&mut self, idx: usize) {
        let len = self.filtered().len();
        let clamped = if len == 0 { 0 } else { idx.min(len - 1) };
        self.table_state.select(Some(clamped));
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.filtered().len();
        if len == 0 {
            return;
        }
        let current = self.selected_index() as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.select(next as usize);
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(1), // filter line
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(area);

        let status_label = self
            .status_filter
            .map_or_else(|| "all".into(), |s| s.to_string());
        let type_label = self.type_filter.map_or("all", |t| t.label());

        let filter_line = Line::from(vec![
            Span::styled(" Status: ", Style::default().fg(theme::DIM_WHITE)),
            Span::styled(
                format!("[{status_label}]"),
                Style::default().fg(theme::ACCENT_TEAL),
            ),
            Span::styled("  Type: ", Style::default().fg(theme::DIM_WHITE)),
            Span::styled(
                format!("[{type_label}]"),
                Style::default().fg(theme::ACCENT_TEAL),
            ),
            Span::styled("  (sample data)", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(filter_line), layout[0]);

        let filtered = self.filtered();
        if filtered.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  No alerts match the active filters",
                    Style::default().fg(theme::BORDER_GRAY),
                ))),
                layout[1],
            );
        } else {
            let header = Row::new(vec![
                Cell::from("Vehicle").style(theme::table_header()),
                Cell::from("IMEI").style(theme::table_header()),
                Cell::from("Type").style(theme::table_header()),
                Cell::from("Status").style(theme::table_header()),
                Cell::from("Time").style(theme::table_header()),
            ]);

            let selected = self.selected_index();
            let rows: Vec<Row> = filtered
                .iter()
                .enumerate()
                .map(|(i, alert)| {
                    let is_selected = i == selected;
                    let prefix = if is_selected { "▸" } else { " " };

                    let type_color = match alert.alert_type {
                        AlertType::Tamper => theme::ERROR_RED,
                        AlertType::PowerCut => theme::WARNING_YELLOW,
                    };

                    let row_style = if is_selected {
                        theme::table_selected()
                    } else {
                        theme::table_row()
                    };

                    Row::new(vec![
                        Cell::from(format!("{prefix}{}", alert.vehicle_number)).style(
                            Style::default().fg(theme::ACCENT_TEAL).add_modifier(
                                if is_selected {
                                    Modifier::BOLD
                                } else {
                                    Modifier::empty()
                                },
                            ),
                        ),
                        Cell::from(alert.imei.clone()),
                        Cell::from(alert.alert_type.label().to_owned())
                            .style(Style::default().fg(type_color)),
                        Cell::from(Line::from(status_indicator::alert_status_span(
                            alert.status,
                        ))),
                        Cell::from(alert.timestamp.format("%Y-%m-%d %H:%M").to_string()),
                    ])
                    .style(row_style)
                })
                .collect();

            let widths = [
                Constraint::Length(14),
                Constraint::Length(17),
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Min(16),
            ];

            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::table_selected());

            let mut state = self.table_state;
            frame.render_stateful_widget(table, layout[1], &mut state);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("f/F ", theme::key_hint_key()),
            Span::styled("filters  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("detail", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, alert: &Alert) {
        let chunks =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(area);

        self.render_detail_info(frame, chunks[0], alert);
        render_position_map(frame, chunks[1], alert);
    }

    fn render_detail_info(&self, frame: &mut Frame, area: Rect, alert: &Alert) {
        let block = Block::default()
            .title(format!(" {} ", alert.vehicle_number))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  IMEI      ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(alert.imei.clone(), Style::default().fg(theme::ACCENT_TEAL)),
            ]),
            Line::from(vec![
                Span::styled("  Type      ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    alert.alert_type.label(),
                    Style::default().fg(match alert.alert_type {
                        AlertType::Tamper => theme::ERROR_RED,
                        AlertType::PowerCut => theme::WARNING_YELLOW,
                    }),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Status    ", Style::default().fg(theme::DIM_WHITE)),
                status_indicator::alert_status_span(alert.status),
            ]),
            Line::from(vec![
                Span::styled("  Time      ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    alert.timestamp.format("%Y-%m-%d %H:%M UTC").to_string(),
                    Style::default().fg(theme::DIM_WHITE),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Position  ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    format!("{:.4}, {:.4}", alert.latitude, alert.longitude),
                    Style::default().fg(theme::SIGNAL_BLUE),
                ),
            ]),
            Line::from(""),
        ];

        // Expandable ignition history — sample data, not derived from the
        // alert record.
        let arrow = if self.history_expanded { "▾" } else { "▸" };
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {arrow} Ignition history "),
                theme::table_header(),
            ),
            Span::styled("(sample data, h to toggle)", theme::key_hint()),
        ]));

        if self.history_expanded {
            for event in &self.history {
                let (state, color) = if event.ignition_on {
                    ("ON ", theme::SUCCESS_GREEN)
                } else {
                    ("OFF", theme::BORDER_GRAY)
                };
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("    {}  ", event.timestamp.format("%m-%d %H:%M")),
                        Style::default().fg(theme::DIM_WHITE),
                    ),
                    Span::styled(state, Style::default().fg(color)),
                    Span::styled(
                        format!("  {}", event.location),
                        Style::default().fg(theme::DIM_WHITE),
                    ),
                ]));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Esc back",
            theme::key_hint(),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Braille canvas with a single marker at the alert position.
fn render_position_map(frame: &mut Frame, area: Rect, alert: &Alert) {
    let block = Block::default()
        .title(" Position ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default());

    let lat = alert.latitude;
    let lng = alert.longitude;
    let marker_label = format!("⊙ {}", alert.vehicle_number);

    let canvas = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .x_bounds([lng - 12.0, lng + 12.0])
        .y_bounds([lat - 9.0, lat + 9.0])
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: theme::BORDER_GRAY,
                resolution: MapResolution::High,
            });
            ctx.print(
                lng,
                lat,
                Line::from(Span::styled(
                    marker_label.clone(),
                    Style::default()
                        .fg(theme::ERROR_RED)
                        .add_modifier(Modifier::BOLD),
                )),
            );
        });

    frame.render_widget(canvas, area);
}

impl Component for AlertsScreen {
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.detail_open {
            return match key.code {
                KeyCode::Esc => {
                    self.detail_open = false;
                    Ok(None)
                }
                KeyCode::Char('h') => {
                    self.history_expanded = !self.history_expanded;
                    Ok(None)
                }
                _ => Ok(None),
            };
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.select(0);
                Ok(None)
            }
            KeyCode::Char('G') => {
                let len = self.filtered().len();
                if len > 0 {
                    self.select(len - 1);
                }
                Ok(None)
            }
            KeyCode::Char('f') => {
                self.status_filter = match self.status_filter {
                    None => Some(AlertStatus::Active),
                    Some(AlertStatus::Active) => Some(AlertStatus::Resolved),
                    Some(AlertStatus::Resolved) => None,
                };
                self.select(0);
                Ok(None)
            }
            KeyCode::Char('F') => {
                self.type_filter = match self.type_filter {
                    None => Some(AlertType::Tamper),
                    Some(AlertType::Tamper) => Some(AlertType::PowerCut),
                    Some(AlertType::PowerCut) => None,
                };
                self.select(0);
                Ok(None)
            }
            KeyCode::Enter => {
                if self.selected_alert().is_some() {
                    self.detail_open = true;
                    self.history_expanded = false;
                }
                Ok(None)
            }
            KeyCode::Esc => Ok(Some(Action::GoBack)),
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let count = self.filtered().len();
        let block = Block::default()
            .title(format!(" Vehicle alerts ({count}) "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.detail_open {
            if let Some(alert) = self.selected_alert() {
                self.render_detail(frame, inner, &alert);
                return;
            }
        }

        self.render_list(frame, inner);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Alerts"
    }
}
