//! Devices screen — paginated, searchable, sortable table with a movement
//! detail panel and a create/edit form overlay.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;
use tokio::sync::mpsc::UnboundedSender;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use fleetdeck_core::{
    Device, DeviceColumn, DeviceForm, DeviceQuery, ListView, LocationType, SortOrder, Warehouse,
};

use crate::action::{Action, ConfirmAction, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{FieldKind, FieldRow};

// ── Form overlay state ──────────────────────────────────────────────

const FIELD_COUNT: usize = 6;
const F_IMEI: usize = 0;
const F_QR: usize = 1;
const F_LOCATION_TYPE: usize = 2;
const F_DETAIL: usize = 3;
const F_PROD_WAREHOUSE: usize = 4;
const F_REQUISITION: usize = 5;

struct DeviceFormUi {
    form: DeviceForm,
    focus: usize,
    input: Input,
    /// Option list for warehouse dropdowns, fetched once on mount.
    warehouses: Vec<Warehouse>,
    /// Inline submit-failure banner; the form stays populated.
    banner: Option<String>,
}

impl DeviceFormUi {
    fn new(form: DeviceForm) -> Self {
        let mut ui = Self {
            form,
            focus: 0,
            input: Input::default(),
            warehouses: Vec::new(),
            banner: None,
        };
        ui.sync_input();
        ui
    }

    fn field_kind(&self, idx: usize) -> FieldKind {
        match idx {
            F_IMEI if !self.form.imei_editable() => FieldKind::Locked,
            F_IMEI | F_QR | F_REQUISITION => FieldKind::Text,
            F_LOCATION_TYPE => FieldKind::Choice,
            F_DETAIL => match self.form.location_type {
                None => FieldKind::Locked,
                Some(LocationType::Warehouse) if !self.warehouses.is_empty() => FieldKind::Choice,
                Some(_) => FieldKind::Text,
            },
            F_PROD_WAREHOUSE => {
                if self.warehouses.is_empty() {
                    FieldKind::Text
                } else {
                    FieldKind::Choice
                }
            }
            _ => FieldKind::Text,
        }
    }

    fn text_value(&self, idx: usize) -> String {
        match idx {
            F_IMEI => self.form.imei.clone(),
            F_QR => self.form.qr_code.clone(),
            F_DETAIL => match self.form.location_type {
                Some(LocationType::ProductionFloor) => self.form.production_floor.clone(),
                Some(LocationType::Warehouse) => self.form.warehouse_id.clone(),
                Some(LocationType::FieldEngineer) => self.form.field_engineer_id.clone(),
                Some(LocationType::Vehicle) => self.form.vehicle_number.clone(),
                None => String::new(),
            },
            F_PROD_WAREHOUSE => self.form.production_warehouse_id.clone(),
            F_REQUISITION => self.form.installation_requisition_id.clone(),
            _ => String::new(),
        }
    }

    /// Load the focused field's current value into the editor.
    fn sync_input(&mut self) {
        self.input = Input::new(self.text_value(self.focus));
    }

    /// Write the editor's value back through the form setter.
    fn store_input(&mut self) {
        let value = self.input.value().to_owned();
        match self.focus {
            F_IMEI => self.form.set_imei(value),
            F_QR => self.form.set_qr_code(value),
            F_DETAIL => match self.form.location_type {
                Some(LocationType::ProductionFloor) => self.form.set_production_floor(value),
                Some(LocationType::Warehouse) => self.form.set_warehouse_id(value),
                Some(LocationType::FieldEngineer) => self.form.set_field_engineer_id(value),
                Some(LocationType::Vehicle) => self.form.set_vehicle_number(value),
                None => {}
            },
            F_PROD_WAREHOUSE => self.form.set_production_warehouse_id(value),
            F_REQUISITION => self.form.set_installation_requisition_id(value),
            _ => {}
        }
    }

    fn move_focus(&mut self, delta: isize) {
        let count = FIELD_COUNT as isize;
        self.focus = ((self.focus as isize + delta + count) % count) as usize;
        self.sync_input();
    }

    /// Cycle a choice field with ←/→.
    fn cycle_choice(&mut self, delta: isize) {
        match self.focus {
            F_LOCATION_TYPE => {
                const ORDER: [Option<LocationType>; 5] = [
                    None,
                    Some(LocationType::ProductionFloor),
                    Some(LocationType::Warehouse),
                    Some(LocationType::FieldEngineer),
                    Some(LocationType::Vehicle),
                ];
                let here = ORDER
                    .iter()
                    .position(|t| *t == self.form.location_type)
                    .unwrap_or(0) as isize;
                let next = (here + delta).rem_euclid(ORDER.len() as isize) as usize;
                self.form.set_location_type(ORDER[next]);
                self.sync_input();
            }
            F_DETAIL => {
                // Warehouse dropdown
                let ids: Vec<String> = self.warehouses.iter().map(|w| w.id.clone()).collect();
                if ids.is_empty() {
                    return;
                }
                let here = ids
                    .iter()
                    .position(|id| *id == self.form.warehouse_id)
                    .map_or(-1, |p| p as isize);
                let next = (here + delta).rem_euclid(ids.len() as isize) as usize;
                self.form.set_warehouse_id(ids[next].clone());
            }
            F_PROD_WAREHOUSE => {
                // Optional link: an extra leading "none" slot
                let ids: Vec<String> = self.warehouses.iter().map(|w| w.id.clone()).collect();
                if ids.is_empty() {
                    return;
                }
                let here = ids
                    .iter()
                    .position(|id| *id == self.form.production_warehouse_id)
                    .map_or(0, |p| p as isize + 1);
                let slots = ids.len() as isize + 1;
                let next = (here + delta).rem_euclid(slots);
                if next == 0 {
                    self.form.set_production_warehouse_id(String::new());
                } else {
                    self.form
                        .set_production_warehouse_id(ids[(next - 1) as usize].clone());
                }
            }
            _ => {}
        }
    }

    fn warehouse_label(&self, id: &str) -> String {
        self.warehouses
            .iter()
            .find(|w| w.id == id)
            .map_or_else(|| id.to_owned(), |w| format!("{} ({})", w.name, w.code))
    }

    fn detail_meta(&self) -> (&'static str, &'static str) {
        match self.form.location_type {
            Some(LocationType::ProductionFloor) => ("Production floor", "productionFloor"),
            Some(LocationType::Warehouse) => ("Warehouse", "warehouseId"),
            Some(LocationType::FieldEngineer) => ("Field engineer", "fieldEngineerId"),
            Some(LocationType::Vehicle) => ("Vehicle number", "vehicleNumber"),
            None => ("Location detail", ""),
        }
    }
}

// ── Screen ──────────────────────────────────────────────────────────

pub struct DevicesScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    view: ListView<Device>,
    query: DeviceQuery,
    table_state: TableState,
    search_active: bool,
    search_input: Input,
    detail_open: bool,
    form: Option<DeviceFormUi>,
    /// Waiting for the edit hydration fetch.
    pending_edit: bool,
}

impl DevicesScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            action_tx: None,
            view: ListView::new(),
            query: DeviceQuery::default(),
            table_state: TableState::default(),
            search_active: false,
            search_input: Input::default(),
            detail_open: false,
            form: None,
            pending_edit: false,
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected_device(&self) -> Option<Device> {
        self.view
            .ordered()
            .get(self.selected_index())
            .map(|d| (*d).clone())
    }

    fn select(&mut self, idx: usize) {
        let clamped = if self.view.is_empty() {
            0
        } else {
            idx.min(self.view.len() - 1)
        };
        self.table_state.select(Some(clamped));
    }

    fn move_selection(&mut self, delta: isize) {
        if self.view.is_empty() {
            return;
        }
        let current = self.selected_index() as isize;
        let next = (current + delta).clamp(0, self.view.len() as isize - 1);
        self.select(next as usize);
    }

    /// Re-enter the loading state and emit the fetch for the current query.
    fn refetch(&mut self) -> Action {
        let token = self.view.begin_fetch();
        Action::FetchDevices {
            query: self.query.clone(),
            token,
        }
    }

    /// Send a secondary action outside the single return slot.
    fn send(&self, action: Action) {
        if let Some(tx) = &self.action_tx {
            let _ = tx.send(action);
        }
    }

    fn cycle_location_filter(&mut self) {
        self.query.location_type = match self.query.location_type {
            None => Some(LocationType::ProductionFloor),
            Some(LocationType::ProductionFloor) => Some(LocationType::Warehouse),
            Some(LocationType::Warehouse) => Some(LocationType::FieldEngineer),
            Some(LocationType::FieldEngineer) => Some(LocationType::Vehicle),
            Some(LocationType::Vehicle) => None,
        };
        self.query.page = 1;
        self.view.set_page(1);
    }

    // ── Form key handling ────────────────────────────────────────────

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let Some(ui) = self.form.as_mut() else {
            return Ok(None);
        };

        if ui.form.is_submitting() {
            // The submit control is busy; only Esc (cancel) is live.
            if key.code == KeyCode::Esc {
                self.form = None;
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Esc => {
                self.form = None;
                Ok(None)
            }
            KeyCode::Up | KeyCode::BackTab => {
                ui.move_focus(-1);
                Ok(None)
            }
            KeyCode::Down | KeyCode::Tab | KeyCode::Enter => {
                ui.move_focus(1);
                Ok(None)
            }
            KeyCode::Left if ui.field_kind(ui.focus) == FieldKind::Choice => {
                ui.cycle_choice(-1);
                Ok(None)
            }
            KeyCode::Right if ui.field_kind(ui.focus) == FieldKind::Choice => {
                ui.cycle_choice(1);
                Ok(None)
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if !ui.form.validate() {
                    return Ok(None);
                }
                if !ui.form.begin_submit() {
                    return Ok(None);
                }
                let payload = ui.form.payload();
                let action = match ui.form.mode().record_id() {
                    Some(id) => Action::SubmitDeviceUpdate {
                        id: id.to_owned(),
                        payload,
                    },
                    None => Action::SubmitDeviceCreate { payload },
                };
                Ok(Some(action))
            }
            _ if ui.field_kind(ui.focus) == FieldKind::Text => {
                ui.input
                    .handle_event(&crossterm::event::Event::Key(key));
                ui.store_input();
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    // ── List key handling ────────────────────────────────────────────

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.search_active = false;
                Ok(None)
            }
            _ => {
                self.search_input
                    .handle_event(&crossterm::event::Event::Key(key));
                // Every keystroke re-fetches; stale responses are discarded
                // by the fetch token.
                self.query.search = self.search_input.value().to_owned();
                self.query.page = 1;
                self.view.set_page(1);
                Ok(Some(self.refetch()))
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Result<Option<Action>> {
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
                if !self.view.is_empty() {
                    self.select(self.view.len() - 1);
                }
                Ok(None)
            }
            KeyCode::Char('/') => {
                self.search_active = true;
                self.search_input = Input::new(self.query.search.clone());
                Ok(None)
            }
            KeyCode::Char('f') => {
                self.cycle_location_filter();
                Ok(Some(self.refetch()))
            }
            KeyCode::Char('n') => {
                if self.view.next_page() {
                    self.query.page = self.view.page();
                    Ok(Some(self.refetch()))
                } else {
                    Ok(None)
                }
            }
            KeyCode::Char('p') => {
                if self.view.prev_page() {
                    self.query.page = self.view.page();
                    Ok(Some(self.refetch()))
                } else {
                    Ok(None)
                }
            }
            KeyCode::Char('R') => Ok(Some(self.refetch())),

            // Three-state sort toggles, one key per column
            KeyCode::Char('I') => {
                self.view.cycle_sort(DeviceColumn::Imei);
                Ok(None)
            }
            KeyCode::Char('Q') => {
                self.view.cycle_sort(DeviceColumn::QrCode);
                Ok(None)
            }
            KeyCode::Char('O') => {
                self.view.cycle_sort(DeviceColumn::Location);
                Ok(None)
            }

            KeyCode::Enter => {
                if !self.view.is_empty() {
                    self.detail_open = !self.detail_open;
                }
                Ok(None)
            }
            KeyCode::Esc => {
                if self.detail_open {
                    self.detail_open = false;
                    Ok(None)
                } else {
                    Ok(Some(Action::GoBack))
                }
            }

            KeyCode::Char('a') => {
                self.form = Some(DeviceFormUi::new(DeviceForm::new()));
                Ok(Some(Action::FetchWarehouseOptions))
            }
            KeyCode::Char('e') => {
                if let Some(device) = self.selected_device() {
                    self.pending_edit = true;
                    Ok(Some(Action::FetchDeviceDetail { id: device.id }))
                } else {
                    Ok(None)
                }
            }
            KeyCode::Char('x') => {
                let Some(device) = self.selected_device() else {
                    return Ok(None);
                };
                // The delete control is disabled while a mutation is in flight.
                if self.view.is_busy(&device.id) {
                    return Ok(None);
                }
                Ok(Some(Action::ShowConfirm(ConfirmAction::DeleteDevice {
                    id: device.id.clone(),
                    label: device.imei.clone(),
                })))
            }
            _ => Ok(None),
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let filter_label = self
            .query
            .location_type
            .map_or("all", |t| t.label());

        let search_shown = if self.search_active {
            format!("{}█", self.search_input.value())
        } else if self.query.search.is_empty() {
            "\u{2500}".into()
        } else {
            self.query.search.clone()
        };

        let state_span = if self.view.is_loading() {
            Span::styled("loading…", Style::default().fg(theme::WARNING_YELLOW))
        } else if self.view.page_numbers().count() == 0 {
            Span::styled("no pages", Style::default().fg(theme::DIM_WHITE))
        } else {
            Span::styled(
                format!("page {}/{}", self.view.page(), self.view.max_page()),
                Style::default().fg(theme::DIM_WHITE),
            )
        };

        let line = Line::from(vec![
            Span::styled(" Search: ", Style::default().fg(theme::DIM_WHITE)),
            Span::styled(search_shown, Style::default().fg(theme::ACCENT_TEAL)),
            Span::styled("  Filter: ", Style::default().fg(theme::DIM_WHITE)),
            Span::styled(
                format!("[{filter_label}]"),
                Style::default().fg(theme::ACCENT_TEAL),
            ),
            Span::raw("  "),
            state_span,
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn sort_marker(&self, column: DeviceColumn) -> &'static str {
        match self.view.sort() {
            Some((c, SortOrder::Ascending)) if c == column => " ▲",
            Some((c, SortOrder::Descending)) if c == column => " ▼",
            _ => "",
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        // Failure banner replaces the table body; rows were cleared.
        if let Some(error) = self.view.error() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("  ✗ {error}"),
                    theme::error_banner(),
                ))),
                area,
            );
            return;
        }

        if self.view.is_empty() {
            // Empty-state row spanning all columns; no page buttons either.
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  No devices found",
                    Style::default().fg(theme::BORDER_GRAY),
                ))),
                area,
            );
            return;
        }

        let header = Row::new(vec![
            Cell::from(format!("IMEI{}", self.sort_marker(DeviceColumn::Imei)))
                .style(theme::table_header()),
            Cell::from(format!("QR{}", self.sort_marker(DeviceColumn::QrCode)))
                .style(theme::table_header()),
            Cell::from(format!(
                "Location{}",
                self.sort_marker(DeviceColumn::Location)
            ))
            .style(theme::table_header()),
            Cell::from("Detail").style(theme::table_header()),
            Cell::from("Moves").style(theme::table_header()),
        ]);

        let selected = self.selected_index();
        let rows: Vec<Row> = self
            .view
            .ordered()
            .iter()
            .enumerate()
            .map(|(i, device)| {
                let is_selected = i == selected;
                let prefix = if is_selected { "▸" } else { " " };
                let busy = self.view.is_busy(&device.id);

                let row_style = if busy {
                    Style::default().fg(theme::BORDER_GRAY)
                } else if is_selected {
                    theme::table_selected()
                } else {
                    theme::table_row()
                };

                let location = device
                    .location_type()
                    .map_or("\u{2500}", |t| t.label());

                Row::new(vec![
                    Cell::from(format!("{prefix}{}", device.imei)).style(
                        Style::default()
                            .fg(theme::ACCENT_TEAL)
                            .add_modifier(if is_selected {
                                Modifier::BOLD
                            } else {
                                Modifier::empty()
                            }),
                    ),
                    Cell::from(device.qr_code.clone()),
                    Cell::from(location.to_owned()),
                    Cell::from(device.location_detail().to_owned()),
                    Cell::from(if busy {
                        "…".into()
                    } else {
                        device.movements.len().to_string()
                    }),
                ])
                .style(row_style)
            })
            .collect();

        let widths = [
            Constraint::Length(18),
            Constraint::Length(12),
            Constraint::Length(18),
            Constraint::Min(16),
            Constraint::Length(6),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, device: &Device) {
        let title = format!(" {}  ·  {} ", device.imei, device.qr_code);
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Location     ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    format!(
                        "{}  {}",
                        device.location_type().map_or("\u{2500}", |t| t.label()),
                        device.location_detail()
                    ),
                    Style::default().fg(theme::ACCENT_TEAL),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Prod. WH     ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    device
                        .production_warehouse_id
                        .clone()
                        .unwrap_or_else(|| "\u{2500}".into()),
                    Style::default().fg(theme::DIM_WHITE),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Requisition  ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    device
                        .installation_requisition_id
                        .clone()
                        .unwrap_or_else(|| "\u{2500}".into()),
                    Style::default().fg(theme::DIM_WHITE),
                ),
            ]),
            Line::from(""),
        ];

        if device.movements.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No movement history",
                Style::default().fg(theme::BORDER_GRAY),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "  Movements",
                theme::table_header(),
            )));
            for movement in &device.movements {
                let kind = movement
                    .movement_type
                    .map_or_else(|| "\u{2500}".into(), |t| t.to_string());
                let status = movement
                    .status
                    .map_or_else(|| "\u{2500}".into(), |s| s.to_string());
                let when = movement
                    .started_at
                    .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "\u{2500}".into());
                let from = movement.source.as_deref().unwrap_or("\u{2500}");
                let to = movement.destination.as_deref().unwrap_or("\u{2500}");

                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {when}  "),
                        Style::default().fg(theme::DIM_WHITE),
                    ),
                    Span::styled(
                        format!("{kind:<9}"),
                        Style::default().fg(theme::ACCENT_TEAL),
                    ),
                    Span::styled(
                        format!("{status:<12}"),
                        Style::default().fg(theme::SIGNAL_BLUE),
                    ),
                    Span::styled(
                        format!("{from} → {to}"),
                        Style::default().fg(theme::DIM_WHITE),
                    ),
                ]));
            }
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, ui: &DeviceFormUi) {
        let title = if ui.form.mode().is_edit() {
            " Edit device "
        } else {
            " New device "
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (detail_label, detail_error_key) = ui.detail_meta();
        let errors = ui.form.errors();

        let mut lines = vec![Line::from("")];
        if let Some(banner) = &ui.banner {
            lines.push(Line::from(Span::styled(
                format!("  ✗ {banner}"),
                theme::error_banner(),
            )));
            lines.push(Line::from(""));
        }

        let detail_value = match ui.form.location_type {
            Some(LocationType::Warehouse) if ui.field_kind(F_DETAIL) == FieldKind::Choice => {
                ui.warehouse_label(&ui.form.warehouse_id)
            }
            None => "select a location type first".into(),
            _ => ui.text_value(F_DETAIL),
        };

        let prod_wh_value = if ui.form.production_warehouse_id.is_empty() {
            "none".into()
        } else {
            ui.warehouse_label(&ui.form.production_warehouse_id)
        };

        let fields = [
            FieldRow {
                label: "IMEI",
                value: ui.form.imei.clone(),
                kind: ui.field_kind(F_IMEI),
                error: errors.get("imei"),
                focused: ui.focus == F_IMEI,
            },
            FieldRow {
                label: "QR code",
                value: ui.form.qr_code.clone(),
                kind: ui.field_kind(F_QR),
                error: errors.get("qrCode"),
                focused: ui.focus == F_QR,
            },
            FieldRow {
                label: "Location type",
                value: ui
                    .form
                    .location_type
                    .map_or_else(|| "none".into(), |t| t.label().to_owned()),
                kind: FieldKind::Choice,
                error: errors.get("locationType"),
                focused: ui.focus == F_LOCATION_TYPE,
            },
            FieldRow {
                label: detail_label,
                value: detail_value,
                kind: ui.field_kind(F_DETAIL),
                error: errors.get(detail_error_key),
                focused: ui.focus == F_DETAIL,
            },
            FieldRow {
                label: "Production WH",
                value: prod_wh_value,
                kind: ui.field_kind(F_PROD_WAREHOUSE),
                error: None,
                focused: ui.focus == F_PROD_WAREHOUSE,
            },
            FieldRow {
                label: "Requisition",
                value: ui.form.installation_requisition_id.clone(),
                kind: ui.field_kind(F_REQUISITION),
                error: None,
                focused: ui.focus == F_REQUISITION,
            },
        ];

        for field in &fields {
            lines.extend(field.lines());
        }

        lines.push(Line::from(""));
        let submit_hint = if ui.form.is_submitting() {
            Span::styled("  saving…", Style::default().fg(theme::WARNING_YELLOW))
        } else {
            Span::styled("  Ctrl+S save   Esc cancel", theme::key_hint())
        };
        lines.push(Line::from(submit_hint));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for DevicesScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        // Initial page load
        let fetch = self.refetch();
        self.send(fetch);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.form.is_some() {
            return self.handle_form_key(key);
        }
        if self.search_active {
            return self.handle_search_key(key);
        }
        self.handle_list_key(key)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DevicesLoaded { token, result } => match result {
                Ok(page) => {
                    if self.view.apply_success(*token, page.rows.clone(), page.max_page) {
                        self.select(self.selected_index());
                    }
                }
                Err(message) => {
                    self.view.apply_failure(*token, message.clone());
                }
            },

            Action::DeviceDetailLoaded { result } if self.pending_edit => {
                self.pending_edit = false;
                match result {
                    Ok(device) => {
                        self.form = Some(DeviceFormUi::new(DeviceForm::edit(device)));
                        return Ok(Some(Action::FetchWarehouseOptions));
                    }
                    Err(message) => {
                        return Ok(Some(Action::Notify(Notification::error(message.clone()))));
                    }
                }
            }

            Action::WarehouseOptionsLoaded { result } => {
                if let (Some(ui), Ok(rows)) = (self.form.as_mut(), result) {
                    ui.warehouses = rows.clone();
                }
            }

            Action::DeviceSubmitted { result } => {
                if let Some(ui) = self.form.as_mut() {
                    match result {
                        Ok(imei) => {
                            // Success navigates back to the list view.
                            self.form = None;
                            self.send(Action::Notify(Notification::success(format!(
                                "Device {imei} saved"
                            ))));
                            return Ok(Some(self.refetch()));
                        }
                        Err(message) => {
                            // Inline banner + blocking notification; the
                            // form stays populated for correction.
                            ui.form.finish_submit();
                            ui.banner = Some(message.clone());
                            return Ok(Some(Action::Notify(Notification::error(
                                message.clone(),
                            ))));
                        }
                    }
                }
            }

            Action::DeleteDevice { id } => {
                self.view.begin_mutation(id);
            }

            Action::DeviceDeleted { id, result } => {
                self.view.finish_mutation(id);
                match result {
                    Ok(()) => {
                        // Deletion re-fetches the page rather than removing
                        // the row locally.
                        self.send(Action::Notify(Notification::success("Device deleted")));
                        return Ok(Some(self.refetch()));
                    }
                    Err(message) => {
                        return Ok(Some(Action::Notify(Notification::error(message.clone()))));
                    }
                }
            }

            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let count = self.view.len();
        let block = Block::default()
            .title(format!(" Devices ({count}) "))
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

        if let Some(ui) = &self.form {
            self.render_form(frame, inner, ui);
            return;
        }

        let (table_area, detail_area) = if self.detail_open {
            let chunks =
                Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(inner);
            (chunks[0], Some(chunks[1]))
        } else {
            (inner, None)
        };

        let layout = Layout::vertical([
            Constraint::Length(1), // search/filter line
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(table_area);

        self.render_status_line(frame, layout[0]);
        self.render_table(frame, layout[1]);

        let hints = Line::from(vec![
            Span::styled("  / ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("f ", theme::key_hint_key()),
            Span::styled("filter  ", theme::key_hint()),
            Span::styled("n/p ", theme::key_hint_key()),
            Span::styled("page  ", theme::key_hint()),
            Span::styled("I/Q/O ", theme::key_hint_key()),
            Span::styled("sort  ", theme::key_hint()),
            Span::styled("a/e/x ", theme::key_hint_key()),
            Span::styled("add/edit/delete  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("detail", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);

        if let Some(detail_area) = detail_area {
            if let Some(device) = self.selected_device() {
                self.render_detail(frame, detail_area, &device);
            }
        }
    }

    fn wants_text_input(&self) -> bool {
        self.search_active || self.form.is_some()
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Devices"
    }
}
