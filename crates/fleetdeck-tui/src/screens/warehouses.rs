//! Warehouses screen — paginated table with optimistic status toggling and
//! a create/edit form overlay with the owner-type → aggregator dependent
//! dropdown.

use std::collections::HashMap;

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
    Aggregator, ListView, OwnerType, SortOrder, Warehouse, WarehouseColumn, WarehouseForm,
    WarehouseQuery, WarehouseStatus, WarehouseType,
};

use crate::action::{Action, ConfirmAction, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{FieldKind, FieldRow};
use crate::widgets::status_indicator;

// ── Form overlay state ──────────────────────────────────────────────

/// Field order in the form overlay. The aggregator row sits right under
/// owner type, which gates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Code,
    Name,
    WarehouseType,
    OwnerType,
    Aggregator,
    Address,
    City,
    State,
    Pincode,
    Latitude,
    Longitude,
    ContactName,
    ContactEmail,
    ContactMobile,
    Status,
    Remarks,
}

const FIELDS: [Field; 16] = [
    Field::Code,
    Field::Name,
    Field::WarehouseType,
    Field::OwnerType,
    Field::Aggregator,
    Field::Address,
    Field::City,
    Field::State,
    Field::Pincode,
    Field::Latitude,
    Field::Longitude,
    Field::ContactName,
    Field::ContactEmail,
    Field::ContactMobile,
    Field::Status,
    Field::Remarks,
];

struct WarehouseFormUi {
    form: WarehouseForm,
    focus: usize,
    input: Input,
    /// Aggregator options, fetched once on mount and gated client-side.
    aggregators: Vec<Aggregator>,
    /// Inline submit-failure banner; the form stays populated.
    banner: Option<String>,
}

impl WarehouseFormUi {
    fn new(form: WarehouseForm) -> Self {
        let mut ui = Self {
            form,
            focus: 0,
            input: Input::default(),
            aggregators: Vec::new(),
            banner: None,
        };
        ui.sync_input();
        ui
    }

    fn field(&self) -> Field {
        FIELDS[self.focus]
    }

    fn field_kind(&self, field: Field) -> FieldKind {
        match field {
            Field::Code if !self.form.code_editable() => FieldKind::Locked,
            Field::WarehouseType | Field::OwnerType | Field::Status => FieldKind::Choice,
            Field::Aggregator => {
                if self.form.aggregator_enabled() {
                    FieldKind::Choice
                } else {
                    FieldKind::Locked
                }
            }
            _ => FieldKind::Text,
        }
    }

    fn text_value(&self, field: Field) -> String {
        match field {
            Field::Code => self.form.code.clone(),
            Field::Name => self.form.name.clone(),
            Field::Address => self.form.address_line.clone(),
            Field::City => self.form.city.clone(),
            Field::State => self.form.state.clone(),
            Field::Pincode => self.form.pincode.clone(),
            Field::Latitude => self.form.latitude.clone(),
            Field::Longitude => self.form.longitude.clone(),
            Field::ContactName => self.form.contact_name.clone(),
            Field::ContactEmail => self.form.contact_email.clone(),
            Field::ContactMobile => self.form.contact_mobile.clone(),
            Field::Remarks => self.form.remarks.clone(),
            _ => String::new(),
        }
    }

    fn sync_input(&mut self) {
        self.input = Input::new(self.text_value(self.field()));
    }

    fn store_input(&mut self) {
        let value = self.input.value().to_owned();
        match self.field() {
            Field::Code => self.form.set_code(value),
            Field::Name => self.form.set_name(value),
            Field::Address => self.form.set_address_line(value),
            Field::City => self.form.set_city(value),
            Field::State => self.form.set_state(value),
            Field::Pincode => self.form.set_pincode(value),
            Field::Latitude => self.form.set_latitude(value),
            Field::Longitude => self.form.set_longitude(value),
            Field::ContactName => self.form.set_contact_name(value),
            Field::ContactEmail => self.form.set_contact_email(value),
            Field::ContactMobile => self.form.set_contact_mobile(value),
            Field::Remarks => self.form.set_remarks(value),
            _ => {}
        }
    }

    fn move_focus(&mut self, delta: isize) {
        let count = FIELDS.len() as isize;
        self.focus = ((self.focus as isize + delta + count) % count) as usize;
        self.sync_input();
    }

    fn cycle_choice(&mut self, delta: isize) {
        match self.field() {
            Field::WarehouseType => {
                const ORDER: [Option<WarehouseType>; 4] = [
                    None,
                    Some(WarehouseType::Production),
                    Some(WarehouseType::Local),
                    Some(WarehouseType::Regional),
                ];
                let here = ORDER
                    .iter()
                    .position(|t| *t == self.form.warehouse_type)
                    .unwrap_or(0) as isize;
                let next = (here + delta).rem_euclid(ORDER.len() as isize) as usize;
                self.form.set_warehouse_type(ORDER[next]);
            }
            Field::OwnerType => {
                const ORDER: [Option<OwnerType>; 3] = [
                    None,
                    Some(OwnerType::Xconics),
                    Some(OwnerType::Aggregator),
                ];
                let here = ORDER
                    .iter()
                    .position(|t| *t == self.form.owner_type)
                    .unwrap_or(0) as isize;
                let next = (here + delta).rem_euclid(ORDER.len() as isize) as usize;
                self.form.set_owner_type(ORDER[next]);
            }
            Field::Aggregator => {
                let ids: Vec<String> = self.aggregators.iter().map(|a| a.id.clone()).collect();
                if ids.is_empty() {
                    return;
                }
                let here = ids
                    .iter()
                    .position(|id| *id == self.form.aggregator_id)
                    .map_or(-1, |p| p as isize);
                let next = (here + delta).rem_euclid(ids.len() as isize) as usize;
                self.form.set_aggregator_id(ids[next].clone());
            }
            Field::Status => {
                const ORDER: [WarehouseStatus; 3] = [
                    WarehouseStatus::Active,
                    WarehouseStatus::Inactive,
                    WarehouseStatus::Suspended,
                ];
                let here = ORDER
                    .iter()
                    .position(|s| *s == self.form.status)
                    .unwrap_or(0) as isize;
                let next = (here + delta).rem_euclid(ORDER.len() as isize) as usize;
                self.form.set_status(ORDER[next]);
            }
            _ => {}
        }
    }

    fn aggregator_label(&self) -> String {
        if !self.form.aggregator_enabled() {
            return "disabled".into();
        }
        if self.form.aggregator_id.is_empty() {
            return "none selected".into();
        }
        self.aggregators
            .iter()
            .find(|a| a.id == self.form.aggregator_id)
            .map_or_else(|| self.form.aggregator_id.clone(), |a| a.name.clone())
    }
}

// ── Screen ──────────────────────────────────────────────────────────

pub struct WarehousesScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    view: ListView<Warehouse>,
    query: WarehouseQuery,
    table_state: TableState,
    search_active: bool,
    search_input: Input,
    form: Option<WarehouseFormUi>,
    /// Waiting for the edit hydration fetch.
    pending_edit: bool,
    /// Rollback snapshots for in-flight optimistic toggles, by id.
    toggle_snapshots: HashMap<String, Warehouse>,
}

impl WarehousesScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            action_tx: None,
            view: ListView::new(),
            query: WarehouseQuery::default(),
            table_state: TableState::default(),
            search_active: false,
            search_input: Input::default(),
            form: None,
            pending_edit: false,
            toggle_snapshots: HashMap::new(),
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected_warehouse(&self) -> Option<Warehouse> {
        self.view
            .ordered()
            .get(self.selected_index())
            .map(|w| (*w).clone())
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

    fn refetch(&mut self) -> Action {
        let token = self.view.begin_fetch();
        Action::FetchWarehouses {
            query: self.query.clone(),
            token,
        }
    }

    fn send(&self, action: Action) {
        if let Some(tx) = &self.action_tx {
            let _ = tx.send(action);
        }
    }

    fn cycle_type_filter(&mut self) {
        self.query.warehouse_type = match self.query.warehouse_type {
            None => Some(WarehouseType::Production),
            Some(WarehouseType::Production) => Some(WarehouseType::Local),
            Some(WarehouseType::Local) => Some(WarehouseType::Regional),
            Some(WarehouseType::Regional) => None,
        };
        self.query.page = 1;
        self.view.set_page(1);
    }

    fn cycle_owner_filter(&mut self) {
        self.query.owner_type = match self.query.owner_type {
            None => Some(OwnerType::Xconics),
            Some(OwnerType::Xconics) => Some(OwnerType::Aggregator),
            Some(OwnerType::Aggregator) => None,
        };
        self.query.page = 1;
        self.view.set_page(1);
    }

    /// Optimistic status toggle: flip locally, remember the snapshot, send
    /// the full-payload update. A second toggle while one is in flight is
    /// rejected by the busy guard.
    fn toggle_selected(&mut self) -> Option<Action> {
        let warehouse = self.selected_warehouse()?;
        if !self.view.begin_mutation(&warehouse.id) {
            return None;
        }

        let next_status = warehouse.status.toggled();
        let mut flipped = warehouse.clone();
        flipped.status = next_status;

        if let Some(snapshot) = self.view.optimistic_swap(flipped) {
            self.toggle_snapshots.insert(warehouse.id.clone(), snapshot);
        }

        Some(Action::SetWarehouseStatus {
            id: warehouse.id,
            status: next_status,
        })
    }

    // ── Form key handling ────────────────────────────────────────────

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let Some(ui) = self.form.as_mut() else {
            return Ok(None);
        };

        if ui.form.is_submitting() {
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
            KeyCode::Left if ui.field_kind(ui.field()) == FieldKind::Choice => {
                ui.cycle_choice(-1);
                Ok(None)
            }
            KeyCode::Right if ui.field_kind(ui.field()) == FieldKind::Choice => {
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
                    Some(id) => Action::SubmitWarehouseUpdate {
                        id: id.to_owned(),
                        payload,
                    },
                    None => Action::SubmitWarehouseCreate { payload },
                };
                Ok(Some(action))
            }
            _ if ui.field_kind(ui.field()) == FieldKind::Text => {
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
                self.cycle_type_filter();
                Ok(Some(self.refetch()))
            }
            KeyCode::Char('F') => {
                self.cycle_owner_filter();
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

            // Three-state sort toggles, one key per column. `A` is the
            // boolean active column.
            KeyCode::Char('C') => {
                self.view.cycle_sort(WarehouseColumn::Code);
                Ok(None)
            }
            KeyCode::Char('N') => {
                self.view.cycle_sort(WarehouseColumn::Name);
                Ok(None)
            }
            KeyCode::Char('A') => {
                self.view.cycle_sort(WarehouseColumn::Active);
                Ok(None)
            }

            KeyCode::Char('t') => Ok(self.toggle_selected()),

            KeyCode::Char('a') => {
                self.form = Some(WarehouseFormUi::new(WarehouseForm::new()));
                Ok(Some(Action::FetchAggregators))
            }
            KeyCode::Char('e') => {
                if let Some(warehouse) = self.selected_warehouse() {
                    self.pending_edit = true;
                    Ok(Some(Action::FetchWarehouseDetail { id: warehouse.id }))
                } else {
                    Ok(None)
                }
            }
            KeyCode::Char('x') => {
                let Some(warehouse) = self.selected_warehouse() else {
                    return Ok(None);
                };
                if self.view.is_busy(&warehouse.id) {
                    return Ok(None);
                }
                Ok(Some(Action::ShowConfirm(ConfirmAction::DeleteWarehouse {
                    id: warehouse.id.clone(),
                    label: warehouse.code.clone(),
                })))
            }
            KeyCode::Esc => Ok(Some(Action::GoBack)),
            _ => Ok(None),
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let type_label = self
            .query
            .warehouse_type
            .map_or("all", |t| t.label());
        let owner_label = self.query.owner_type.map_or("all", |t| t.label());

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
            Span::styled("  Type: ", Style::default().fg(theme::DIM_WHITE)),
            Span::styled(
                format!("[{type_label}]"),
                Style::default().fg(theme::ACCENT_TEAL),
            ),
            Span::styled("  Owner: ", Style::default().fg(theme::DIM_WHITE)),
            Span::styled(
                format!("[{owner_label}]"),
                Style::default().fg(theme::ACCENT_TEAL),
            ),
            Span::raw("  "),
            state_span,
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn sort_marker(&self, column: WarehouseColumn) -> &'static str {
        match self.view.sort() {
            Some((c, SortOrder::Ascending)) if c == column => " ▲",
            Some((c, SortOrder::Descending)) if c == column => " ▼",
            _ => "",
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
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
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  No warehouses found",
                    Style::default().fg(theme::BORDER_GRAY),
                ))),
                area,
            );
            return;
        }

        let header = Row::new(vec![
            Cell::from(format!("Code{}", self.sort_marker(WarehouseColumn::Code)))
                .style(theme::table_header()),
            Cell::from(format!("Name{}", self.sort_marker(WarehouseColumn::Name)))
                .style(theme::table_header()),
            Cell::from("Type").style(theme::table_header()),
            Cell::from("Owner").style(theme::table_header()),
            Cell::from("City").style(theme::table_header()),
            Cell::from(format!(
                "Status{}",
                self.sort_marker(WarehouseColumn::Active)
            ))
            .style(theme::table_header()),
        ]);

        let selected = self.selected_index();
        let rows: Vec<Row> = self
            .view
            .ordered()
            .iter()
            .enumerate()
            .map(|(i, warehouse)| {
                let is_selected = i == selected;
                let prefix = if is_selected { "▸" } else { " " };
                let busy = self.view.is_busy(&warehouse.id);

                let row_style = if busy {
                    Style::default().fg(theme::BORDER_GRAY)
                } else if is_selected {
                    theme::table_selected()
                } else {
                    theme::table_row()
                };

                let status_cell = if busy {
                    Cell::from("…")
                } else {
                    Cell::from(Line::from(status_indicator::warehouse_status_span(
                        warehouse.status,
                    )))
                };

                Row::new(vec![
                    Cell::from(format!("{prefix}{}", warehouse.code)).style(
                        Style::default()
                            .fg(theme::ACCENT_TEAL)
                            .add_modifier(if is_selected {
                                Modifier::BOLD
                            } else {
                                Modifier::empty()
                            }),
                    ),
                    Cell::from(warehouse.name.clone()),
                    Cell::from(
                        warehouse
                            .warehouse_type
                            .map_or("\u{2500}", |t| t.label())
                            .to_owned(),
                    ),
                    Cell::from(warehouse.owner_label()),
                    Cell::from(warehouse.city.clone()),
                    status_cell,
                ])
                .style(row_style)
            })
            .collect();

        let widths = [
            Constraint::Length(13),
            Constraint::Min(16),
            Constraint::Length(11),
            Constraint::Length(18),
            Constraint::Length(12),
            Constraint::Length(12),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, ui: &WarehouseFormUi) {
        let title = if ui.form.mode().is_edit() {
            " Edit warehouse "
        } else {
            " New warehouse "
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let errors = ui.form.errors();
        let mut lines = vec![Line::from("")];
        if let Some(banner) = &ui.banner {
            lines.push(Line::from(Span::styled(
                format!("  ✗ {banner}"),
                theme::error_banner(),
            )));
            lines.push(Line::from(""));
        }

        let rows: Vec<FieldRow> = FIELDS
            .iter()
            .enumerate()
            .map(|(idx, &field)| {
                let (label, value, error_key) = match field {
                    Field::Code => ("Code", ui.form.code.clone(), "code"),
                    Field::Name => ("Name", ui.form.name.clone(), "name"),
                    Field::WarehouseType => (
                        "Type",
                        ui.form
                            .warehouse_type
                            .map_or_else(|| "none".into(), |t| t.label().to_owned()),
                        "warehouseType",
                    ),
                    Field::OwnerType => (
                        "Owner type",
                        ui.form
                            .owner_type
                            .map_or_else(|| "none".into(), |t| t.label().to_owned()),
                        "ownerType",
                    ),
                    Field::Aggregator => ("Aggregator", ui.aggregator_label(), "aggregatorId"),
                    Field::Address => ("Address", ui.form.address_line.clone(), "addressLine"),
                    Field::City => ("City", ui.form.city.clone(), "city"),
                    Field::State => ("State", ui.form.state.clone(), "state"),
                    Field::Pincode => ("Pincode", ui.form.pincode.clone(), "pincode"),
                    Field::Latitude => ("Latitude", ui.form.latitude.clone(), "latitude"),
                    Field::Longitude => ("Longitude", ui.form.longitude.clone(), "longitude"),
                    Field::ContactName => {
                        ("Contact name", ui.form.contact_name.clone(), "contactName")
                    }
                    Field::ContactEmail => (
                        "Contact email",
                        ui.form.contact_email.clone(),
                        "contactEmail",
                    ),
                    Field::ContactMobile => (
                        "Contact mobile",
                        ui.form.contact_mobile.clone(),
                        "contactMobile",
                    ),
                    Field::Status => ("Status", ui.form.status.to_string(), "status"),
                    Field::Remarks => ("Remarks", ui.form.remarks.clone(), "remarks"),
                };

                FieldRow {
                    label,
                    value,
                    kind: ui.field_kind(field),
                    error: errors.get(error_key),
                    focused: ui.focus == idx,
                }
            })
            .collect();

        for row in &rows {
            lines.extend(row.lines());
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

impl Component for WarehousesScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
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
            Action::WarehousesLoaded { token, result } => match result {
                Ok(page) => {
                    if self.view.apply_success(*token, page.rows.clone(), page.max_page) {
                        // A fresh page invalidates pending rollbacks.
                        self.toggle_snapshots.clear();
                        self.select(self.selected_index());
                    }
                }
                Err(message) => {
                    self.view.apply_failure(*token, message.clone());
                    self.toggle_snapshots.clear();
                }
            },

            Action::WarehouseDetailLoaded { result } if self.pending_edit => {
                self.pending_edit = false;
                match result {
                    Ok(warehouse) => {
                        self.form = Some(WarehouseFormUi::new(WarehouseForm::edit(warehouse)));
                        return Ok(Some(Action::FetchAggregators));
                    }
                    Err(message) => {
                        return Ok(Some(Action::Notify(Notification::error(message.clone()))));
                    }
                }
            }

            Action::AggregatorsLoaded { result } => {
                if let (Some(ui), Ok(rows)) = (self.form.as_mut(), result) {
                    ui.aggregators = rows.clone();
                }
            }

            Action::WarehouseSubmitted { result } => {
                if let Some(ui) = self.form.as_mut() {
                    match result {
                        Ok(code) => {
                            self.form = None;
                            self.send(Action::Notify(Notification::success(format!(
                                "Warehouse {code} saved"
                            ))));
                            return Ok(Some(self.refetch()));
                        }
                        Err(message) => {
                            ui.form.finish_submit();
                            ui.banner = Some(message.clone());
                            return Ok(Some(Action::Notify(Notification::error(
                                message.clone(),
                            ))));
                        }
                    }
                }
            }

            Action::DeleteWarehouse { id } => {
                self.view.begin_mutation(id);
            }

            Action::WarehouseDeleted { id, result } => {
                self.view.finish_mutation(id);
                match result {
                    Ok(()) => {
                        self.send(Action::Notify(Notification::success("Warehouse deleted")));
                        return Ok(Some(self.refetch()));
                    }
                    Err(message) => {
                        return Ok(Some(Action::Notify(Notification::error(message.clone()))));
                    }
                }
            }

            Action::WarehouseStatusApplied { id, result } => {
                self.view.finish_mutation(id);
                match result {
                    Ok(updated) => {
                        // Reconcile the optimistic row with the server copy.
                        self.toggle_snapshots.remove(id);
                        self.view.optimistic_swap(updated.clone());
                    }
                    Err(message) => {
                        // Revert the flip and surface the failure.
                        if let Some(snapshot) = self.toggle_snapshots.remove(id) {
                            self.view.rollback(snapshot);
                        }
                        return Ok(Some(Action::Notify(Notification::error(format!(
                            "Status change failed: {message}"
                        )))));
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
            .title(format!(" Warehouses ({count}) "))
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

        let layout = Layout::vertical([
            Constraint::Length(1), // search/filter line
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_status_line(frame, layout[0]);
        self.render_table(frame, layout[1]);

        let hints = Line::from(vec![
            Span::styled("  / ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("f/F ", theme::key_hint_key()),
            Span::styled("filters  ", theme::key_hint()),
            Span::styled("n/p ", theme::key_hint_key()),
            Span::styled("page  ", theme::key_hint()),
            Span::styled("C/N/A ", theme::key_hint_key()),
            Span::styled("sort  ", theme::key_hint()),
            Span::styled("t ", theme::key_hint_key()),
            Span::styled("toggle  ", theme::key_hint()),
            Span::styled("a/e/x ", theme::key_hint_key()),
            Span::styled("add/edit/delete", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
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
        "Warehouses"
    }
}
