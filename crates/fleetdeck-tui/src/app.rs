//! Application core — event loop, screen management, action dispatch.
//!
//! Service calls never block the UI: request actions are spawned onto tokio
//! tasks holding a `Console` clone, and their completions re-enter the loop
//! as actions. Stale completions are filtered by the screens' fetch tokens.

use std::collections::HashMap;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
    Frame,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use fleetdeck_core::Console;

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// How many 250ms ticks a success toast stays visible.
const TOAST_TICKS: u8 = 12;

/// Top-level application state and event loop.
pub struct App {
    /// Service handle; `None` until configured.
    console: Option<Console>,
    /// Current active screen.
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Pending confirmation dialog, if any.
    confirm: Option<ConfirmAction>,
    /// Current toast notification and its remaining ticks
    /// (None = sticky until dismissed).
    notification: Option<(Notification, Option<u8>)>,
    /// Help overlay visibility.
    help_visible: bool,
    /// Action sender — components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// Create a new App with all screens mounted.
    pub fn new(console: Option<Console>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        Self {
            console,
            active_screen: ScreenId::Devices,
            previous_screen: None,
            screens,
            running: true,
            confirm: None,
            notification: None,
            help_visible: false,
            action_tx,
            action_rx,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        // Focus the initial screen
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Confirm dialog captures everything while open
        if self.confirm.is_some() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    Ok(Some(Action::ConfirmYes))
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    Ok(Some(Action::ConfirmNo))
                }
                _ => Ok(None),
            };
        }

        // A sticky (error) notification blocks until acknowledged
        if matches!(self.notification, Some((_, None))) {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => Ok(Some(Action::DismissNotification)),
                _ => Ok(None),
            };
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // While a screen is capturing text (search box, form field), only
        // Ctrl+C stays global — everything else belongs to the screen.
        let capturing = self
            .screens
            .get(&self.active_screen)
            .is_some_and(|s| s.wants_text_input());

        if capturing {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Ok(Some(Action::Quit));
            }
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            // Quit
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            // Help
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            // Screen navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='3')) => {
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            // Tab / Shift+Tab for screen cycling
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            _ => {}
        }

        // Delegate to active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Handle mouse events (delegate to active screen).
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    /// Process a single action — update app state, spawn service calls,
    /// and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            // ── Confirm dialog ───────────────────────────────────────
            Action::ShowConfirm(confirm) => {
                self.confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(confirm) = self.confirm.take() {
                    let follow_up = match confirm {
                        ConfirmAction::DeleteDevice { id, .. } => Action::DeleteDevice { id },
                        ConfirmAction::DeleteWarehouse { id, .. } => {
                            Action::DeleteWarehouse { id }
                        }
                    };
                    self.action_tx.send(follow_up)?;
                }
            }

            Action::ConfirmNo => {
                // Declining leaves the row set and page untouched.
                self.confirm = None;
            }

            // ── Notifications ────────────────────────────────────────
            Action::Notify(notification) => {
                let ticks = match notification.level {
                    // Errors block until acknowledged
                    NotificationLevel::Error => None,
                    _ => Some(TOAST_TICKS),
                };
                self.notification = Some((notification.clone(), ticks));
            }

            Action::DismissNotification => {
                self.notification = None;
            }

            Action::Tick => {
                if let Some((_, Some(ticks))) = &mut self.notification {
                    *ticks = ticks.saturating_sub(1);
                    if *ticks == 0 {
                        self.notification = None;
                    }
                }
            }

            // ── Service calls (spawned) ──────────────────────────────
            Action::FetchDevices { .. }
            | Action::FetchDeviceDetail { .. }
            | Action::SubmitDeviceCreate { .. }
            | Action::SubmitDeviceUpdate { .. }
            | Action::DeleteDevice { .. }
            | Action::FetchWarehouses { .. }
            | Action::FetchWarehouseDetail { .. }
            | Action::SubmitWarehouseCreate { .. }
            | Action::SubmitWarehouseUpdate { .. }
            | Action::DeleteWarehouse { .. }
            | Action::SetWarehouseStatus { .. }
            | Action::FetchAggregators
            | Action::FetchWarehouseOptions => {
                self.spawn_service_call(action.clone())?;
                // Screens also observe the request, e.g. to flag a row busy.
                self.propagate(action)?;
            }

            // Render is handled in the main loop, not here
            Action::Render | Action::Resize(..) => {}

            // Propagate everything else to every screen; completions carry
            // tokens/ids, so irrelevant screens ignore them.
            other => self.propagate(other)?,
        }

        Ok(())
    }

    /// Forward an action to every screen, queueing any follow-ups.
    fn propagate(&mut self, action: &Action) -> Result<()> {
        let mut follow_ups = Vec::new();
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                follow_ups.push(follow_up);
            }
        }
        for follow_up in follow_ups {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    /// Spawn one service call on a task; its completion re-enters the
    /// action loop.
    fn spawn_service_call(&mut self, action: Action) -> Result<()> {
        let Some(console) = self.console.clone() else {
            self.action_tx.send(Action::Notify(Notification::error(
                "No service configured — pass --api-url or run: fleetdeck config init",
            )))?;
            return Ok(());
        };
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let completion = match action {
                Action::FetchDevices { query, token } => Action::DevicesLoaded {
                    token,
                    result: console
                        .list_devices(&query)
                        .await
                        .map_err(|e| e.display_message()),
                },
                Action::FetchDeviceDetail { id } => Action::DeviceDetailLoaded {
                    result: console
                        .read_device(&id)
                        .await
                        .map_err(|e| e.display_message()),
                },
                Action::SubmitDeviceCreate { payload } => Action::DeviceSubmitted {
                    result: console
                        .create_device(&payload)
                        .await
                        .map(|d| d.imei)
                        .map_err(|e| e.display_message()),
                },
                Action::SubmitDeviceUpdate { id, payload } => Action::DeviceSubmitted {
                    result: console
                        .update_device(&id, &payload)
                        .await
                        .map(|d| d.imei)
                        .map_err(|e| e.display_message()),
                },
                Action::DeleteDevice { id } => {
                    let result = console
                        .delete_device(&id)
                        .await
                        .map_err(|e| e.display_message());
                    Action::DeviceDeleted { id, result }
                }
                Action::FetchWarehouses { query, token } => Action::WarehousesLoaded {
                    token,
                    result: console
                        .list_warehouses(&query)
                        .await
                        .map_err(|e| e.display_message()),
                },
                Action::FetchWarehouseDetail { id } => Action::WarehouseDetailLoaded {
                    result: console
                        .read_warehouse(&id)
                        .await
                        .map_err(|e| e.display_message()),
                },
                Action::SubmitWarehouseCreate { payload } => Action::WarehouseSubmitted {
                    result: console
                        .create_warehouse(&payload)
                        .await
                        .map(|w| w.code)
                        .map_err(|e| e.display_message()),
                },
                Action::SubmitWarehouseUpdate { id, payload } => Action::WarehouseSubmitted {
                    result: console
                        .update_warehouse(&id, &payload)
                        .await
                        .map(|w| w.code)
                        .map_err(|e| e.display_message()),
                },
                Action::DeleteWarehouse { id } => {
                    let result = console
                        .delete_warehouse(&id)
                        .await
                        .map_err(|e| e.display_message());
                    Action::WarehouseDeleted { id, result }
                }
                Action::SetWarehouseStatus { id, status } => {
                    let result = console
                        .set_warehouse_status(&id, status)
                        .await
                        .map_err(|e| e.display_message());
                    Action::WarehouseStatusApplied { id, result }
                }
                Action::FetchAggregators => Action::AggregatorsLoaded {
                    result: console
                        .list_aggregators()
                        .await
                        .map_err(|e| e.display_message()),
                },
                Action::FetchWarehouseOptions => {
                    // One large page is plenty for a dropdown source.
                    let query = fleetdeck_core::WarehouseQuery {
                        limit: 100,
                        ..Default::default()
                    };
                    Action::WarehouseOptionsLoaded {
                        result: console
                            .list_warehouses(&query)
                            .await
                            .map(|page| page.rows)
                            .map_err(|e| e.display_message()),
                    }
                }
                other => {
                    debug!(?other, "not a service call");
                    return;
                }
            };

            let _ = tx.send(completion);
        });

        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        // Render active screen
        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Overlays, innermost last
        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
        if let Some(confirm) = &self.confirm {
            render_confirm_dialog(frame, area, &confirm.to_string());
        }
        if let Some((notification, _)) = &self.notification {
            render_notification(frame, area, notification);
        }
    }

    /// Render the bottom tab bar.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Render the bottom status bar with service state and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let service = if self.console.is_some() {
            Span::styled("● service", Style::default().fg(theme::SUCCESS_GREEN))
        } else {
            Span::styled("○ not configured", Style::default().fg(theme::ERROR_RED))
        };

        let hints = Span::styled(" │ ? help  1-3 screens  q quit", theme::key_hint());

        let line = Line::from(vec![Span::raw(" "), service, hints]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 62u16.min(area.width.saturating_sub(4));
        let help_height = 20u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let rows: &[(&str, &str)] = &[
            ("1-3 / Tab", "Switch screen"),
            ("j/k ↑/↓", "Move up/down"),
            ("n / p", "Next / previous page"),
            ("/", "Search (every keystroke re-fetches)"),
            ("f / F", "Cycle filters"),
            ("I Q O  C N A", "Sort columns (asc → desc → off)"),
            ("a / e / x", "Add / edit / delete"),
            ("t", "Toggle warehouse status"),
            ("R", "Refresh current page"),
            ("Enter", "Open detail"),
            ("Esc", "Back / close"),
            ("q", "Quit"),
        ];

        let mut lines = vec![Line::from("")];
        for (keys, what) in rows {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<14}"), theme::key_hint_key()),
                Span::styled(*what, theme::key_hint()),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "                        Esc or ? to close",
            theme::key_hint(),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Centered modal asking for confirmation of a destructive action.
fn render_confirm_dialog(frame: &mut Frame, area: Rect, message: &str) {
    let max_width = area.width.saturating_sub(4).max(30);
    let width = (u16::try_from(message.len()).unwrap_or(40) + 8).clamp(30, max_width);
    let height = 5u16;
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let dialog_area = Rect::new(area.x + x, area.y + y, width, height);

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BG_DARK)),
        dialog_area,
    );

    let block = Block::default()
        .title(" Confirm ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused());
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let lines = vec![
        Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(theme::DIM_WHITE),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y ", theme::key_hint_key()),
            Span::styled("yes   ", theme::key_hint()),
            Span::styled("n/Esc ", theme::key_hint_key()),
            Span::styled("no", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Toast notification in the top-right corner. Errors stay until dismissed.
fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    let (prefix, color) = match notification.level {
        NotificationLevel::Success => ("✓ ", theme::SUCCESS_GREEN),
        NotificationLevel::Error => ("✗ ", theme::ERROR_RED),
        NotificationLevel::Info => ("· ", theme::SIGNAL_BLUE),
    };

    let text = format!("{prefix}{}", notification.message);
    let max_width = area.width.saturating_sub(2).max(20);
    let width = (u16::try_from(text.len()).unwrap_or(40) + 4).clamp(20, max_width);
    let toast_area = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + 1,
        width,
        3,
    );

    frame.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color)))),
        inner,
    );
}
