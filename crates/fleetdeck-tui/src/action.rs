//! All possible UI actions. Actions are the sole mechanism for state mutation.
//!
//! Async operations flow through here twice: a screen emits a request action
//! (`FetchDevices`, `DeleteWarehouse`, ...), the app loop spawns the call on
//! a task, and the completion comes back as a paired `...Loaded` /
//! `...Completed` action carrying a `Result` with a display-ready message.

use std::fmt;

use fleetdeck_api::models::{DeviceRecord, WarehouseRecord};
use fleetdeck_core::{
    Aggregator, Device, DeviceQuery, FetchToken, ListPage, Warehouse, WarehouseQuery,
    WarehouseStatus,
};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    #[allow(dead_code)]
    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Pending confirmation action (deletes always pass through here).
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteDevice { id: String, label: String },
    DeleteWarehouse { id: String, label: String },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteDevice { label, .. } => {
                write!(f, "Delete device {label}? This cannot be undone.")
            }
            Self::DeleteWarehouse { label, .. } => {
                write!(f, "Delete warehouse {label}? This cannot be undone.")
            }
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,

    // ── Device list / CRUD ────────────────────────────────────────
    FetchDevices {
        query: DeviceQuery,
        token: FetchToken,
    },
    DevicesLoaded {
        token: FetchToken,
        result: Result<ListPage<Device>, String>,
    },
    FetchDeviceDetail {
        id: String,
    },
    DeviceDetailLoaded {
        result: Result<Device, String>,
    },
    SubmitDeviceCreate {
        payload: DeviceRecord,
    },
    SubmitDeviceUpdate {
        id: String,
        payload: DeviceRecord,
    },
    DeviceSubmitted {
        result: Result<String, String>,
    },
    DeleteDevice {
        id: String,
    },
    DeviceDeleted {
        id: String,
        result: Result<(), String>,
    },

    // ── Warehouse list / CRUD ─────────────────────────────────────
    FetchWarehouses {
        query: WarehouseQuery,
        token: FetchToken,
    },
    WarehousesLoaded {
        token: FetchToken,
        result: Result<ListPage<Warehouse>, String>,
    },
    FetchWarehouseDetail {
        id: String,
    },
    WarehouseDetailLoaded {
        result: Result<Warehouse, String>,
    },
    SubmitWarehouseCreate {
        payload: WarehouseRecord,
    },
    SubmitWarehouseUpdate {
        id: String,
        payload: WarehouseRecord,
    },
    WarehouseSubmitted {
        result: Result<String, String>,
    },
    DeleteWarehouse {
        id: String,
    },
    WarehouseDeleted {
        id: String,
        result: Result<(), String>,
    },

    // ── Warehouse status toggle (optimistic) ──────────────────────
    SetWarehouseStatus {
        id: String,
        status: WarehouseStatus,
    },
    WarehouseStatusApplied {
        id: String,
        result: Result<Warehouse, String>,
    },

    // ── Dropdown option sources ───────────────────────────────────
    FetchAggregators,
    AggregatorsLoaded {
        result: Result<Vec<Aggregator>, String>,
    },
    FetchWarehouseOptions,
    WarehouseOptionsLoaded {
        result: Result<Vec<Warehouse>, String>,
    },

    // ── Confirm Dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Help / Notifications ──────────────────────────────────────
    ToggleHelp,
    Notify(Notification),
    DismissNotification,
}
