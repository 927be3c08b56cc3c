// fleetdeck-core: Controllers and domain model between fleetdeck-api and
// the console front ends (CLI/TUI).

pub mod config;
pub mod console;
pub mod convert;
pub mod error;
pub mod form;
pub mod list;
pub mod mock;
pub mod model;
pub mod query;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConsoleConfig, TlsVerification};
pub use console::Console;
pub use error::CoreError;
pub use form::{DeviceForm, FieldErrors, FormMode, WarehouseForm};
pub use list::{FetchToken, ListView, LoadState, SortOrder, SortValue, Sortable};
pub use query::{DeviceQuery, WarehouseQuery, DEFAULT_PAGE_SIZE};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Core entities
    Aggregator, Device, DeviceLocation, Movement, Warehouse,
    // Alerts (client-side mock)
    Alert, AlertStatus, AlertType, IgnitionEvent,
    // Table columns
    DeviceColumn, WarehouseColumn,
    // Enumerated constants
    LocationType, MovementStatus, MovementType, OwnerType, WarehouseStatus, WarehouseType,
};

// Pagination wrapper shared with the API layer.
pub use fleetdeck_api::models::ListPage;
