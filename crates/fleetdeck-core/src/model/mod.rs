// ── Domain model ──
//
// Typed views over the wire records in `fleetdeck_api::models`. Enumerated
// constants the service exposes as SCREAMING_SNAKE_CASE strings become real
// enums here; `crate::convert` handles the translation in both directions.

mod alert;
mod device;
mod warehouse;

pub use alert::{Alert, AlertStatus, AlertType, IgnitionEvent};
pub use device::{
    Device, DeviceColumn, DeviceLocation, LocationType, Movement, MovementStatus, MovementType,
};
pub use warehouse::{
    Aggregator, OwnerType, Warehouse, WarehouseColumn, WarehouseStatus, WarehouseType,
};
