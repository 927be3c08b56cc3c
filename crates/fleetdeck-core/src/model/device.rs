// Device domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::list::{SortValue, Sortable};

/// Where a device currently resides.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    ProductionFloor,
    Warehouse,
    FieldEngineer,
    Vehicle,
}

impl LocationType {
    /// Human-readable label for tables and dropdowns.
    pub fn label(self) -> &'static str {
        match self {
            Self::ProductionFloor => "Production floor",
            Self::Warehouse => "Warehouse",
            Self::FieldEngineer => "Field engineer",
            Self::Vehicle => "Vehicle",
        }
    }
}

/// Kind of a recorded device transfer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Inward,
    Outward,
    Transfer,
}

/// Progress of a recorded device transfer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementStatus {
    Pending,
    InTransit,
    Completed,
    Cancelled,
}

/// Location detail, shaped by the location type. The wire format carries
/// these as flat optional fields; only the fields matching the location
/// type are meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceLocation {
    ProductionFloor {
        floor: String,
    },
    Warehouse {
        warehouse_id: String,
        warehouse_name: Option<String>,
    },
    FieldEngineer {
        engineer_id: String,
        engineer_name: Option<String>,
    },
    Vehicle {
        vehicle_number: String,
    },
}

impl DeviceLocation {
    pub fn location_type(&self) -> LocationType {
        match self {
            Self::ProductionFloor { .. } => LocationType::ProductionFloor,
            Self::Warehouse { .. } => LocationType::Warehouse,
            Self::FieldEngineer { .. } => LocationType::FieldEngineer,
            Self::Vehicle { .. } => LocationType::Vehicle,
        }
    }

    /// The single detail string shown in tables.
    pub fn detail(&self) -> &str {
        match self {
            Self::ProductionFloor { floor } => floor,
            Self::Warehouse {
                warehouse_name: Some(name),
                ..
            } => name,
            Self::Warehouse { warehouse_id, .. } => warehouse_id,
            Self::FieldEngineer {
                engineer_name: Some(name),
                ..
            } => name,
            Self::FieldEngineer { engineer_id, .. } => engineer_id,
            Self::Vehicle { vehicle_number } => vehicle_number,
        }
    }
}

/// One recorded transfer of a device between two located entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub id: Option<String>,
    pub movement_type: Option<MovementType>,
    pub status: Option<MovementStatus>,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// A tracking device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    /// Unique, immutable after creation.
    pub imei: String,
    pub qr_code: String,
    pub location: Option<DeviceLocation>,
    pub production_warehouse_id: Option<String>,
    pub installation_requisition_id: Option<String>,
    /// Ordered movement history, oldest first.
    pub movements: Vec<Movement>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Device {
    pub fn location_type(&self) -> Option<LocationType> {
        self.location.as_ref().map(DeviceLocation::location_type)
    }

    /// Detail string for the current location, or a placeholder.
    pub fn location_detail(&self) -> &str {
        self.location.as_ref().map_or("\u{2500}", DeviceLocation::detail)
    }
}

/// Sortable columns of the device table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceColumn {
    Imei,
    QrCode,
    Location,
}

impl Sortable for Device {
    type Column = DeviceColumn;

    fn sort_value(&self, column: DeviceColumn) -> SortValue {
        match column {
            DeviceColumn::Imei => SortValue::Text(self.imei.clone()),
            DeviceColumn::QrCode => SortValue::Text(self.qr_code.clone()),
            DeviceColumn::Location => SortValue::Text(
                self.location_type()
                    .map(|t| t.label().to_owned())
                    .unwrap_or_default(),
            ),
        }
    }

    fn row_id(&self) -> &str {
        &self.id
    }
}
