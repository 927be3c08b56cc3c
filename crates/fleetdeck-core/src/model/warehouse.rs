// Warehouse and aggregator domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::list::{SortValue, Sortable};

/// Warehouse tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarehouseType {
    Production,
    Local,
    Regional,
}

impl WarehouseType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Production => "Production",
            Self::Local => "Local",
            Self::Regional => "Regional",
        }
    }
}

/// Whether a warehouse is operated directly or by a third-party aggregator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnerType {
    Xconics,
    Aggregator,
}

impl OwnerType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Xconics => "Xconics",
            Self::Aggregator => "Aggregator",
        }
    }
}

/// Operational status of a warehouse.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarehouseStatus {
    Active,
    Inactive,
    Suspended,
}

impl WarehouseStatus {
    /// The status a toggle action moves to. Suspended warehouses
    /// re-activate on toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive | Self::Suspended => Self::Active,
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A storage warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: String,
    /// Unique, immutable after creation.
    pub code: String,
    pub name: String,
    pub warehouse_type: Option<WarehouseType>,
    pub owner_type: Option<OwnerType>,
    /// Present iff `owner_type` is [`OwnerType::Aggregator`].
    pub aggregator_id: Option<String>,
    pub aggregator_name: Option<String>,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_mobile: String,
    pub status: WarehouseStatus,
    pub remarks: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Warehouse {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Owner column text: the aggregator name when third-party operated.
    pub fn owner_label(&self) -> String {
        match self.owner_type {
            Some(OwnerType::Aggregator) => self
                .aggregator_name
                .clone()
                .or_else(|| self.aggregator_id.clone())
                .unwrap_or_else(|| OwnerType::Aggregator.label().into()),
            Some(OwnerType::Xconics) => OwnerType::Xconics.label().into(),
            None => "\u{2500}".into(),
        }
    }
}

/// Sortable columns of the warehouse table. `Active` is the boolean
/// column: rows compare numerically, inactive before active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarehouseColumn {
    Code,
    Name,
    Active,
}

impl Sortable for Warehouse {
    type Column = WarehouseColumn;

    fn sort_value(&self, column: WarehouseColumn) -> SortValue {
        match column {
            WarehouseColumn::Code => SortValue::Text(self.code.clone()),
            WarehouseColumn::Name => SortValue::Text(self.name.clone()),
            WarehouseColumn::Active => SortValue::Flag(self.is_active()),
        }
    }

    fn row_id(&self) -> &str {
        &self.id
    }
}

/// A third-party warehouse operator (dropdown source).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregator {
    pub id: String,
    pub name: String,
}
