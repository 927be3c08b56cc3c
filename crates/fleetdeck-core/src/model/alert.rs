// Vehicle alert types.
//
// Alerts have no backing endpoint yet; `crate::mock` supplies sample data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// What tripped the alert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    Tamper,
    PowerCut,
}

impl AlertType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Tamper => "Tamper",
            Self::PowerCut => "Power cut",
        }
    }
}

/// Whether the alert is still open.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
    Active,
    Resolved,
}

/// A vehicle alert with its trigger position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub vehicle_number: String,
    pub imei: String,
    pub alert_type: AlertType,
    pub status: AlertStatus,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

/// One ignition on/off event (sample data only, no backing endpoint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgnitionEvent {
    pub timestamp: DateTime<Utc>,
    pub ignition_on: bool,
    pub location: String,
}
