// Wire types for the tracking service REST API.
//
// All responses are wrapped in an envelope: `{ data, message, maxPage }` for
// list endpoints, `{ data, message }` for single-record endpoints. Fields use
// `#[serde(default)]` liberally because the service is inconsistent about
// field presence across deployments.

use serde::{Deserialize, Serialize};

// ── Response envelopes ───────────────────────────────────────────────

/// Envelope for list endpoints.
///
/// ```json
/// { "data": [...], "message": "optional", "maxPage": 17 }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub message: Option<String>,
    /// Total page count. Absent means zero pages, not an error.
    #[serde(default)]
    pub max_page: Option<u32>,
}

/// Envelope for single-record endpoints.
#[derive(Debug, Deserialize)]
pub struct RecordEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// One page of list results, with the server-reported page count unwrapped.
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub rows: Vec<T>,
    /// Zero when the result set is empty — "no pages to render".
    pub max_page: u32,
}

// ── Device ───────────────────────────────────────────────────────────

/// Device record from `/device/*` endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    #[serde(default)]
    pub id: String,
    pub imei: String,
    #[serde(default)]
    pub qr_code: Option<String>,
    /// One of: `PRODUCTION_FLOOR`, `WAREHOUSE`, `FIELD_ENGINEER`, `VEHICLE`.
    #[serde(default)]
    pub location_type: Option<String>,
    #[serde(default)]
    pub production_floor: Option<String>,
    #[serde(default)]
    pub warehouse_id: Option<String>,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    #[serde(default)]
    pub field_engineer_id: Option<String>,
    #[serde(default)]
    pub field_engineer_name: Option<String>,
    #[serde(default)]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub production_warehouse_id: Option<String>,
    #[serde(default)]
    pub installation_requisition_id: Option<String>,
    #[serde(default)]
    pub movements: Vec<MovementRecord>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One movement entry in a device's history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRecord {
    #[serde(default)]
    pub id: Option<String>,
    /// One of: `INWARD`, `OUTWARD`, `TRANSFER`.
    #[serde(default)]
    pub movement_type: Option<String>,
    /// One of: `PENDING`, `IN_TRANSIT`, `COMPLETED`, `CANCELLED`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// Query parameters for `GET /device/list`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub offset: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_engineer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
}

// ── Warehouse ────────────────────────────────────────────────────────

/// Warehouse record from `/warehouse/*` endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseRecord {
    #[serde(default)]
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub name: String,
    /// One of: `PRODUCTION`, `LOCAL`, `REGIONAL`.
    #[serde(default)]
    pub warehouse_type: Option<String>,
    /// One of: `XCONICS`, `AGGREGATOR`.
    #[serde(default)]
    pub owner_type: Option<String>,
    #[serde(default)]
    pub aggregator_id: Option<String>,
    #[serde(default)]
    pub aggregator_name: Option<String>,
    #[serde(default)]
    pub address_line: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_mobile: Option<String>,
    /// One of: `ACTIVE`, `INACTIVE`, `SUSPENDED`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Query parameters for `GET /warehouse/list`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub offset: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_owner_type: Option<String>,
}

// ── Aggregator ───────────────────────────────────────────────────────

/// Aggregator entry from `GET /aggregator/list` (dropdown source).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatorRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
}
