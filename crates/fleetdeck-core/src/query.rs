// ── Serializable query state ──
//
// One explicit object per resource carrying search term, filters, and the
// current page. Controllers pass the whole object into a fetch; anything
// that changes it re-enters the loading state. Serde derives keep the state
// URL-syncable and easy to assert on in tests.

use serde::{Deserialize, Serialize};

use fleetdeck_api::models::{DeviceListParams, WarehouseListParams};

use crate::model::{LocationType, OwnerType, WarehouseType};

/// Rows requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Query state for the device list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceQuery {
    #[serde(default)]
    pub search: String,
    /// Current page, 1-based.
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub location_type: Option<LocationType>,
    #[serde(default)]
    pub field_engineer_id: Option<String>,
}

impl Default for DeviceQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            location_type: None,
            field_engineer_id: None,
        }
    }
}

impl DeviceQuery {
    /// Server-side offset for the current page.
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1) * self.limit
    }

    /// Wire parameters for `GET /device/list`.
    pub fn to_params(&self) -> DeviceListParams {
        DeviceListParams {
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            offset: self.offset(),
            limit: self.limit,
            field_engineer_id: self.field_engineer_id.clone(),
            location_type: self.location_type.map(|t| t.to_string()),
        }
    }
}

/// Query state for the warehouse list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseQuery {
    #[serde(default)]
    pub search: String,
    /// Current page, 1-based.
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub warehouse_type: Option<WarehouseType>,
    #[serde(default)]
    pub owner_type: Option<OwnerType>,
}

impl Default for WarehouseQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            warehouse_type: None,
            owner_type: None,
        }
    }
}

impl WarehouseQuery {
    /// Server-side offset for the current page.
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1) * self.limit
    }

    /// Wire parameters for `GET /warehouse/list`.
    pub fn to_params(&self) -> WarehouseListParams {
        WarehouseListParams {
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            offset: self.offset(),
            limit: self.limit,
            warehouse_type: self.warehouse_type.map(|t| t.to_string()),
            warehouse_owner_type: self.owner_type.map(|t| t.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_derives_from_page_and_limit() {
        let query = DeviceQuery {
            page: 3,
            limit: 25,
            ..DeviceQuery::default()
        };
        assert_eq!(query.offset(), 50);
    }

    #[test]
    fn first_page_has_zero_offset() {
        assert_eq!(WarehouseQuery::default().offset(), 0);
    }

    #[test]
    fn empty_search_is_omitted_from_params() {
        let params = DeviceQuery::default().to_params();
        assert_eq!(params.search, None);

        let params = DeviceQuery {
            search: "350".into(),
            ..DeviceQuery::default()
        }
        .to_params();
        assert_eq!(params.search.as_deref(), Some("350"));
    }

    #[test]
    fn filters_serialize_as_constants() {
        let query = WarehouseQuery {
            warehouse_type: Some(WarehouseType::Regional),
            owner_type: Some(OwnerType::Aggregator),
            ..WarehouseQuery::default()
        };
        let params = query.to_params();
        assert_eq!(params.warehouse_type.as_deref(), Some("REGIONAL"));
        assert_eq!(params.warehouse_owner_type.as_deref(), Some("AGGREGATOR"));
    }

    #[test]
    fn query_state_round_trips_through_serde() {
        let query = DeviceQuery {
            search: "QR-9".into(),
            page: 4,
            location_type: Some(LocationType::Vehicle),
            ..DeviceQuery::default()
        };
        let json = serde_json::to_string(&query).expect("serializes");
        let back: DeviceQuery = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, query);
    }
}
