// ── Wire ↔ domain conversion ──
//
// The service speaks flat camelCase records with SCREAMING_SNAKE_CASE
// constant strings; the domain model uses typed enums and a shaped location
// variant. Conversion is lossy-tolerant on the way in (unknown constants and
// bad timestamps become None) and exact on the way out, because updates
// resend the full payload.

use chrono::{DateTime, Utc};

use fleetdeck_api::models::{
    AggregatorRecord, DeviceRecord, MovementRecord, WarehouseRecord,
};

use crate::model::{
    Aggregator, Device, DeviceLocation, LocationType, Movement, MovementStatus, MovementType,
    OwnerType, Warehouse, WarehouseStatus, WarehouseType,
};

/// Parse an RFC 3339 timestamp, tolerating absent or malformed values.
fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a SCREAMING_SNAKE_CASE constant, tolerating unknown values.
fn parse_constant<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value.and_then(|s| s.parse().ok())
}

// ── Device ───────────────────────────────────────────────────────────

fn location_from_record(record: &DeviceRecord) -> Option<DeviceLocation> {
    let location_type: LocationType = parse_constant(record.location_type.as_deref())?;
    match location_type {
        LocationType::ProductionFloor => Some(DeviceLocation::ProductionFloor {
            floor: record.production_floor.clone().unwrap_or_default(),
        }),
        LocationType::Warehouse => Some(DeviceLocation::Warehouse {
            warehouse_id: record.warehouse_id.clone().unwrap_or_default(),
            warehouse_name: record.warehouse_name.clone(),
        }),
        LocationType::FieldEngineer => Some(DeviceLocation::FieldEngineer {
            engineer_id: record.field_engineer_id.clone().unwrap_or_default(),
            engineer_name: record.field_engineer_name.clone(),
        }),
        LocationType::Vehicle => Some(DeviceLocation::Vehicle {
            vehicle_number: record.vehicle_number.clone().unwrap_or_default(),
        }),
    }
}

impl From<MovementRecord> for Movement {
    fn from(record: MovementRecord) -> Self {
        Self {
            started_at: parse_timestamp(record.started_at.as_deref()),
            completed_at: parse_timestamp(record.completed_at.as_deref()),
            movement_type: parse_constant::<MovementType>(record.movement_type.as_deref()),
            status: parse_constant::<MovementStatus>(record.status.as_deref()),
            id: record.id,
            source: record.source,
            destination: record.destination,
        }
    }
}

impl From<DeviceRecord> for Device {
    fn from(record: DeviceRecord) -> Self {
        let location = location_from_record(&record);
        Self {
            location,
            created_at: parse_timestamp(record.created_at.as_deref()),
            updated_at: parse_timestamp(record.updated_at.as_deref()),
            movements: record.movements.into_iter().map(Movement::from).collect(),
            id: record.id,
            imei: record.imei,
            qr_code: record.qr_code.unwrap_or_default(),
            production_warehouse_id: record.production_warehouse_id,
            installation_requisition_id: record.installation_requisition_id,
        }
    }
}

impl From<&Device> for DeviceRecord {
    fn from(device: &Device) -> Self {
        let mut record = Self {
            id: device.id.clone(),
            imei: device.imei.clone(),
            qr_code: Some(device.qr_code.clone()),
            location_type: device.location_type().map(|t| t.to_string()),
            production_warehouse_id: device.production_warehouse_id.clone(),
            installation_requisition_id: device.installation_requisition_id.clone(),
            movements: device.movements.iter().map(MovementRecord::from).collect(),
            created_at: device.created_at.map(|dt| dt.to_rfc3339()),
            updated_at: device.updated_at.map(|dt| dt.to_rfc3339()),
            ..Self::default()
        };

        match &device.location {
            Some(DeviceLocation::ProductionFloor { floor }) => {
                record.production_floor = Some(floor.clone());
            }
            Some(DeviceLocation::Warehouse {
                warehouse_id,
                warehouse_name,
            }) => {
                record.warehouse_id = Some(warehouse_id.clone());
                record.warehouse_name = warehouse_name.clone();
            }
            Some(DeviceLocation::FieldEngineer {
                engineer_id,
                engineer_name,
            }) => {
                record.field_engineer_id = Some(engineer_id.clone());
                record.field_engineer_name = engineer_name.clone();
            }
            Some(DeviceLocation::Vehicle { vehicle_number }) => {
                record.vehicle_number = Some(vehicle_number.clone());
            }
            None => {}
        }

        record
    }
}

impl From<&Movement> for MovementRecord {
    fn from(movement: &Movement) -> Self {
        Self {
            id: movement.id.clone(),
            movement_type: movement.movement_type.map(|t| t.to_string()),
            status: movement.status.map(|s| s.to_string()),
            source: movement.source.clone(),
            destination: movement.destination.clone(),
            started_at: movement.started_at.map(|dt| dt.to_rfc3339()),
            completed_at: movement.completed_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

// ── Warehouse ────────────────────────────────────────────────────────

impl From<WarehouseRecord> for Warehouse {
    fn from(record: WarehouseRecord) -> Self {
        Self {
            warehouse_type: parse_constant::<WarehouseType>(record.warehouse_type.as_deref()),
            owner_type: parse_constant::<OwnerType>(record.owner_type.as_deref()),
            status: parse_constant::<WarehouseStatus>(record.status.as_deref())
                .unwrap_or(WarehouseStatus::Inactive),
            created_at: parse_timestamp(record.created_at.as_deref()),
            updated_at: parse_timestamp(record.updated_at.as_deref()),
            id: record.id,
            code: record.code,
            name: record.name,
            aggregator_id: record.aggregator_id,
            aggregator_name: record.aggregator_name,
            address_line: record.address_line.unwrap_or_default(),
            city: record.city.unwrap_or_default(),
            state: record.state.unwrap_or_default(),
            pincode: record.pincode.unwrap_or_default(),
            latitude: record.latitude,
            longitude: record.longitude,
            contact_name: record.contact_name.unwrap_or_default(),
            contact_email: record.contact_email.unwrap_or_default(),
            contact_mobile: record.contact_mobile.unwrap_or_default(),
            remarks: record.remarks.unwrap_or_default(),
        }
    }
}

impl From<&Warehouse> for WarehouseRecord {
    fn from(warehouse: &Warehouse) -> Self {
        Self {
            id: warehouse.id.clone(),
            code: warehouse.code.clone(),
            name: warehouse.name.clone(),
            warehouse_type: warehouse.warehouse_type.map(|t| t.to_string()),
            owner_type: warehouse.owner_type.map(|t| t.to_string()),
            aggregator_id: warehouse.aggregator_id.clone(),
            aggregator_name: warehouse.aggregator_name.clone(),
            address_line: Some(warehouse.address_line.clone()),
            city: Some(warehouse.city.clone()),
            state: Some(warehouse.state.clone()),
            pincode: Some(warehouse.pincode.clone()),
            latitude: warehouse.latitude,
            longitude: warehouse.longitude,
            contact_name: Some(warehouse.contact_name.clone()),
            contact_email: Some(warehouse.contact_email.clone()),
            contact_mobile: Some(warehouse.contact_mobile.clone()),
            status: Some(warehouse.status.to_string()),
            remarks: Some(warehouse.remarks.clone()),
            created_at: warehouse.created_at.map(|dt| dt.to_rfc3339()),
            updated_at: warehouse.updated_at.map(|dt| dt.to_rfc3339()),
            extra: serde_json::Map::new(),
        }
    }
}

// ── Aggregator ───────────────────────────────────────────────────────

impl From<AggregatorRecord> for Aggregator {
    fn from(record: AggregatorRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_record() -> WarehouseRecord {
        WarehouseRecord {
            id: "wh-1".into(),
            code: "WH-NAG-02".into(),
            name: "Nagpur Local".into(),
            warehouse_type: Some("LOCAL".into()),
            owner_type: Some("AGGREGATOR".into()),
            aggregator_id: Some("agg-7".into()),
            status: Some("ACTIVE".into()),
            contact_email: Some("ops@example.com".into()),
            created_at: Some("2025-10-01T08:30:00Z".into()),
            ..WarehouseRecord::default()
        }
    }

    #[test]
    fn warehouse_constants_parse_into_enums() {
        let warehouse = Warehouse::from(sample_record());

        assert_eq!(warehouse.warehouse_type, Some(WarehouseType::Local));
        assert_eq!(warehouse.owner_type, Some(OwnerType::Aggregator));
        assert_eq!(warehouse.status, WarehouseStatus::Active);
        assert!(warehouse.created_at.is_some());
    }

    #[test]
    fn unknown_constants_degrade_to_none() {
        let mut record = sample_record();
        record.warehouse_type = Some("ORBITAL".into());
        record.status = Some("GONE".into());

        let warehouse = Warehouse::from(record);

        assert_eq!(warehouse.warehouse_type, None);
        // Unknown status falls back to Inactive rather than failing.
        assert_eq!(warehouse.status, WarehouseStatus::Inactive);
    }

    #[test]
    fn warehouse_round_trips_through_full_payload() {
        let warehouse = Warehouse::from(sample_record());
        let record = WarehouseRecord::from(&warehouse);

        assert_eq!(record.code, "WH-NAG-02");
        assert_eq!(record.warehouse_type.as_deref(), Some("LOCAL"));
        assert_eq!(record.owner_type.as_deref(), Some("AGGREGATOR"));
        assert_eq!(record.status.as_deref(), Some("ACTIVE"));
        assert_eq!(record.aggregator_id.as_deref(), Some("agg-7"));
    }

    #[test]
    fn device_location_shapes_by_type() {
        let record = DeviceRecord {
            id: "d1".into(),
            imei: "350000000000001".into(),
            location_type: Some("FIELD_ENGINEER".into()),
            field_engineer_id: Some("fe-2".into()),
            field_engineer_name: Some("A. Deshmukh".into()),
            ..DeviceRecord::default()
        };

        let device = Device::from(record);

        assert_eq!(device.location_type(), Some(LocationType::FieldEngineer));
        assert_eq!(device.location_detail(), "A. Deshmukh");

        let back = DeviceRecord::from(&device);
        assert_eq!(back.location_type.as_deref(), Some("FIELD_ENGINEER"));
        assert_eq!(back.field_engineer_id.as_deref(), Some("fe-2"));
        assert_eq!(back.vehicle_number, None);
    }
}
