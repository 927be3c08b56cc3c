// Device create/edit form model.

use fleetdeck_api::models::DeviceRecord;

use super::validate::require;
use super::{FieldErrors, FormMode};
use crate::model::{Device, DeviceLocation, LocationType};

/// Form state for creating or editing a device.
///
/// The location detail fields are all kept; only the one matching the
/// selected location type is validated and submitted. Changing the location
/// type clears the previously entered detail, mirroring the
/// dependent-dropdown rule.
#[derive(Debug, Clone, Default)]
pub struct DeviceForm {
    mode: FormMode,
    pub imei: String,
    pub qr_code: String,
    pub location_type: Option<LocationType>,
    pub production_floor: String,
    pub warehouse_id: String,
    pub field_engineer_id: String,
    pub vehicle_number: String,
    pub production_warehouse_id: String,
    pub installation_requisition_id: String,
    errors: FieldErrors,
    submitting: bool,
}

impl DeviceForm {
    /// Empty form in create mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form hydrated from a fetched device, in edit mode.
    pub fn edit(device: &Device) -> Self {
        let mut form = Self {
            mode: FormMode::Edit {
                id: device.id.clone(),
            },
            imei: device.imei.clone(),
            qr_code: device.qr_code.clone(),
            location_type: device.location_type(),
            production_warehouse_id: device.production_warehouse_id.clone().unwrap_or_default(),
            installation_requisition_id: device
                .installation_requisition_id
                .clone()
                .unwrap_or_default(),
            ..Self::default()
        };

        match &device.location {
            Some(DeviceLocation::ProductionFloor { floor }) => {
                form.production_floor = floor.clone();
            }
            Some(DeviceLocation::Warehouse { warehouse_id, .. }) => {
                form.warehouse_id = warehouse_id.clone();
            }
            Some(DeviceLocation::FieldEngineer { engineer_id, .. }) => {
                form.field_engineer_id = engineer_id.clone();
            }
            Some(DeviceLocation::Vehicle { vehicle_number }) => {
                form.vehicle_number = vehicle_number.clone();
            }
            None => {}
        }

        form
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// IMEI is immutable once the device exists.
    pub fn imei_editable(&self) -> bool {
        !self.mode.is_edit()
    }

    // ── Field setters (each clears only its own error) ───────────────

    pub fn set_imei(&mut self, value: impl Into<String>) {
        if self.imei_editable() {
            self.imei = value.into();
            self.errors.clear("imei");
        }
    }

    pub fn set_qr_code(&mut self, value: impl Into<String>) {
        self.qr_code = value.into();
        self.errors.clear("qrCode");
    }

    /// Select the location type, clearing detail fields the new type no
    /// longer needs.
    pub fn set_location_type(&mut self, location_type: Option<LocationType>) {
        if self.location_type == location_type {
            return;
        }
        self.location_type = location_type;
        self.errors.clear("locationType");

        if location_type != Some(LocationType::ProductionFloor) {
            self.production_floor.clear();
            self.errors.clear("productionFloor");
        }
        if location_type != Some(LocationType::Warehouse) {
            self.warehouse_id.clear();
            self.errors.clear("warehouseId");
        }
        if location_type != Some(LocationType::FieldEngineer) {
            self.field_engineer_id.clear();
            self.errors.clear("fieldEngineerId");
        }
        if location_type != Some(LocationType::Vehicle) {
            self.vehicle_number.clear();
            self.errors.clear("vehicleNumber");
        }
    }

    pub fn set_production_floor(&mut self, value: impl Into<String>) {
        self.production_floor = value.into();
        self.errors.clear("productionFloor");
    }

    pub fn set_warehouse_id(&mut self, value: impl Into<String>) {
        self.warehouse_id = value.into();
        self.errors.clear("warehouseId");
    }

    pub fn set_field_engineer_id(&mut self, value: impl Into<String>) {
        self.field_engineer_id = value.into();
        self.errors.clear("fieldEngineerId");
    }

    pub fn set_vehicle_number(&mut self, value: impl Into<String>) {
        self.vehicle_number = value.into();
        self.errors.clear("vehicleNumber");
    }

    pub fn set_production_warehouse_id(&mut self, value: impl Into<String>) {
        self.production_warehouse_id = value.into();
        self.errors.clear("productionWarehouseId");
    }

    pub fn set_installation_requisition_id(&mut self, value: impl Into<String>) {
        self.installation_requisition_id = value.into();
        self.errors.clear("installationRequisitionId");
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Validate every field, replacing the error map. Returns `true` when
    /// the form may be submitted.
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::new();

        require(&mut errors, "imei", &self.imei, "IMEI");
        require(&mut errors, "qrCode", &self.qr_code, "QR code");

        match self.location_type {
            None => errors.insert("locationType", "Location type is required"),
            Some(LocationType::ProductionFloor) => require(
                &mut errors,
                "productionFloor",
                &self.production_floor,
                "Production floor",
            ),
            Some(LocationType::Warehouse) => {
                require(&mut errors, "warehouseId", &self.warehouse_id, "Warehouse");
            }
            Some(LocationType::FieldEngineer) => require(
                &mut errors,
                "fieldEngineerId",
                &self.field_engineer_id,
                "Field engineer",
            ),
            Some(LocationType::Vehicle) => require(
                &mut errors,
                "vehicleNumber",
                &self.vehicle_number,
                "Vehicle number",
            ),
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    /// Claim the submit slot. Returns `false` while a submit is in flight.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Assemble the complete payload — every field, changed or not.
    pub fn payload(&self) -> DeviceRecord {
        let opt = |s: &str| (!s.trim().is_empty()).then(|| s.trim().to_owned());

        DeviceRecord {
            id: self.mode.record_id().unwrap_or_default().to_owned(),
            imei: self.imei.trim().to_owned(),
            qr_code: opt(&self.qr_code),
            location_type: self.location_type.map(|t| t.to_string()),
            production_floor: opt(&self.production_floor),
            warehouse_id: opt(&self.warehouse_id),
            field_engineer_id: opt(&self.field_engineer_id),
            vehicle_number: opt(&self.vehicle_number),
            production_warehouse_id: opt(&self.production_warehouse_id),
            installation_requisition_id: opt(&self.installation_requisition_id),
            ..DeviceRecord::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_form_blocks_submission_with_errors_on_every_required_field() {
        let mut form = DeviceForm::new();

        assert!(!form.validate());
        assert!(form.errors().get("imei").is_some());
        assert!(form.errors().get("qrCode").is_some());
        assert!(form.errors().get("locationType").is_some());
    }

    #[test]
    fn correcting_a_field_clears_only_that_error() {
        let mut form = DeviceForm::new();
        form.validate();
        let before = form.errors().len();

        form.set_imei("350000000000001");

        assert_eq!(form.errors().get("imei"), None);
        assert_eq!(form.errors().len(), before - 1);
        assert!(form.errors().get("qrCode").is_some());
    }

    #[test]
    fn detail_field_requirement_follows_location_type() {
        let mut form = DeviceForm::new();
        form.set_imei("350000000000001");
        form.set_qr_code("QR-1");
        form.set_location_type(Some(LocationType::Vehicle));

        assert!(!form.validate());
        assert!(form.errors().get("vehicleNumber").is_some());
        assert_eq!(form.errors().get("warehouseId"), None);

        form.set_vehicle_number("MH12 AB 1234");
        assert!(form.validate());
    }

    #[test]
    fn changing_location_type_clears_stale_detail() {
        let mut form = DeviceForm::new();
        form.set_location_type(Some(LocationType::Vehicle));
        form.set_vehicle_number("MH12 AB 1234");

        form.set_location_type(Some(LocationType::Warehouse));

        assert!(form.vehicle_number.is_empty());
        let payload = form.payload();
        assert_eq!(payload.vehicle_number, None);
        assert_eq!(payload.location_type.as_deref(), Some("WAREHOUSE"));
    }

    #[test]
    fn imei_is_locked_in_edit_mode() {
        let device = Device {
            id: "d1".into(),
            imei: "350000000000001".into(),
            qr_code: "QR-1".into(),
            location: Some(DeviceLocation::Vehicle {
                vehicle_number: "MH12 AB 1234".into(),
            }),
            production_warehouse_id: None,
            installation_requisition_id: None,
            movements: Vec::new(),
            created_at: None,
            updated_at: None,
        };

        let mut form = DeviceForm::edit(&device);
        assert!(!form.imei_editable());

        form.set_imei("other");
        assert_eq!(form.imei, "350000000000001");
        assert_eq!(form.payload().id, "d1");
    }

    #[test]
    fn submit_guard_rejects_reentry() {
        let mut form = DeviceForm::new();
        assert!(form.begin_submit());
        assert!(!form.begin_submit());
        form.finish_submit();
        assert!(form.begin_submit());
    }
}
