// Warehouse create/edit form model.

use fleetdeck_api::models::WarehouseRecord;

use super::validate::{is_valid_email, is_valid_mobile, require, MIN_MOBILE_DIGITS};
use super::{FieldErrors, FormMode};
use crate::model::{OwnerType, Warehouse, WarehouseStatus, WarehouseType};

/// Form state for creating or editing a warehouse.
///
/// Owner type gates the aggregator dropdown: selecting anything other than
/// AGGREGATOR clears the chosen aggregator and disables the field. The
/// aggregator option list itself is fetched once by the screen that mounts
/// the form and filtered client-side.
#[derive(Debug, Clone)]
pub struct WarehouseForm {
    mode: FormMode,
    pub code: String,
    pub name: String,
    pub warehouse_type: Option<WarehouseType>,
    pub owner_type: Option<OwnerType>,
    pub aggregator_id: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub latitude: String,
    pub longitude: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_mobile: String,
    pub status: WarehouseStatus,
    pub remarks: String,
    errors: FieldErrors,
    submitting: bool,
}

impl Default for WarehouseForm {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            code: String::new(),
            name: String::new(),
            warehouse_type: None,
            owner_type: None,
            aggregator_id: String::new(),
            address_line: String::new(),
            city: String::new(),
            state: String::new(),
            pincode: String::new(),
            latitude: String::new(),
            longitude: String::new(),
            contact_name: String::new(),
            contact_email: String::new(),
            contact_mobile: String::new(),
            status: WarehouseStatus::Active,
            remarks: String::new(),
            errors: FieldErrors::new(),
            submitting: false,
        }
    }
}

impl WarehouseForm {
    /// Empty form in create mode. New warehouses start ACTIVE.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form hydrated from a fetched warehouse, in edit mode.
    pub fn edit(warehouse: &Warehouse) -> Self {
        Self {
            mode: FormMode::Edit {
                id: warehouse.id.clone(),
            },
            code: warehouse.code.clone(),
            name: warehouse.name.clone(),
            warehouse_type: warehouse.warehouse_type,
            owner_type: warehouse.owner_type,
            aggregator_id: warehouse.aggregator_id.clone().unwrap_or_default(),
            address_line: warehouse.address_line.clone(),
            city: warehouse.city.clone(),
            state: warehouse.state.clone(),
            pincode: warehouse.pincode.clone(),
            latitude: warehouse
                .latitude
                .map(|v| v.to_string())
                .unwrap_or_default(),
            longitude: warehouse
                .longitude
                .map(|v| v.to_string())
                .unwrap_or_default(),
            contact_name: warehouse.contact_name.clone(),
            contact_email: warehouse.contact_email.clone(),
            contact_mobile: warehouse.contact_mobile.clone(),
            status: warehouse.status,
            remarks: warehouse.remarks.clone(),
            ..Self::default()
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Warehouse code is immutable once the record exists.
    pub fn code_editable(&self) -> bool {
        !self.mode.is_edit()
    }

    /// The aggregator dropdown is usable only for aggregator-owned sites.
    pub fn aggregator_enabled(&self) -> bool {
        self.owner_type == Some(OwnerType::Aggregator)
    }

    // ── Field setters (each clears only its own error) ───────────────

    pub fn set_code(&mut self, value: impl Into<String>) {
        if self.code_editable() {
            self.code = value.into();
            self.errors.clear("code");
        }
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.errors.clear("name");
    }

    pub fn set_warehouse_type(&mut self, value: Option<WarehouseType>) {
        self.warehouse_type = value;
        self.errors.clear("warehouseType");
    }

    /// Select the owner type. Moving away from AGGREGATOR clears the
    /// selected aggregator and its error — the dropdown is disabled.
    pub fn set_owner_type(&mut self, value: Option<OwnerType>) {
        self.owner_type = value;
        self.errors.clear("ownerType");

        if value != Some(OwnerType::Aggregator) {
            self.aggregator_id.clear();
            self.errors.clear("aggregatorId");
        }
    }

    pub fn set_aggregator_id(&mut self, value: impl Into<String>) {
        if self.aggregator_enabled() {
            self.aggregator_id = value.into();
            self.errors.clear("aggregatorId");
        }
    }

    pub fn set_address_line(&mut self, value: impl Into<String>) {
        self.address_line = value.into();
        self.errors.clear("addressLine");
    }

    pub fn set_city(&mut self, value: impl Into<String>) {
        self.city = value.into();
        self.errors.clear("city");
    }

    pub fn set_state(&mut self, value: impl Into<String>) {
        self.state = value.into();
        self.errors.clear("state");
    }

    pub fn set_pincode(&mut self, value: impl Into<String>) {
        self.pincode = value.into();
        self.errors.clear("pincode");
    }

    pub fn set_latitude(&mut self, value: impl Into<String>) {
        self.latitude = value.into();
        self.errors.clear("latitude");
    }

    pub fn set_longitude(&mut self, value: impl Into<String>) {
        self.longitude = value.into();
        self.errors.clear("longitude");
    }

    pub fn set_contact_name(&mut self, value: impl Into<String>) {
        self.contact_name = value.into();
        self.errors.clear("contactName");
    }

    pub fn set_contact_email(&mut self, value: impl Into<String>) {
        self.contact_email = value.into();
        self.errors.clear("contactEmail");
    }

    pub fn set_contact_mobile(&mut self, value: impl Into<String>) {
        self.contact_mobile = value.into();
        self.errors.clear("contactMobile");
    }

    pub fn set_status(&mut self, value: WarehouseStatus) {
        self.status = value;
    }

    pub fn set_remarks(&mut self, value: impl Into<String>) {
        self.remarks = value.into();
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Validate every field, replacing the error map. Returns `true` when
    /// the form may be submitted.
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::new();

        require(&mut errors, "code", &self.code, "Code");
        require(&mut errors, "name", &self.name, "Name");
        if self.warehouse_type.is_none() {
            errors.insert("warehouseType", "Warehouse type is required");
        }
        match self.owner_type {
            None => errors.insert("ownerType", "Owner type is required"),
            Some(OwnerType::Aggregator) => {
                require(&mut errors, "aggregatorId", &self.aggregator_id, "Aggregator");
            }
            Some(OwnerType::Xconics) => {}
        }
        require(&mut errors, "addressLine", &self.address_line, "Address");
        require(&mut errors, "city", &self.city, "City");
        require(&mut errors, "state", &self.state, "State");
        require(&mut errors, "pincode", &self.pincode, "Pincode");
        require(&mut errors, "contactName", &self.contact_name, "Contact name");

        if self.contact_email.trim().is_empty() {
            errors.insert("contactEmail", "Contact email is required");
        } else if !is_valid_email(self.contact_email.trim()) {
            errors.insert("contactEmail", "Enter a valid email address");
        }

        if self.contact_mobile.trim().is_empty() {
            errors.insert("contactMobile", "Contact mobile is required");
        } else if !is_valid_mobile(self.contact_mobile.trim()) {
            errors.insert(
                "contactMobile",
                format!("Mobile number needs at least {MIN_MOBILE_DIGITS} digits"),
            );
        }

        for (field, value) in [("latitude", &self.latitude), ("longitude", &self.longitude)] {
            if !value.trim().is_empty() && value.trim().parse::<f64>().is_err() {
                errors.insert(field, "Enter a decimal coordinate");
            }
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
    pub fn payload(&self) -> WarehouseRecord {
        let opt = |s: &str| (!s.trim().is_empty()).then(|| s.trim().to_owned());

        WarehouseRecord {
            id: self.mode.record_id().unwrap_or_default().to_owned(),
            code: self.code.trim().to_owned(),
            name: self.name.trim().to_owned(),
            warehouse_type: self.warehouse_type.map(|t| t.to_string()),
            owner_type: self.owner_type.map(|t| t.to_string()),
            aggregator_id: opt(&self.aggregator_id),
            address_line: opt(&self.address_line),
            city: opt(&self.city),
            state: opt(&self.state),
            pincode: opt(&self.pincode),
            latitude: self.latitude.trim().parse().ok(),
            longitude: self.longitude.trim().parse().ok(),
            contact_name: opt(&self.contact_name),
            contact_email: opt(&self.contact_email),
            contact_mobile: opt(&self.contact_mobile),
            status: Some(self.status.to_string()),
            remarks: opt(&self.remarks),
            ..WarehouseRecord::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn filled_form() -> WarehouseForm {
        let mut form = WarehouseForm::new();
        form.set_code("WH-PUN-01");
        form.set_name("Pune Regional");
        form.set_warehouse_type(Some(WarehouseType::Regional));
        form.set_owner_type(Some(OwnerType::Xconics));
        form.set_address_line("Plot 14, MIDC");
        form.set_city("Pune");
        form.set_state("Maharashtra");
        form.set_pincode("411001");
        form.set_contact_name("S. Kulkarni");
        form.set_contact_email("ops@example.com");
        form.set_contact_mobile("9822012345");
        form
    }

    #[test]
    fn filled_form_validates() {
        let mut form = filled_form();
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn empty_form_collects_an_error_per_required_field() {
        let mut form = WarehouseForm::new();
        assert!(!form.validate());

        for field in [
            "code",
            "name",
            "warehouseType",
            "ownerType",
            "addressLine",
            "city",
            "state",
            "pincode",
            "contactName",
            "contactEmail",
            "contactMobile",
        ] {
            assert!(form.errors().get(field).is_some(), "missing error: {field}");
        }
    }

    #[test]
    fn aggregator_required_iff_owner_is_aggregator() {
        let mut form = filled_form();
        form.set_owner_type(Some(OwnerType::Aggregator));

        // No aggregator selected — validation must fail on that field alone.
        assert!(!form.validate());
        assert!(form.errors().get("aggregatorId").is_some());
        assert_eq!(form.errors().len(), 1);

        form.set_aggregator_id("agg-3");
        assert!(form.validate());
    }

    #[test]
    fn switching_owner_away_from_aggregator_clears_selection() {
        let mut form = filled_form();
        form.set_owner_type(Some(OwnerType::Aggregator));
        form.set_aggregator_id("agg-3");
        assert!(form.aggregator_enabled());

        form.set_owner_type(Some(OwnerType::Xconics));

        assert!(!form.aggregator_enabled());
        assert!(form.aggregator_id.is_empty());
        // Disabled dropdown refuses input.
        form.set_aggregator_id("agg-9");
        assert!(form.aggregator_id.is_empty());
        assert_eq!(form.payload().aggregator_id, None);
    }

    #[test]
    fn email_and_mobile_shapes_are_checked() {
        let mut form = filled_form();
        form.set_contact_email("not-an-email");
        form.set_contact_mobile("12345");

        assert!(!form.validate());
        assert!(form.errors().get("contactEmail").is_some());
        assert!(form.errors().get("contactMobile").is_some());
    }

    #[test]
    fn fixing_one_field_keeps_the_other_error() {
        let mut form = filled_form();
        form.set_contact_email("bad");
        form.set_contact_mobile("12345");
        form.validate();

        form.set_contact_email("ops@example.com");

        assert_eq!(form.errors().get("contactEmail"), None);
        assert!(form.errors().get("contactMobile").is_some());
    }

    #[test]
    fn payload_carries_every_field_including_status() {
        let mut form = filled_form();
        form.set_status(WarehouseStatus::Suspended);
        form.set_remarks("monsoon closure");

        let payload = form.payload();

        assert_eq!(payload.code, "WH-PUN-01");
        assert_eq!(payload.warehouse_type.as_deref(), Some("REGIONAL"));
        assert_eq!(payload.owner_type.as_deref(), Some("XCONICS"));
        assert_eq!(payload.status.as_deref(), Some("SUSPENDED"));
        assert_eq!(payload.remarks.as_deref(), Some("monsoon closure"));
    }

    #[test]
    fn code_is_locked_in_edit_mode() {
        let mut form = filled_form();
        assert!(form.validate());
        let warehouse = Warehouse::from(form.payload());

        let mut edit = WarehouseForm::edit(&warehouse);
        assert!(!edit.code_editable());
        edit.set_code("WH-OTHER");
        assert_eq!(edit.code, "WH-PUN-01");
    }

    #[test]
    fn coordinates_must_be_decimal_when_present() {
        let mut form = filled_form();
        form.set_latitude("18.52");
        form.set_longitude("east-ish");

        assert!(!form.validate());
        assert_eq!(form.errors().get("latitude"), None);
        assert!(form.errors().get("longitude").is_some());

        form.set_longitude("73.85");
        assert!(form.validate());
        let payload = form.payload();
        assert_eq!(payload.latitude, Some(18.52));
        assert_eq!(payload.longitude, Some(73.85));
    }
}
