// ── Form controller ──
//
// Create/edit form models for the device and warehouse resources. Validation
// runs synchronously at submit time into an insertion-ordered field → message
// map; editing a field clears only that field's error. Submission assembles
// the complete current model as the payload — the service has no partial
// update semantics.

mod device;
mod validate;
mod warehouse;

pub use device::DeviceForm;
pub use warehouse::WarehouseForm;

use indexmap::IndexMap;

/// Whether the form creates a new record or edits an existing one.
///
/// Edit mode carries the record id and locks immutable fields
/// (device IMEI, warehouse code).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit {
        id: String,
    },
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit { .. })
    }

    pub fn record_id(&self) -> Option<&str> {
        match self {
            Self::Edit { id } => Some(id),
            Self::Create => None,
        }
    }
}

/// Per-field validation errors, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(IndexMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Clear one field's error — the only eager effect of editing a field.
    pub fn clear(&mut self, field: &str) {
        self.0.shift_remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}
