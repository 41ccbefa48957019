use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Postal address embedded in doctor and patient records. Replaced as a whole,
/// never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub district: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
    pub complement: Option<String>,
    pub number: Option<String>,
}

impl Address {
    /// Collects blank-field errors, prefixing each field name with `prefix`.
    pub fn blank_fields(&self, prefix: &str) -> Vec<FieldError> {
        [
            ("street", &self.street),
            ("district", &self.district),
            ("postal_code", &self.postal_code),
            ("city", &self.city),
            ("state", &self.state),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| FieldError::new(format!("{}.{}", prefix, field), "must not be blank"))
        .collect()
    }
}
