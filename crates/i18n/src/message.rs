use std::fmt;

use serde::Serialize;
use vigil_validator::core::{Constraint, ConstraintViolation, Value};

/// A violation together with its localized message.
///
/// Serializes as camelCase JSON for transport adapters:
///
/// ```json
/// {
///   "propertyPath": "salary",
///   "value": 10000,
///   "constraint": {"name": "vigil.constraints.Between", "messageKey": "...", "params": {"start": 1, "end": 9876}},
///   "message": "Must be between 1 and 9,876"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintViolationMessage {
    pub property_path: String,
    pub value: Option<Value>,
    pub constraint: Constraint,
    pub message: String,
}

impl ConstraintViolationMessage {
    pub fn new(violation: &ConstraintViolation, message: impl Into<String>) -> Self {
        Self {
            property_path: violation.property_path().to_owned(),
            value: violation.value().cloned(),
            constraint: violation.constraint().clone(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConstraintViolationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.property_path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.property_path, self.message)
        }
    }
}
