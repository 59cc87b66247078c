// src/backend/utils/shape.rs
//
// Coarse "does this look like one of our records" check used before accepting an import.

use serde_json::Value;
use std::fmt;

use crate::error::PlannerError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JsonKind {
    Array,
    Object,
    String,
}

impl JsonKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            JsonKind::Array => value.is_array(),
            JsonKind::Object => value.is_object(),
            JsonKind::String => value.is_string(),
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonKind::Array => "array",
            JsonKind::Object => "object",
            JsonKind::String => "string",
        };
        f.write_str(name)
    }
}

/// A top-level key and the coarse JSON type it must hold.
#[derive(Clone, Copy, Debug)]
pub struct FieldShape {
    pub key: &'static str,
    pub kind: JsonKind,
}

pub const fn field(key: &'static str, kind: JsonKind) -> FieldShape {
    FieldShape { key, kind }
}

/// Checks that `value` is an object holding every listed key with the listed coarse type.
/// Nested content is not inspected, so `{"contacts": [], ...}` passes.
///
/// # Errors
///
/// Returns `PlannerError::InvalidImport` naming the first missing or mistyped key.
pub fn check_required_fields(value: &Value, required: &[FieldShape]) -> Result<(), PlannerError> {
    let object = value
        .as_object()
        .ok_or_else(|| PlannerError::InvalidImport("expected a JSON object at top level".to_string()))?;

    for shape in required {
        match object.get(shape.key) {
            None => {
                return Err(PlannerError::InvalidImport(format!("missing key `{}`", shape.key)));
            }
            Some(found) if !shape.kind.matches(found) => {
                return Err(PlannerError::InvalidImport(format!(
                    "key `{}` should be of type {}",
                    shape.key, shape.kind
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SHAPE: &[FieldShape] = &[
        field("contacts", JsonKind::Array),
        field("medicalInfo", JsonKind::Object),
    ];

    #[test]
    fn accepts_semantically_empty_record() {
        let value = json!({"contacts": [], "medicalInfo": {}, "extra": 1});
        assert!(check_required_fields(&value, SHAPE).is_ok());
    }

    #[test]
    fn rejects_missing_key() {
        let err = check_required_fields(&json!({"foo": 1}), SHAPE).unwrap_err();
        assert_eq!(err, PlannerError::InvalidImport("missing key `contacts`".to_string()));
    }

    #[test]
    fn rejects_wrong_coarse_type() {
        let value = json!({"contacts": {}, "medicalInfo": {}});
        let err = check_required_fields(&value, SHAPE).unwrap_err();
        assert_eq!(err, PlannerError::InvalidImport("key `contacts` should be of type array".to_string()));
    }

    #[test]
    fn rejects_non_object() {
        assert!(check_required_fields(&json!([1, 2]), SHAPE).is_err());
        assert!(check_required_fields(&json!("text"), SHAPE).is_err());
    }
}
