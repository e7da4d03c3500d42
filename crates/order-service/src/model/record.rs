//! # Record Mapping
//!
//! Conversion between entities and the flat JSON objects used on the wire.
//!
//! [`Record::serialize`] produces the object. [`Record::deserialize`] reads one into an
//! existing entity with these rules:
//!
//! - input that is not an object is rejected,
//! - a missing required key is rejected, naming the key,
//! - a key holding the wrong type (including `null` for a required key) is rejected, naming the key,
//! - unknown keys are ignored,
//! - optional keys are only applied when present,
//! - on any error the entity is left untouched.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Raised when a payload cannot be mapped onto an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataValidationError {
    #[error("Invalid {entity}: body of request contained bad or no data")]
    NotAMapping { entity: &'static str },

    #[error("Invalid {entity}: missing {field}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("Invalid {entity}: bad value for {field}: {reason}")]
    InvalidField {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },
}

impl DataValidationError {
    /// The offending key, if the error is about a single field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DataValidationError::NotAMapping { .. } => None,
            DataValidationError::MissingField { field, .. }
            | DataValidationError::InvalidField { field, .. } => Some(field),
        }
    }
}

/// An entity with a flat JSON representation.
pub trait Record: Default {
    /// Entity name used in validation messages.
    const KIND: &'static str;

    fn serialize(&self) -> Value;

    fn deserialize(&mut self, data: &Value) -> Result<&mut Self, DataValidationError>;

    /// Deserializes into a fresh default entity.
    fn from_value(data: &Value) -> Result<Self, DataValidationError> {
        let mut record = Self::default();
        record.deserialize(data)?;
        Ok(record)
    }
}

/// Typed access to the keys of a payload object.
pub(crate) struct Fields<'a> {
    entity: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub(crate) fn of(entity: &'static str, data: &'a Value) -> Result<Self, DataValidationError> {
        match data {
            Value::Object(map) => Ok(Self { entity, map }),
            _ => Err(DataValidationError::NotAMapping { entity }),
        }
    }

    pub(crate) fn required<T: DeserializeOwned>(
        &self,
        field: &'static str,
    ) -> Result<T, DataValidationError> {
        let value = self
            .map
            .get(field)
            .ok_or(DataValidationError::MissingField {
                entity: self.entity,
                field,
            })?;
        self.convert(field, value)
    }

    /// `None` when the key is absent or `null`.
    pub(crate) fn optional<T: DeserializeOwned>(
        &self,
        field: &'static str,
    ) -> Result<Option<T>, DataValidationError> {
        match self.map.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => self.convert(field, value).map(Some),
        }
    }

    /// The raw value under `field`, treating `null` as absent.
    pub(crate) fn raw(&self, field: &'static str) -> Option<&'a Value> {
        self.map.get(field).filter(|value| !value.is_null())
    }

    pub(crate) fn invalid(&self, field: &'static str, reason: impl Into<String>) -> DataValidationError {
        DataValidationError::InvalidField {
            entity: self.entity,
            field,
            reason: reason.into(),
        }
    }

    fn convert<T: DeserializeOwned>(
        &self,
        field: &'static str,
        value: &Value,
    ) -> Result<T, DataValidationError> {
        T::deserialize(value).map_err(|e| self.invalid(field, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_is_rejected() {
        for data in [json!("Not a dictionary"), json!([1, 2]), json!(null), json!(4)] {
            let err = Fields::of("Thing", &data).err().unwrap();
            assert_eq!(err, DataValidationError::NotAMapping { entity: "Thing" });
        }
    }

    #[test]
    fn test_required_names_missing_key() {
        let data = json!({"other": 1});
        let fields = Fields::of("Thing", &data).unwrap();
        let err = fields.required::<i64>("count").unwrap_err();
        assert_eq!(err.field(), Some("count"));
        assert_eq!(err.to_string(), "Invalid Thing: missing count");
    }

    #[test]
    fn test_required_rejects_null_and_wrong_type() {
        let data = json!({"count": null, "name": 5});
        let fields = Fields::of("Thing", &data).unwrap();
        assert!(matches!(
            fields.required::<i64>("count"),
            Err(DataValidationError::InvalidField { field: "count", .. })
        ));
        assert!(matches!(
            fields.required::<String>("name"),
            Err(DataValidationError::InvalidField { field: "name", .. })
        ));
    }

    #[test]
    fn test_optional_treats_null_as_absent() {
        let data = json!({"count": null, "size": 3});
        let fields = Fields::of("Thing", &data).unwrap();
        assert_eq!(fields.optional::<i64>("count").unwrap(), None);
        assert_eq!(fields.optional::<i64>("missing").unwrap(), None);
        assert_eq!(fields.optional::<i64>("size").unwrap(), Some(3));
        assert!(fields.raw("count").is_none());
    }
}
