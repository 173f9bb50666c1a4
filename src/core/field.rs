//! Field value types and dynamic field access

use crate::core::entity::EntityRef;
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde_json::Value;

/// A polymorphic field value that can hold the types used by the entities
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    DateTime(DateTime<Utc>),
    /// A relation to another stored entity
    Reference(EntityRef),
    Null,
}

impl FieldValue {
    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Convert a scalar value to JSON.
    ///
    /// References have no scalar form and come back as `None`; the encoder
    /// expands them into relation summaries instead.
    pub fn to_scalar_json(&self) -> Option<Value> {
        match self {
            FieldValue::String(s) => Some(Value::String(s.clone())),
            FieldValue::Integer(i) => Some(Value::from(*i)),
            FieldValue::DateTime(dt) => {
                Some(Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
            }
            FieldValue::Null => Some(Value::Null),
            FieldValue::Reference(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<EntityRef> for FieldValue {
    fn from(value: EntityRef) -> Self {
        FieldValue::Reference(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Read access to named fields.
///
/// Implemented by every entity and by [`FieldMap`], so the encoder can work on
/// a stored entity or on a bare mapping of fields alike.
pub trait FieldSource {
    /// Get the value of a field by name, `None` if the field is not provided
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

/// A plain, ordered mapping of field names to values
pub type FieldMap = IndexMap<String, FieldValue>;

impl FieldSource for FieldMap {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        self.get(field).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::EntityKind;
    use chrono::TimeZone;

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::from("test");
        assert_eq!(value, FieldValue::String("test".to_string()));
        assert_eq!(value.as_integer(), None);
        assert_eq!(value.to_scalar_json(), Some(Value::from("test")));
    }

    #[test]
    fn test_field_value_integer() {
        let value = FieldValue::Integer(42);
        assert_eq!(value.as_integer(), Some(42));
        assert_eq!(value.to_scalar_json(), Some(Value::from(42)));
    }

    #[test]
    fn test_optional_values_become_null() {
        let value = FieldValue::from(None::<String>);
        assert_eq!(value, FieldValue::Null);
        assert_eq!(value.to_scalar_json(), Some(Value::Null));

        let value = FieldValue::from(Some("Acme".to_string()));
        assert_eq!(value, FieldValue::String("Acme".to_string()));
    }

    #[test]
    fn test_datetime_serializes_as_rfc3339() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let json = FieldValue::from(at).to_scalar_json().unwrap();
        assert_eq!(json, Value::String("2024-05-01T09:30:00Z".to_string()));
    }

    #[test]
    fn test_reference_has_no_scalar_form() {
        let value = FieldValue::from(EntityRef::new(EntityKind::State, 3));
        assert_eq!(value.to_scalar_json(), None);
        assert_eq!(value.as_integer(), None);
    }

    #[test]
    fn test_field_map_source() {
        let mut map = FieldMap::new();
        map.insert("name".to_string(), FieldValue::from("Ada"));

        assert_eq!(map.field_value("name"), Some(FieldValue::from("Ada")));
        assert_eq!(map.field_value("email"), None);
    }
}
