//! Location entity model and its write payload

use crate::core::error::{ApiError, require};
use crate::core::{present, Entity, EntityId, EntityKind, EntityRef, FieldSource, FieldValue};
use crate::resolver::ResolvedReference;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// A venue inside a state
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: EntityId,
    pub name: String,
    pub city: String,
    pub room_count: i64,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub state_id: EntityId,
}

impl Location {
    pub fn new(name: String, city: String, room_count: i64, state_id: EntityId) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name,
            city,
            room_count,
            created: now,
            updated: now,
            state_id,
        }
    }

    /// Build a new location from a create payload and its resolved state
    pub fn from_input(input: LocationInput, state: &ResolvedReference) -> Result<Self, ApiError> {
        Ok(Self::new(
            require(input.name, "name")?,
            require(input.city, "city")?,
            require(input.room_count, "room_count")?,
            state.target.id,
        ))
    }

    /// Apply the supplied fields of an update payload
    pub fn apply(&mut self, input: LocationInput, state: Option<&ResolvedReference>) {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(city) = input.city {
            self.city = city;
        }
        if let Some(room_count) = input.room_count {
            self.room_count = room_count;
        }
        if let Some(state) = state {
            self.state_id = state.target.id;
        }
    }

    fn state_ref(&self) -> EntityRef {
        EntityRef::new(EntityKind::State, self.state_id)
    }
}

/// Write payload for locations; `state` carries the raw two-letter code
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationInput {
    pub name: Option<String>,
    pub city: Option<String>,
    pub room_count: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub state: Option<Value>,
}

impl FieldSource for Location {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Integer(self.id),
            "name" => FieldValue::from(self.name.as_str()),
            "city" => FieldValue::from(self.city.as_str()),
            "room_count" => FieldValue::Integer(self.room_count),
            "created" => FieldValue::DateTime(self.created),
            "updated" => FieldValue::DateTime(self.updated),
            "state" => FieldValue::Reference(self.state_ref()),
            _ => return None,
        };
        Some(value)
    }
}

impl Entity for Location {
    const KIND: EntityKind = EntityKind::Location;

    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn mark_created(&mut self, at: DateTime<Utc>) {
        self.created = at;
    }

    fn mark_updated(&mut self, at: DateTime<Utc>) {
        self.updated = at;
    }

    fn relations(&self) -> Vec<EntityRef> {
        vec![self.state_ref()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::RelationSummary;
    use crate::resolver::ReferenceField;
    use serde_json::json;

    fn resolved_state(id: EntityId) -> ResolvedReference {
        ResolvedReference {
            field: ReferenceField::State,
            target: EntityRef::new(EntityKind::State, id),
            summary: RelationSummary::state("Illinois", "IL"),
        }
    }

    #[test]
    fn test_from_input_requires_fields() {
        let input: LocationInput =
            serde_json::from_value(json!({"name": "Hall A", "city": "Springfield"})).unwrap();

        let err = Location::from_input(input, &resolved_state(1)).unwrap_err();
        assert_eq!(err.to_string(), "Missing field 'room_count'");
    }

    #[test]
    fn test_from_input_uses_resolved_state() {
        let input: LocationInput = serde_json::from_value(json!({
            "name": "Hall A",
            "city": "Springfield",
            "room_count": 3,
            "state": "IL"
        }))
        .unwrap();

        let location = Location::from_input(input, &resolved_state(13)).unwrap();
        assert_eq!(location.state_id, 13);
        assert_eq!(location.relations(), vec![EntityRef::new(EntityKind::State, 13)]);
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut location =
            Location::new("Hall A".to_string(), "Springfield".to_string(), 3, 13);
        let original = location.clone();

        let input: LocationInput = serde_json::from_value(json!({"room_count": 8})).unwrap();
        location.apply(input, None);

        assert_eq!(location.room_count, 8);
        assert_eq!(location.name, original.name);
        assert_eq!(location.city, original.city);
        assert_eq!(location.state_id, original.state_id);
    }

    #[test]
    fn test_input_rejects_timestamps() {
        let result = serde_json::from_value::<LocationInput>(json!({
            "name": "Hall A",
            "created": "2024-01-01T00:00:00Z"
        }));
        assert!(result.is_err());
    }
}
