//! State entity model

use crate::core::{Entity, EntityId, EntityKind, FieldSource, FieldValue};
use serde::{Deserialize, Serialize};

/// A US state (or district), referenced by locations through its abbreviation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
    /// Two-letter code, unique across states
    pub abbreviation: String,
}

impl State {
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            abbreviation: abbreviation.into(),
        }
    }
}

impl FieldSource for State {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Integer(self.id),
            "name" => FieldValue::from(self.name.as_str()),
            "abbreviation" => FieldValue::from(self.abbreviation.as_str()),
            _ => return None,
        };
        Some(value)
    }
}

impl Entity for State {
    const KIND: EntityKind = EntityKind::State;

    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }
}
