//! Conference entity model and its write payload

use crate::core::error::{ApiError, require};
use crate::core::{present, Entity, EntityId, EntityKind, EntityRef, FieldSource, FieldValue};
use crate::resolver::ResolvedReference;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// A conference held at a location
#[derive(Debug, Clone, PartialEq)]
pub struct Conference {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub max_presentations: i64,
    pub max_attendees: i64,
    pub starts: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub location_id: EntityId,
}

/// Schedule and capacity of a conference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConferencePlan {
    pub max_presentations: i64,
    pub max_attendees: i64,
    pub starts: DateTime<Utc>,
    pub ends: DateTime<Utc>,
}

impl Conference {
    pub fn new(
        name: String,
        description: String,
        plan: ConferencePlan,
        location_id: EntityId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name,
            description,
            max_presentations: plan.max_presentations,
            max_attendees: plan.max_attendees,
            starts: plan.starts,
            ends: plan.ends,
            created: now,
            updated: now,
            location_id,
        }
    }

    /// Build a new conference from a create payload and its resolved location
    pub fn from_input(
        input: ConferenceInput,
        location: &ResolvedReference,
    ) -> Result<Self, ApiError> {
        let plan = ConferencePlan {
            max_presentations: require(input.max_presentations, "max_presentations")?,
            max_attendees: require(input.max_attendees, "max_attendees")?,
            starts: require(input.starts, "starts")?,
            ends: require(input.ends, "ends")?,
        };
        Ok(Self::new(
            require(input.name, "name")?,
            require(input.description, "description")?,
            plan,
            location.target.id,
        ))
    }

    /// Apply the supplied fields of an update payload
    pub fn apply(&mut self, input: ConferenceInput, location: Option<&ResolvedReference>) {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(max_presentations) = input.max_presentations {
            self.max_presentations = max_presentations;
        }
        if let Some(max_attendees) = input.max_attendees {
            self.max_attendees = max_attendees;
        }
        if let Some(starts) = input.starts {
            self.starts = starts;
        }
        if let Some(ends) = input.ends {
            self.ends = ends;
        }
        if let Some(location) = location {
            self.location_id = location.target.id;
        }
    }

    fn location_ref(&self) -> EntityRef {
        EntityRef::new(EntityKind::Location, self.location_id)
    }
}

/// Write payload for conferences; `location` carries the raw location id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConferenceInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub max_presentations: Option<i64>,
    pub max_attendees: Option<i64>,
    pub starts: Option<DateTime<Utc>>,
    pub ends: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Value>,
}

impl FieldSource for Conference {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Integer(self.id),
            "name" => FieldValue::from(self.name.as_str()),
            "description" => FieldValue::from(self.description.as_str()),
            "max_presentations" => FieldValue::Integer(self.max_presentations),
            "max_attendees" => FieldValue::Integer(self.max_attendees),
            "starts" => FieldValue::DateTime(self.starts),
            "ends" => FieldValue::DateTime(self.ends),
            "created" => FieldValue::DateTime(self.created),
            "updated" => FieldValue::DateTime(self.updated),
            "location" => FieldValue::Reference(self.location_ref()),
            _ => return None,
        };
        Some(value)
    }
}

impl Entity for Conference {
    const KIND: EntityKind = EntityKind::Conference;

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
        vec![self.location_ref()]
    }
}
