//! Attendee entity model and its write payload

use crate::core::error::{ApiError, require};
use crate::core::{present, Entity, EntityId, EntityKind, EntityRef, FieldSource, FieldValue};
use crate::resolver::ResolvedReference;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// A person registered for a conference
#[derive(Debug, Clone, PartialEq)]
pub struct Attendee {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub company_name: Option<String>,
    pub created: DateTime<Utc>,
    /// Nullable in the schema; encodes as `null` when unset
    pub conference_id: Option<EntityId>,
}

impl Attendee {
    pub fn new(
        name: String,
        email: String,
        company_name: Option<String>,
        conference_id: EntityId,
    ) -> Self {
        Self {
            id: 0,
            name,
            email,
            company_name,
            created: Utc::now(),
            conference_id: Some(conference_id),
        }
    }

    /// Build a new attendee from a create payload and its resolved conference
    pub fn from_input(
        input: AttendeeInput,
        conference: &ResolvedReference,
    ) -> Result<Self, ApiError> {
        Ok(Self::new(
            require(input.name, "name")?,
            require(input.email, "email")?,
            input.company_name.flatten(),
            conference.target.id,
        ))
    }

    /// Apply the supplied fields of an update payload
    pub fn apply(&mut self, input: AttendeeInput, conference: Option<&ResolvedReference>) {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(email) = input.email {
            self.email = email;
        }
        if let Some(company_name) = input.company_name {
            self.company_name = company_name;
        }
        if let Some(conference) = conference {
            self.conference_id = Some(conference.target.id);
        }
    }

    fn conference_ref(&self) -> Option<EntityRef> {
        self.conference_id
            .map(|id| EntityRef::new(EntityKind::Conference, id))
    }
}

/// Write payload for attendees.
///
/// On create the conference comes from the route; `conference` is only
/// honored on update, where it carries the raw conference id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttendeeInput {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub company_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub conference: Option<Value>,
}

impl FieldSource for Attendee {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Integer(self.id),
            "name" => FieldValue::from(self.name.as_str()),
            "email" => FieldValue::from(self.email.as_str()),
            "company_name" => FieldValue::from(self.company_name.clone()),
            "created" => FieldValue::DateTime(self.created),
            "conference" => FieldValue::from(self.conference_ref()),
            _ => return None,
        };
        Some(value)
    }
}

impl Entity for Attendee {
    const KIND: EntityKind = EntityKind::Attendee;

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

    fn relations(&self) -> Vec<EntityRef> {
        self.conference_ref().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_conference_is_null_field() {
        let mut attendee = Attendee::new(
            "Ada".to_string(),
            "ada@x.com".to_string(),
            Some("Acme".to_string()),
            5,
        );
        attendee.conference_id = None;

        assert_eq!(attendee.field_value("conference"), Some(FieldValue::Null));
        assert!(attendee.relations().is_empty());
    }

    #[test]
    fn test_company_name_is_optional() {
        let attendee = Attendee::new("Ada".to_string(), "ada@x.com".to_string(), None, 5);
        assert_eq!(attendee.field_value("company_name"), Some(FieldValue::Null));
        assert_eq!(
            attendee.field_value("conference"),
            Some(FieldValue::Reference(EntityRef::new(EntityKind::Conference, 5)))
        );
    }
}
