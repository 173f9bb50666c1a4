//! Presentation entity model and its write payload

use crate::core::error::{ApiError, require};
use crate::core::{present, Entity, EntityId, EntityKind, EntityRef, FieldSource, FieldValue};
use crate::resolver::ResolvedReference;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Status given to presentations created without one
pub const DEFAULT_STATUS: &str = "SUBMITTED";

/// A talk submitted to a conference
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub id: EntityId,
    pub presenter_name: String,
    pub company_name: Option<String>,
    pub presenter_email: String,
    pub title: String,
    pub synopsis: String,
    /// Opaque to the API; stored and returned as given
    pub status: String,
    pub created: DateTime<Utc>,
    pub conference_id: EntityId,
}

impl Presentation {
    /// Build a new presentation from a create payload and its resolved conference
    pub fn from_input(
        input: PresentationInput,
        conference: &ResolvedReference,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            id: 0,
            presenter_name: require(input.presenter_name, "presenter_name")?,
            company_name: input.company_name.flatten(),
            presenter_email: require(input.presenter_email, "presenter_email")?,
            title: require(input.title, "title")?,
            synopsis: require(input.synopsis, "synopsis")?,
            status: input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            created: Utc::now(),
            conference_id: conference.target.id,
        })
    }

    /// Apply the supplied fields of an update payload
    pub fn apply(&mut self, input: PresentationInput, conference: Option<&ResolvedReference>) {
        if let Some(presenter_name) = input.presenter_name {
            self.presenter_name = presenter_name;
        }
        if let Some(company_name) = input.company_name {
            self.company_name = company_name;
        }
        if let Some(presenter_email) = input.presenter_email {
            self.presenter_email = presenter_email;
        }
        if let Some(title) = input.title {
            self.title = title;
        }
        if let Some(synopsis) = input.synopsis {
            self.synopsis = synopsis;
        }
        if let Some(status) = input.status {
            self.status = status;
        }
        if let Some(conference) = conference {
            self.conference_id = conference.target.id;
        }
    }

    fn conference_ref(&self) -> EntityRef {
        EntityRef::new(EntityKind::Conference, self.conference_id)
    }
}

/// Write payload for presentations.
///
/// On create the conference comes from the route; `conference` is only
/// honored on update, where it carries the raw conference id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresentationInput {
    pub presenter_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub company_name: Option<Option<String>>,
    pub presenter_email: Option<String>,
    pub title: Option<String>,
    pub synopsis: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub conference: Option<Value>,
}

impl FieldSource for Presentation {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Integer(self.id),
            "presenter_name" => FieldValue::from(self.presenter_name.as_str()),
            "company_name" => FieldValue::from(self.company_name.clone()),
            "presenter_email" => FieldValue::from(self.presenter_email.as_str()),
            "title" => FieldValue::from(self.title.as_str()),
            "synopsis" => FieldValue::from(self.synopsis.as_str()),
            "status" => FieldValue::from(self.status.as_str()),
            "created" => FieldValue::DateTime(self.created),
            "conference" => FieldValue::Reference(self.conference_ref()),
            _ => return None,
        };
        Some(value)
    }
}

impl Entity for Presentation {
    const KIND: EntityKind = EntityKind::Presentation;

    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.title
    }

    fn mark_created(&mut self, at: DateTime<Utc>) {
        self.created = at;
    }

    fn relations(&self) -> Vec<EntityRef> {
        vec![self.conference_ref()]
    }
}
