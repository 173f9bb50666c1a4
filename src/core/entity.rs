//! Entity traits defining the core abstraction for all conference data types

use crate::core::field::FieldSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier, unique per entity kind
pub type EntityId = i64;

/// The kinds of entity managed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    State,
    Location,
    Conference,
    Attendee,
    Presentation,
}

impl EntityKind {
    /// The singular resource name (e.g., "location")
    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::State => "state",
            EntityKind::Location => "location",
            EntityKind::Conference => "conference",
            EntityKind::Attendee => "attendee",
            EntityKind::Presentation => "presentation",
        }
    }

    /// The plural resource name used in URLs and list envelopes
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::State => "states",
            EntityKind::Location => "locations",
            EntityKind::Conference => "conferences",
            EntityKind::Attendee => "attendees",
            EntityKind::Presentation => "presentations",
        }
    }

    /// Capitalized name used in client-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::State => "State",
            EntityKind::Location => "Location",
            EntityKind::Conference => "Conference",
            EntityKind::Attendee => "Attendee",
            EntityKind::Presentation => "Presentation",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// A typed pointer to a stored entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: EntityId,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: EntityId) -> Self {
        Self { kind, id }
    }
}

/// Base trait for all entities in the system.
///
/// Every entity has:
/// - an identifier assigned by the store on insert
/// - a human-readable name (a title, for presentations)
/// - dynamic field access through [`FieldSource`], used by the encoder
///
/// Timestamps are owned by the store: it calls [`Entity::mark_created`] on
/// insert and [`Entity::mark_updated`] on every write. Entities without the
/// corresponding column keep the default no-op.
pub trait Entity: FieldSource + Clone + Send + Sync + 'static {
    /// The kind of this entity type
    const KIND: EntityKind;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> EntityId;

    /// Set the identifier (store use only)
    fn assign_id(&mut self, id: EntityId);

    /// Get the display name
    fn name(&self) -> &str;

    /// Stamp the creation time
    fn mark_created(&mut self, _at: DateTime<Utc>) {}

    /// Stamp the last modification time
    fn mark_updated(&mut self, _at: DateTime<Utc>) {}

    /// Entities this one points at, used to prefetch relation summaries
    fn relations(&self) -> Vec<EntityRef> {
        Vec::new()
    }

    /// Reference to this entity
    fn entity_ref(&self) -> EntityRef {
        EntityRef::new(Self::KIND, self.id())
    }
}
