//! Reference resolution for write payloads
//!
//! Clients name related entities the way humans do: a state by its two-letter
//! abbreviation, a location or conference by its numeric id. The
//! [`ReferenceResolver`] turns those raw values into typed references before
//! any write happens, so a bad reference aborts the whole request.
//!
//! The same lookups feed [`ReferenceResolver::snapshot`], which prefetches the
//! relation summaries the encoder nests into detail responses.

use crate::core::{DataService, EntityId, EntityKind, EntityRef, FieldValue};
use crate::encoding::{RelationSnapshot, RelationSummary};
use crate::entities::{Conference, Location, State};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Payload fields that carry a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceField {
    State,
    Location,
    Conference,
}

impl ReferenceField {
    pub fn name(&self) -> &'static str {
        match self {
            ReferenceField::State => "state",
            ReferenceField::Location => "location",
            ReferenceField::Conference => "conference",
        }
    }

    /// Kind of entity the field points at
    pub fn target_kind(&self) -> EntityKind {
        match self {
            ReferenceField::State => EntityKind::State,
            ReferenceField::Location => EntityKind::Location,
            ReferenceField::Conference => EntityKind::Conference,
        }
    }

    /// What the client supplies for this field, as worded in error messages
    fn identifier_label(&self) -> &'static str {
        match self {
            ReferenceField::State => "state abbreviation",
            ReferenceField::Location => "location id",
            ReferenceField::Conference => "conference id",
        }
    }
}

impl fmt::Display for ReferenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw payload value translated into a stored relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    pub field: ReferenceField,
    pub target: EntityRef,
    pub summary: RelationSummary,
}

/// Failures while resolving a reference
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// No stored entity matches the supplied value
    #[error("Invalid {}", .0.identifier_label())]
    UnknownReference(ReferenceField, Value),

    /// The store failed during the lookup
    #[error("reference lookup failed: {0}")]
    Lookup(#[from] anyhow::Error),
}

/// Resolves payload references against the entity store
#[derive(Clone)]
pub struct ReferenceResolver {
    states: Arc<dyn DataService<State>>,
    locations: Arc<dyn DataService<Location>>,
    conferences: Arc<dyn DataService<Conference>>,
}

impl ReferenceResolver {
    pub fn new(
        states: Arc<dyn DataService<State>>,
        locations: Arc<dyn DataService<Location>>,
        conferences: Arc<dyn DataService<Conference>>,
    ) -> Self {
        Self {
            states,
            locations,
            conferences,
        }
    }

    /// Resolve one raw value for `field`
    pub async fn resolve(
        &self,
        field: ReferenceField,
        raw: &Value,
    ) -> Result<ResolvedReference, ResolutionError> {
        let unknown = || ResolutionError::UnknownReference(field, raw.clone());

        let (id, summary) = match field {
            ReferenceField::State => {
                let abbreviation = raw.as_str().ok_or_else(unknown)?;
                let state = self
                    .states
                    .find_by("abbreviation", &FieldValue::from(abbreviation))
                    .await?
                    .into_iter()
                    .next()
                    .ok_or_else(unknown)?;
                (state.id, RelationSummary::state(state.name, state.abbreviation))
            }
            ReferenceField::Location => {
                let id = raw_id(raw).ok_or_else(unknown)?;
                let location = self.locations.get(id).await?.ok_or_else(unknown)?;
                (location.id, RelationSummary::named(location.name))
            }
            ReferenceField::Conference => {
                let id = raw_id(raw).ok_or_else(unknown)?;
                let conference = self.conferences.get(id).await?.ok_or_else(unknown)?;
                (conference.id, RelationSummary::named(conference.name))
            }
        };

        tracing::debug!(field = %field, id, "resolved reference");
        Ok(ResolvedReference {
            field,
            target: EntityRef::new(field.target_kind(), id),
            summary,
        })
    }

    /// Resolve a field only if the payload supplied it
    pub async fn resolve_present(
        &self,
        field: ReferenceField,
        raw: Option<&Value>,
    ) -> Result<Option<ResolvedReference>, ResolutionError> {
        match raw {
            Some(raw) => self.resolve(field, raw).await.map(Some),
            None => Ok(None),
        }
    }

    /// Prefetch relation summaries for the given references.
    ///
    /// References whose target no longer exists are left out, and encode as
    /// `null`.
    pub async fn snapshot(&self, targets: &[EntityRef]) -> anyhow::Result<RelationSnapshot> {
        let mut snapshot = RelationSnapshot::new();
        for target in targets {
            if snapshot.contains(target) {
                continue;
            }
            let summary = match target.kind {
                EntityKind::State => self
                    .states
                    .get(target.id)
                    .await?
                    .map(|s| RelationSummary::state(s.name, s.abbreviation)),
                EntityKind::Location => self
                    .locations
                    .get(target.id)
                    .await?
                    .map(|l| RelationSummary::named(l.name)),
                EntityKind::Conference => self
                    .conferences
                    .get(target.id)
                    .await?
                    .map(|c| RelationSummary::named(c.name)),
                EntityKind::Attendee | EntityKind::Presentation => None,
            };
            if let Some(summary) = summary {
                snapshot.insert(*target, summary);
            }
        }
        Ok(snapshot)
    }
}

impl RelationSnapshot {
    /// Snapshot holding the summaries of already resolved references
    pub fn from_resolved<'a>(resolved: impl IntoIterator<Item = &'a ResolvedReference>) -> Self {
        resolved
            .into_iter()
            .map(|r| (r.target, r.summary.clone()))
            .collect()
    }
}

/// Ids arrive as JSON integers or as numeric strings
fn raw_id(raw: &Value) -> Option<EntityId> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
