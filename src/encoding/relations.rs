//! Prefetched summaries of related entities

use crate::core::EntityRef;
use std::collections::HashMap;

/// The parts of a related entity that appear in a nested summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationSummary {
    pub name: String,
    /// Only states carry an abbreviation
    pub abbreviation: Option<String>,
}

impl RelationSummary {
    /// Summary of a location or conference
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abbreviation: None,
        }
    }

    /// Summary of a state
    pub fn state(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abbreviation: Some(abbreviation.into()),
        }
    }
}

/// Read-only view of related entities for one encoding pass.
///
/// Handlers fill it before encoding so the encoder itself never touches the
/// store. A reference missing from the snapshot encodes as `null`.
#[derive(Debug, Clone, Default)]
pub struct RelationSnapshot {
    summaries: HashMap<EntityRef, RelationSummary>,
}

impl RelationSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: EntityRef, summary: RelationSummary) {
        self.summaries.insert(target, summary);
    }

    pub fn get(&self, target: &EntityRef) -> Option<&RelationSummary> {
        self.summaries.get(target)
    }

    pub fn contains(&self, target: &EntityRef) -> bool {
        self.summaries.contains_key(target)
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

impl FromIterator<(EntityRef, RelationSummary)> for RelationSnapshot {
    fn from_iter<I: IntoIterator<Item = (EntityRef, RelationSummary)>>(iter: I) -> Self {
        Self {
            summaries: iter.into_iter().collect(),
        }
    }
}
