//! Application state shared across handlers

use crate::config::StateSeed;
use crate::core::{ApiError, DataService, Entity, FieldValue};
use crate::encoding::{Encoder, LinkBuilder, Profile, RelationSnapshot, RoutePaths};
use crate::entities::{Attendee, Conference, Location, Presentation, State};
use crate::resolver::{ReferenceResolver, ResolvedReference};
use crate::storage::InMemoryDataService;
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

/// Stores, resolver and link builder handed to every handler.
///
/// Cloning is cheap; everything sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub states: Arc<dyn DataService<State>>,
    pub locations: Arc<dyn DataService<Location>>,
    pub conferences: Arc<dyn DataService<Conference>>,
    pub attendees: Arc<dyn DataService<Attendee>>,
    pub presentations: Arc<dyn DataService<Presentation>>,
    pub resolver: ReferenceResolver,
    pub links: Arc<dyn LinkBuilder>,
}

impl AppState {
    /// Assemble state from individual stores
    pub fn new(
        states: Arc<dyn DataService<State>>,
        locations: Arc<dyn DataService<Location>>,
        conferences: Arc<dyn DataService<Conference>>,
        attendees: Arc<dyn DataService<Attendee>>,
        presentations: Arc<dyn DataService<Presentation>>,
        links: Arc<dyn LinkBuilder>,
    ) -> Self {
        let resolver =
            ReferenceResolver::new(states.clone(), locations.clone(), conferences.clone());
        Self {
            states,
            locations,
            conferences,
            attendees,
            presentations,
            resolver,
            links,
        }
    }

    /// State backed by fresh in-memory stores
    pub fn in_memory(links: RoutePaths) -> Self {
        Self::new(
            Arc::new(InMemoryDataService::<State>::new()),
            Arc::new(InMemoryDataService::<Location>::new()),
            Arc::new(InMemoryDataService::<Conference>::new()),
            Arc::new(InMemoryDataService::<Attendee>::new()),
            Arc::new(InMemoryDataService::<Presentation>::new()),
            Arc::new(links),
        )
    }

    /// Load the state reference data, skipping abbreviations already present
    pub async fn seed_states(&self, seeds: &[StateSeed]) -> Result<usize> {
        let mut inserted = 0;
        for seed in seeds {
            let existing = self
                .states
                .find_by("abbreviation", &FieldValue::from(seed.abbreviation.as_str()))
                .await?;
            if existing.is_empty() {
                self.states
                    .create(State::new(seed.name.clone(), seed.abbreviation.clone()))
                    .await?;
                inserted += 1;
            }
        }
        tracing::info!(inserted, total = seeds.len(), "seeded states");
        Ok(inserted)
    }

    /// Encoder bound to this state's link builder
    pub fn encoder<'a>(&'a self, relations: &'a RelationSnapshot) -> Encoder<'a> {
        Encoder::new(self.links.as_ref(), relations)
    }

    /// Encode a single entity, prefetching the summaries its relations need
    pub async fn render<T: Entity>(&self, entity: &T, profile: Profile) -> Result<Value, ApiError> {
        let relations = match profile {
            Profile::List => RelationSnapshot::new(),
            Profile::Detail => self.resolver.snapshot(&entity.relations()).await?,
        };
        Ok(self.encoder(&relations).encode_entity(entity, profile)?)
    }

    /// Encode a collection envelope with the list profile
    pub fn render_list<T: Entity>(&self, entities: &[T]) -> Result<Value, ApiError> {
        let relations = RelationSnapshot::new();
        Ok(self
            .encoder(&relations)
            .encode_collection(entities, Profile::List)?)
    }

    /// Detail-encode an entity whose references were just resolved
    pub fn render_resolved<T: Entity>(
        &self,
        entity: &T,
        resolved: &[&ResolvedReference],
    ) -> Result<Value, ApiError> {
        let relations = RelationSnapshot::from_resolved(resolved.iter().copied());
        Ok(self.encoder(&relations).encode_entity(entity, Profile::Detail)?)
    }
}
