//! Service trait for entity persistence

use crate::core::entity::{Entity, EntityId};
use crate::core::field::FieldValue;
use anyhow::Result;
use async_trait::async_trait;

/// Service trait for managing stored entities
///
/// Implementations provide CRUD operations for a specific entity type and own
/// identifier assignment and timestamps. The handlers are agnostic to the
/// underlying storage mechanism.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Insert a new entity, assigning its id and creation timestamps
    async fn create(&self, entity: T) -> Result<T>;

    /// Get an entity by ID
    async fn get(&self, id: EntityId) -> Result<Option<T>>;

    /// List all entities in insertion order
    async fn list(&self) -> Result<Vec<T>>;

    /// List entities whose field equals the given value
    async fn find_by(&self, field: &str, value: &FieldValue) -> Result<Vec<T>>;

    /// Replace a stored entity, returning `None` if it no longer exists
    async fn update(&self, id: EntityId, entity: T) -> Result<Option<T>>;

    /// Delete an entity, returning whether a row was removed
    async fn delete(&self, id: EntityId) -> Result<bool>;
}
