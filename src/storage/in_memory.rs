//! In-memory implementation of DataService for development and tests

use crate::core::{DataService, Entity, EntityId, FieldValue};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory data service implementation
///
/// Rows are kept in insertion order. Ids start at 1 and are never reused,
/// even after deletes. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryDataService<T> {
    rows: Arc<RwLock<IndexMap<EntityId, T>>>,
    next_id: Arc<AtomicI64>,
}

impl<T: Entity> InMemoryDataService<T> {
    /// Create a new, empty in-memory data service
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(IndexMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Number of stored rows
    pub fn len(&self) -> Result<usize> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(rows.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<T: Entity> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, mut entity: T) -> Result<T> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        entity.assign_id(id);
        entity.mark_created(now);
        entity.mark_updated(now);

        rows.insert(id, entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: EntityId) -> Result<Option<T>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows.values().cloned().collect())
    }

    async fn find_by(&self, field: &str, value: &FieldValue) -> Result<Vec<T>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows
            .values()
            .filter(|row| row.field_value(field).as_ref() == Some(value))
            .cloned()
            .collect())
    }

    async fn update(&self, id: EntityId, mut entity: T) -> Result<Option<T>> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(slot) = rows.get_mut(&id) else {
            return Ok(None);
        };

        entity.assign_id(id);
        entity.mark_updated(Utc::now());
        *slot = entity.clone();

        Ok(Some(entity))
    }

    async fn delete(&self, id: EntityId) -> Result<bool> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(rows.shift_remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntityKind, EntityRef};
    use crate::entities::{Attendee, Location};

    fn location(name: &str, state_id: EntityId) -> Location {
        Location::new(name.to_string(), "Springfield".to_string(), 3, state_id)
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let service = InMemoryDataService::<Location>::new();

        let first = service.create(location("Hall A", 1)).await.unwrap();
        let second = service.create(location("Hall B", 1)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(service.len().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_stamps_timestamps() {
        let service = InMemoryDataService::<Location>::new();
        let before = Utc::now();

        let created = service.create(location("Hall A", 1)).await.unwrap();

        assert!(created.created >= before);
        assert_eq!(created.created, created.updated);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let service = InMemoryDataService::<Location>::new();
        assert!(service.get(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let service = InMemoryDataService::<Location>::new();
        for name in ["C", "A", "B"] {
            service.create(location(name, 1)).await.unwrap();
        }

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_find_by_reference() {
        let service = InMemoryDataService::<Attendee>::new();
        for (name, conference) in [("Ada", 5), ("Grace", 6), ("Linus", 5)] {
            service
                .create(Attendee::new(
                    name.to_string(),
                    format!("{}@example.com", name.to_lowercase()),
                    None,
                    conference,
                ))
                .await
                .unwrap();
        }

        let scoped = service
            .find_by(
                "conference",
                &FieldValue::Reference(EntityRef::new(EntityKind::Conference, 5)),
            )
            .await
            .unwrap();

        assert_eq!(scoped.len(), 2);
        assert!(scoped.iter().all(|a| a.conference_id == Some(5)));
    }

    #[tokio::test]
    async fn test_update_keeps_created_and_bumps_updated() {
        let service = InMemoryDataService::<Location>::new();
        let created = service.create(location("Hall A", 1)).await.unwrap();

        let mut changed = created.clone();
        changed.name = "Hall Z".to_string();
        let updated = service.update(created.id, changed).await.unwrap().unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Hall Z");
        assert_eq!(updated.created, created.created);
        assert!(updated.updated >= created.updated);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let service = InMemoryDataService::<Location>::new();
        let result = service.update(4, location("Ghost", 1)).await.unwrap();
        assert!(result.is_none());
        assert!(service.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_delete_does_not_reuse_ids() {
        let service = InMemoryDataService::<Location>::new();
        let created = service.create(location("Hall A", 1)).await.unwrap();

        assert!(service.delete(created.id).await.unwrap());
        assert!(!service.delete(created.id).await.unwrap());

        let next = service.create(location("Hall B", 1)).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_poisoned_lock_is_reported() {
        let service = InMemoryDataService::<Location>::new();
        service.create(location("Hall A", 1)).await.unwrap();

        let rows = Arc::clone(&service.rows);
        let writer = std::thread::spawn(move || {
            let _guard = rows.write().unwrap();
            panic!("writer died holding the lock");
        });
        assert!(writer.join().is_err());

        assert!(service.len().is_err());
        assert!(service.is_empty().is_err());
        assert!(service.list().await.is_err());
    }
}
