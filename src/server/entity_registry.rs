//! Entity registry for managing entity descriptors and their routes

use crate::core::EntityKind;
use axum::Router;
use std::collections::HashMap;

/// Trait that describes how to build routes for an entity
///
/// Each routed entity (Location, Conference, Attendee, Presentation)
/// implements this trait to mount its handlers.
pub trait EntityDescriptor: Send + Sync {
    /// The entity kind served by these routes
    fn kind(&self) -> EntityKind;

    /// Build the routes for this entity, state already attached
    fn build_routes(&self) -> Router;
}

/// Registry for all routed entities in the application
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: HashMap<EntityKind, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// Register an entity descriptor
    ///
    /// Registering the same kind twice replaces the earlier descriptor.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let kind = descriptor.kind();
        self.descriptors.insert(kind, descriptor);
    }

    /// Build a router with all registered entity routes
    pub fn build_routes(&self) -> Router {
        let mut router = Router::new();

        for descriptor in self.descriptors.values() {
            router = router.merge(descriptor.build_routes());
        }

        router
    }

    /// Get all registered entity kinds
    pub fn entity_kinds(&self) -> Vec<EntityKind> {
        self.descriptors.keys().copied().collect()
    }
}
