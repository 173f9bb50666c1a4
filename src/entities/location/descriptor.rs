//! Entity descriptor for Location

use super::handlers::{
    create_location, delete_location, get_location, list_locations, missing_location_id,
    update_location,
};
use crate::core::EntityKind;
use crate::entities::method_not_allowed;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::state::AppState;
use axum::{Router, routing::get};

/// Descriptor for the Location entity
pub struct LocationDescriptor {
    pub state: AppState,
}

impl LocationDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for LocationDescriptor {
    fn kind(&self) -> EntityKind {
        EntityKind::Location
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route(
                "/locations",
                get(list_locations)
                    .post(create_location)
                    .put(missing_location_id)
                    .delete(missing_location_id)
                    .fallback(method_not_allowed),
            )
            .route(
                "/locations/{id}",
                get(get_location)
                    .put(update_location)
                    .delete(delete_location)
                    .fallback(method_not_allowed),
            )
            .with_state(self.state.clone())
    }
}
