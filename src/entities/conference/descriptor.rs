//! Entity descriptor for Conference

use super::handlers::{
    create_conference, delete_conference, get_conference, list_conferences, update_conference,
};
use crate::core::EntityKind;
use crate::entities::method_not_allowed;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::state::AppState;
use axum::{Router, routing::get};

/// Descriptor for the Conference entity
pub struct ConferenceDescriptor {
    pub state: AppState,
}

impl ConferenceDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for ConferenceDescriptor {
    fn kind(&self) -> EntityKind {
        EntityKind::Conference
    }

    fn build_routes(&self) -> Router {
        // The item segment shares its name with the nested attendee and
        // presentation routes so the router sees one parameter.
        Router::new()
            .route(
                "/conferences",
                get(list_conferences)
                    .post(create_conference)
                    .fallback(method_not_allowed),
            )
            .route(
                "/conferences/{conference_id}",
                get(get_conference)
                    .put(update_conference)
                    .delete(delete_conference)
                    .fallback(method_not_allowed),
            )
            .with_state(self.state.clone())
    }
}
