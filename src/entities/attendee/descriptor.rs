//! Entity descriptor for Attendee

use super::handlers::{
    create_attendee, delete_attendee, get_attendee, list_attendees, update_attendee,
};
use crate::core::EntityKind;
use crate::entities::method_not_allowed;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::state::AppState;
use axum::{Router, routing::get};

/// Descriptor for the Attendee entity
pub struct AttendeeDescriptor {
    pub state: AppState,
}

impl AttendeeDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for AttendeeDescriptor {
    fn kind(&self) -> EntityKind {
        EntityKind::Attendee
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route(
                "/conferences/{conference_id}/attendees",
                get(list_attendees)
                    .post(create_attendee)
                    .fallback(method_not_allowed),
            )
            .route(
                "/attendees/{id}",
                get(get_attendee)
                    .put(update_attendee)
                    .delete(delete_attendee)
                    .fallback(method_not_allowed),
            )
            .with_state(self.state.clone())
    }
}
