//! Entity descriptor for Presentation

use super::handlers::{
    create_presentation, delete_presentation, get_presentation, list_presentations,
    update_presentation,
};
use crate::core::EntityKind;
use crate::entities::method_not_allowed;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::state::AppState;
use axum::{Router, routing::get};

/// Descriptor for the Presentation entity
pub struct PresentationDescriptor {
    pub state: AppState,
}

impl PresentationDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for PresentationDescriptor {
    fn kind(&self) -> EntityKind {
        EntityKind::Presentation
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route(
                "/conferences/{conference_id}/presentations",
                get(list_presentations)
                    .post(create_presentation)
                    .fallback(method_not_allowed),
            )
            .route(
                "/presentations/{id}",
                get(get_presentation)
                    .put(update_presentation)
                    .delete(delete_presentation)
                    .fallback(method_not_allowed),
            )
            .with_state(self.state.clone())
    }
}
