//! Server module for building the HTTP router
//!
//! This module provides:
//! - `AppState`, the stores and encoder plumbing shared by every handler
//! - `EntityRegistry`, which collects per-entity route descriptors
//! - `ServerBuilder`, which assembles entity, health and fallback routes

pub mod builder;
pub mod entity_registry;
pub mod state;

pub use builder::{SERVICE_NAME, ServerBuilder};
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use state::AppState;
