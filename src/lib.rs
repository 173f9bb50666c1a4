//! # Conference API
//!
//! A REST API for conferences, their locations, attendees and presentations.
//!
//! ## Layout
//!
//! - [`core`]: entity traits, field values, the store trait and [`core::ApiError`]
//! - [`resolver`]: turns client identifiers (state abbreviations, numeric ids)
//!   into typed references before any write
//! - [`encoding`]: table-driven JSON encoding of entities under a list or
//!   detail profile, with nested relation summaries and computed `href`s
//! - [`entities`]: models, handlers and route descriptors per entity
//! - [`storage`]: the in-memory [`core::DataService`] implementation
//! - [`server`]: shared state and the router builder
//! - [`config`]: YAML configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use conference::prelude::*;
//!
//! let config = AppConfig::default_config();
//! let state = AppState::in_memory(RoutePaths::new(config.links.base_path.clone()));
//! state.seed_states(&config.states).await?;
//!
//! let app = ServerBuilder::new().with_state(state).build()?;
//! ```

pub mod config;
pub mod core;
pub mod encoding;
pub mod entities;
pub mod resolver;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::config::{AppConfig, LinksConfig, ServerConfig, StateSeed};

    pub use crate::core::{
        ApiError, DataService, Entity, EntityId, EntityKind, EntityRef, FieldMap, FieldSource,
        FieldValue, Payload, parse_id,
    };

    pub use crate::encoding::{
        Encoder, EncodingError, LinkBuilder, LinkTarget, Profile, RelationSnapshot,
        RelationSummary, RoutePaths,
    };

    pub use crate::entities::{
        Attendee, AttendeeInput, Conference, ConferenceInput, ConferencePlan, DEFAULT_STATUS,
        Location, LocationInput, Presentation, PresentationInput, State,
    };

    pub use crate::resolver::{
        ReferenceField, ReferenceResolver, ResolutionError, ResolvedReference,
    };

    pub use crate::server::{AppState, EntityDescriptor, EntityRegistry, ServerBuilder};

    pub use crate::storage::InMemoryDataService;
}
