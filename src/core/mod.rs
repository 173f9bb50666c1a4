//! Core module containing fundamental traits and types for the API

pub mod entity;
pub mod error;
pub mod extractors;
pub mod field;
pub mod service;

pub use entity::{Entity, EntityId, EntityKind, EntityRef};
pub use error::ApiError;
pub use extractors::{Payload, parse_id, present};
pub use field::{FieldMap, FieldSource, FieldValue};
pub use service::DataService;
