//! Conference domain entities
//!
//! Each entity module owns its model, its HTTP handlers and the descriptor
//! that mounts those handlers. States are reference data and only have a
//! model.

pub mod attendee;
pub mod conference;
pub mod location;
pub mod presentation;
pub mod state;

use crate::core::ApiError;

pub use attendee::{Attendee, AttendeeDescriptor, AttendeeInput};
pub use conference::{Conference, ConferenceDescriptor, ConferenceInput, ConferencePlan};
pub use location::{Location, LocationDescriptor, LocationInput};
pub use presentation::{DEFAULT_STATUS, Presentation, PresentationDescriptor, PresentationInput};
pub use state::State;

/// Fallback for methods a route does not implement
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotSupported
}
