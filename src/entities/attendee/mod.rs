//! Attendee entity module
//!
//! Attendees are listed and created under their conference
//! (`/conferences/{id}/attendees`) and addressed individually at
//! `/attendees/{id}`.

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::AttendeeDescriptor;
pub use model::{Attendee, AttendeeInput};
