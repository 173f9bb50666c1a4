//! Conference entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::ConferenceDescriptor;
pub use model::{Conference, ConferenceInput, ConferencePlan};
