//! Presentation entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::PresentationDescriptor;
pub use model::{DEFAULT_STATUS, Presentation, PresentationInput};
