//! Location entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::LocationDescriptor;
pub use model::{Location, LocationInput};
