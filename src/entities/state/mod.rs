//! State entity module
//!
//! States are immutable reference data seeded at startup. They are never
//! addressed directly over HTTP, so the module has no handlers or descriptor.

pub mod model;

pub use model::State;
