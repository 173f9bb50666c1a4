//! Storage implementations for the entity store

pub mod in_memory;

pub use in_memory::InMemoryDataService;
