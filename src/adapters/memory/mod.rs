//! In-memory collaborators. Demo data source and test double for every outbound port.

pub mod directory;

pub use directory::{InMemoryDirectory, SeedData};
