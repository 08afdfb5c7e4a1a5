//! tutoring-card: listing card for a tutoring offering with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod presentation;
pub mod shared;
pub mod usecases;
