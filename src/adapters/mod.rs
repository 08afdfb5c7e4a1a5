//! Infrastructure adapters. Implement outbound ports.
//!
//! HTTP API, in-memory directory, terminal UI. Map errors to DomainError.

pub mod http;
pub mod memory;
pub mod ui;
