//! Integration test support
//!
//! Spins up the full relay application over a loopback listener, backed by
//! an in-memory message store so no external services are needed.

pub mod helpers;

pub use helpers::{MemoryRepo, TestServer};
