//! Integration test utilities for Warbler
//!
//! Helpers for running end-to-end tests against the HTTP server.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
