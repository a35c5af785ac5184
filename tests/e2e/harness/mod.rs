//! E2E test harness for hit.
//!
//! This module contains test infrastructure with builders and assertions
//! that not every scenario uses.

#![allow(dead_code)]

pub mod assertions;
pub mod scenario;
pub mod server;

// Re-export commonly used types
pub use assertions::Assertion;
pub use scenario::Scenario;
pub use server::{Reply, TestServer};
