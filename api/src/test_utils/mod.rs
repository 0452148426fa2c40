//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The port traits are small, so hand-written doubles are simpler than a
//! mocking framework and let tests inspect exactly what was rendered or sent.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
