//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod reports;

pub use reports::{generate_charts, get_report, welcome};
