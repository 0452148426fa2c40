//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod charts;
pub mod spreadsheet;
pub mod webhook;

pub use charts::PlottersBarRenderer;
pub use spreadsheet::SpreadsheetSource;
pub use webhook::HttpWebhookNotifier;
