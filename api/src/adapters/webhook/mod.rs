//! Automation webhook adapter
//!
//! Posts generated chart links to an external automation endpoint.

pub mod client;

pub use client::HttpWebhookNotifier;
