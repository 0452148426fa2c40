//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod notifier;
pub mod renderer;
pub mod source;

pub use notifier::{ChartNotification, ChartNotifier};
pub use renderer::ChartRenderer;
pub use source::RecordSource;
