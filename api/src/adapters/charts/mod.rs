//! Chart adapter
//!
//! Bar chart rendering with Plotters into PNG files.

pub mod fonts;
pub mod renderer;

pub use renderer::PlottersBarRenderer;
