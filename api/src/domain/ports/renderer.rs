//! Chart renderer port trait

use std::path::Path;

use crate::domain::entities::{CategorySeries, ChartKind};
use crate::error::ChartError;

/// Draws a bar chart for a series and writes it to `path` (blocking)
pub trait ChartRenderer: Send + Sync {
    fn render(
        &self,
        kind: ChartKind,
        series: &CategorySeries,
        path: &Path,
    ) -> Result<(), ChartError>;
}
