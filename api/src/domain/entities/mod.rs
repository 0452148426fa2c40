//! Domain entities
//!
//! Pure domain models for maintenance records and the charts built from them.

pub mod chart;
pub mod record;
pub mod series;

pub use chart::ChartKind;
pub use record::{
    parse_label, parse_numeric, MaintenanceRecord, MaintenanceTable, RowIssue,
    ASSET_TYPE_COLUMN, COST_OF_PARTS_COLUMN, MEAN_TIME_TILL_REPAIR_COLUMN,
    PROBLEM_DESCRIPTION_COLUMN,
};
pub use series::CategorySeries;
