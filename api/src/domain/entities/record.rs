//! Maintenance record domain entity
//!
//! One row of the maintenance spreadsheet. The table is loaded per request
//! and never persisted.

use serde::Serialize;

/// Column headers the spreadsheet must provide
pub const ASSET_TYPE_COLUMN: &str = "AssetType";
pub const MEAN_TIME_TILL_REPAIR_COLUMN: &str = "MeanTimeTillRepair";
pub const PROBLEM_DESCRIPTION_COLUMN: &str = "ProblemDescription";
pub const COST_OF_PARTS_COLUMN: &str = "CostOfParts";

/// A single maintenance record. Blank cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaintenanceRecord {
    pub asset_type: Option<String>,
    pub mean_time_till_repair: Option<f64>,
    pub problem_description: Option<String>,
    pub cost_of_parts: Option<f64>,
}

impl MaintenanceRecord {
    #[cfg(test)]
    pub fn new(
        asset_type: &str,
        mean_time_till_repair: f64,
        problem_description: &str,
        cost_of_parts: f64,
    ) -> Self {
        Self {
            asset_type: Some(asset_type.to_string()),
            mean_time_till_repair: Some(mean_time_till_repair),
            problem_description: Some(problem_description.to_string()),
            cost_of_parts: Some(cost_of_parts),
        }
    }
}

/// A cell that could not be interpreted. The cell is treated as blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowIssue {
    /// 1-based line in the sheet, header included
    pub line: usize,
    pub column: String,
    pub message: String,
}

/// Records loaded from one read of the spreadsheet
#[derive(Debug, Clone, Default)]
pub struct MaintenanceTable {
    pub records: Vec<MaintenanceRecord>,
    pub issues: Vec<RowIssue>,
}

impl MaintenanceTable {
    #[cfg(test)]
    pub fn new(records: Vec<MaintenanceRecord>) -> Self {
        Self {
            records,
            issues: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Cell text that stands for a missing value
const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(trimmed: &str) -> bool {
    trimmed.is_empty() || NULL_TOKENS.contains(&trimmed)
}

/// Parse a numeric cell given as text. Blank text and null tokens are missing.
pub fn parse_numeric(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if is_missing(trimmed) {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        Ok(_) => Err(format!("not a finite number: '{}'", trimmed)),
        Err(_) => Err(format!("not a number: '{}'", trimmed)),
    }
}

/// Normalize a categorical cell given as text. Blank text and null tokens are missing.
pub fn parse_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if is_missing(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}
