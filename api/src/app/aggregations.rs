//! Maintenance aggregations
//!
//! Group records by a categorical column and reduce a value per group.
//! Records with a missing key are ignored. Every result is sorted descending
//! by value, ties by label.

use std::collections::BTreeMap;

use crate::domain::entities::{CategorySeries, ChartKind, MaintenanceRecord, MaintenanceTable};

/// Compute the series shown on a chart
pub fn aggregate(kind: ChartKind, table: &MaintenanceTable) -> CategorySeries {
    match kind {
        ChartKind::AverageRepairTime => mean_repair_time_by_asset_type(&table.records),
        ChartKind::ProblemFrequency => problem_description_frequency(&table.records),
        ChartKind::PartsCost => cost_of_parts_by_asset_type(&table.records),
    }
}

/// Mean `MeanTimeTillRepair` per asset type, over the values present.
/// Asset types without any repair time have no mean and are left out.
pub fn mean_repair_time_by_asset_type(records: &[MaintenanceRecord]) -> CategorySeries {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for record in records {
        let (Some(asset_type), Some(hours)) =
            (record.asset_type.as_deref(), record.mean_time_till_repair)
        else {
            continue;
        };
        let entry = groups.entry(asset_type).or_insert((0.0, 0));
        entry.0 += hours;
        entry.1 += 1;
    }

    CategorySeries::from_pairs(
        groups
            .into_iter()
            .map(|(label, (sum, n))| (label.to_string(), sum / n as f64)),
    )
}

/// Number of records per problem description
pub fn problem_description_frequency(records: &[MaintenanceRecord]) -> CategorySeries {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

    for problem in records.iter().filter_map(|r| r.problem_description.as_deref()) {
        *counts.entry(problem).or_insert(0) += 1;
    }

    CategorySeries::from_pairs(
        counts
            .into_iter()
            .map(|(label, n)| (label.to_string(), n as f64)),
    )
}

/// Total `CostOfParts` per asset type; missing costs count as zero
pub fn cost_of_parts_by_asset_type(records: &[MaintenanceRecord]) -> CategorySeries {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();

    for record in records {
        let Some(asset_type) = record.asset_type.as_deref() else {
            continue;
        };
        *totals.entry(asset_type).or_insert(0.0) += record.cost_of_parts.unwrap_or(0.0);
    }

    CategorySeries::from_pairs(
        totals
            .into_iter()
            .map(|(label, total)| (label.to_string(), total)),
    )
}
