//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use crate::domain::entities::{MaintenanceRecord, MaintenanceTable};

/// Five work orders across three asset types.
///
/// Expected aggregates:
/// - mean repair time: Boiler 8.0, Pump 3.0, Conveyor 1.5
/// - problem frequency: Leak 3, Belt slip 1, Overheating 1
/// - cost of parts: Boiler 750.0, Pump 200.0, Conveyor 45.5
pub fn sample_records() -> Vec<MaintenanceRecord> {
    vec![
        MaintenanceRecord::new("Pump", 2.0, "Leak", 50.0),
        MaintenanceRecord::new("Pump", 4.0, "Leak", 150.0),
        MaintenanceRecord::new("Boiler", 6.0, "Overheating", 500.0),
        MaintenanceRecord::new("Boiler", 10.0, "Leak", 250.0),
        MaintenanceRecord::new("Conveyor", 1.5, "Belt slip", 45.5),
    ]
}

pub fn sample_table() -> MaintenanceTable {
    MaintenanceTable::new(sample_records())
}

/// The sample records as CSV, header included
pub fn sample_csv() -> String {
    let mut csv =
        String::from("WorkOrderId,AssetType,MeanTimeTillRepair,ProblemDescription,CostOfParts\n");
    for (i, r) in sample_records().iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            1000 + i,
            r.asset_type.as_deref().unwrap_or_default(),
            r.mean_time_till_repair.unwrap_or_default(),
            r.problem_description.as_deref().unwrap_or_default(),
            r.cost_of_parts.unwrap_or_default(),
        ));
    }
    csv
}
