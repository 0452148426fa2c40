//! Chart domain entity
//!
//! The fixed set of report charts and how each one is presented.

use serde::Serialize;

/// RGB bar color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarColor(pub u8, pub u8, pub u8);

impl BarColor {
    pub const SKY_BLUE: BarColor = BarColor(135, 206, 235);
    pub const LIGHT_CORAL: BarColor = BarColor(240, 128, 128);
    pub const LIGHT_GREEN: BarColor = BarColor(144, 238, 144);
}

/// Report charts produced by a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    AverageRepairTime,
    ProblemFrequency,
    PartsCost,
}

impl ChartKind {
    /// All charts, in generation order
    pub const ALL: [ChartKind; 3] = [
        ChartKind::AverageRepairTime,
        ChartKind::ProblemFrequency,
        ChartKind::PartsCost,
    ];

    /// Image file name inside the report directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::AverageRepairTime => "average_repair_time_by_asset_type.png",
            ChartKind::ProblemFrequency => "problem_description_frequency.png",
            ChartKind::PartsCost => "cost_of_parts_by_asset_type.png",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::AverageRepairTime => "Average Repair Time by Asset Type",
            ChartKind::ProblemFrequency => "Common Issues/Problem Description Frequency",
            ChartKind::PartsCost => "Cost of Parts by Asset Type",
        }
    }

    pub fn x_label(&self) -> &'static str {
        match self {
            ChartKind::AverageRepairTime | ChartKind::PartsCost => "Asset Type",
            ChartKind::ProblemFrequency => "Problem Description",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            ChartKind::AverageRepairTime => "Average Repair Time (Hours)",
            ChartKind::ProblemFrequency => "Frequency",
            ChartKind::PartsCost => "Total Cost of Parts",
        }
    }

    pub fn color(&self) -> BarColor {
        match self {
            ChartKind::AverageRepairTime => BarColor::SKY_BLUE,
            ChartKind::ProblemFrequency => BarColor::LIGHT_CORAL,
            ChartKind::PartsCost => BarColor::LIGHT_GREEN,
        }
    }

    /// Key used for this chart's link in the webhook payload
    pub fn link_key(&self) -> &'static str {
        match self {
            ChartKind::AverageRepairTime => "average_repair_time",
            ChartKind::ProblemFrequency => "problem_description_frequency",
            ChartKind::PartsCost => "cost_of_parts",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::AverageRepairTime => write!(f, "average_repair_time"),
            ChartKind::ProblemFrequency => write!(f, "problem_frequency"),
            ChartKind::PartsCost => write!(f, "parts_cost"),
        }
    }
}
