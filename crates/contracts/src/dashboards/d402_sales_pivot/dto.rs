use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Period resolution of a sales pivot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotGranularity {
    /// (Year, Month)
    Month,
    /// (Year, Month, ISO week)
    Week,
    /// (Year, Month, Day)
    Day,
}

impl PivotGranularity {
    /// Export sheet name
    pub fn sheet_name(&self) -> &'static str {
        match self {
            PivotGranularity::Month => "월별 매출",
            PivotGranularity::Week => "주차별 매출",
            PivotGranularity::Day => "일별 매출",
        }
    }

    /// Names of the period key columns
    pub fn key_columns(&self) -> &'static [&'static str] {
        match self {
            PivotGranularity::Month => &["Year", "Month"],
            PivotGranularity::Week => &["Year", "Month", "Week"],
            PivotGranularity::Day => &["Year", "Month", "Day"],
        }
    }
}

/// One period row: sales per machine plus the row total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPivotRow {
    /// Period key values, same length as `key_columns`
    pub period: Vec<i32>,
    /// Sales by machine code, every machine of the pivot present (0.0 filled)
    pub values: BTreeMap<String, f64>,
    pub total: f64,
}

/// Sales by period x machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPivot {
    pub granularity: PivotGranularity,
    /// Machine columns, sorted
    pub machines: Vec<String>,
    pub rows: Vec<SalesPivotRow>,
}
