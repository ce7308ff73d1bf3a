use crate::enums::ingredient::{Allocation, IngredientFamily};
use serde::{Deserialize, Serialize};

/// Grouping key of every summary row
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeriodMachine {
    pub year: i32,
    pub month: u32,
    pub machine: String,
}

/// Bean consumption of one (year, month, machine)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeanSummaryRow {
    pub key: PeriodMachine,
    pub total_bean: f64,
    /// total_bean / 1000, rounded to 2 decimals
    pub bag_count: f64,
}

/// Powder or syrup consumption of one (year, month, machine)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilySummaryRow {
    pub key: PeriodMachine,
    pub family: IngredientFamily,
    /// Grams per type
    pub totals: Allocation,
    /// Bags (powder) or containers (syrup) per type, rounded to 2 decimals
    pub package_counts: Allocation,
}

/// The three ingredient summary tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientSummary {
    pub beans: Vec<BeanSummaryRow>,
    pub powders: Vec<FamilySummaryRow>,
    pub syrups: Vec<FamilySummaryRow>,
}

impl IngredientSummary {
    pub fn family_rows(&self, family: IngredientFamily) -> &[FamilySummaryRow] {
        match family {
            IngredientFamily::Powder => &self.powders,
            IngredientFamily::Syrup => &self.syrups,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}
