use crate::enums::ingredient::{Allocation, IngredientFamily};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ingredient consumption of one sales record (P900)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub year: i32,
    pub month: u32,
    pub machine: String,
    /// Normalized product name
    pub product_name: String,

    pub total_bean: f64,
    pub total_powder: f64,
    pub total_syrup: f64,

    /// Powder grams by type, all six keys present
    pub powder: Allocation,
    /// Syrup grams by type, all six keys present
    pub syrup: Allocation,
}

impl UsageRecord {
    pub fn allocation(&self, family: IngredientFamily) -> &Allocation {
        match family {
            IngredientFamily::Powder => &self.powder,
            IngredientFamily::Syrup => &self.syrup,
        }
    }
}

/// Diagnostic raised while computing ingredient usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UsageWarning {
    /// No recipe file for the machine; its records carry zero usage
    RecipeNotFound { machine: String },
    /// Recipe file exists but could not be read or parsed
    RecipeUnreadable { machine: String, reason: String },
    /// Sold products with no recipe entry, deduplicated
    UnmatchedProducts {
        machine: String,
        products: Vec<String>,
    },
    /// Recipe names present on more than one row; the first row is used
    DuplicateRecipeProducts {
        machine: String,
        products: Vec<String>,
    },
}

impl std::fmt::Display for UsageWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsageWarning::RecipeNotFound { machine } => {
                write!(f, "{}_Recipe 파일을 찾을 수 없습니다", machine)
            }
            UsageWarning::RecipeUnreadable { machine, reason } => {
                write!(f, "{}_Recipe 파일을 읽을 수 없습니다: {}", machine, reason)
            }
            UsageWarning::UnmatchedProducts { machine, products } => write!(
                f,
                "[{}] 레시피에 매칭되지 않은 상품: {}",
                machine,
                products.join(", ")
            ),
            UsageWarning::DuplicateRecipeProducts { machine, products } => write!(
                f,
                "[{}] 레시피에 중복된 상품: {}",
                machine,
                products.join(", ")
            ),
        }
    }
}

/// Result of one ingredient usage run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientUsageReport {
    pub records: Vec<UsageRecord>,
    /// Unmatched normalized product names by machine
    pub unmatched: BTreeMap<String, Vec<String>>,
    pub warnings: Vec<UsageWarning>,
}
