use serde::{Deserialize, Serialize};

/// Row of the product category table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub product_name: String,
    pub category: String,
}
