use crate::shared::csv_table::{cell, CsvTable};
use anyhow::Context;
use contracts::domain::a003_product_category::ProductCategory;
use std::path::Path;

const PRODUCT_NAME: &[&str] = &["제품명", "Product Name"];
const CATEGORY: &[&str] = &["제품 카테고리", "Product Category"];

/// Parses the category table; rows without a name or category are skipped
pub fn parse_categories(text: &str) -> anyhow::Result<Vec<ProductCategory>> {
    let table = CsvTable::parse(text)?;

    let (Some(name_col), Some(category_col)) = (table.column(PRODUCT_NAME), table.column(CATEGORY))
    else {
        anyhow::bail!(
            "Category table needs 제품명 and 제품 카테고리 columns, found {:?}",
            table.headers()
        );
    };

    Ok(table
        .records()
        .iter()
        .filter_map(|record| {
            Some(ProductCategory {
                product_name: cell(record, Some(name_col))?,
                category: cell(record, Some(category_col))?,
            })
        })
        .collect())
}

/// Category table of a run plus the reason it could not be used, if any
#[derive(Debug, Default)]
pub struct CategoryLoad {
    pub categories: Vec<ProductCategory>,
    pub error: Option<String>,
}

/// Loads the category CSV. A missing, unreadable or malformed file gives an
/// empty table; only the last two set `error`.
pub fn load_categories(path: &Path) -> CategoryLoad {
    if !path.exists() {
        tracing::warn!("Category file not found: {}", path.display());
        return CategoryLoad::default();
    }

    match read_categories(path) {
        Ok(categories) => {
            tracing::info!("Loaded {} product categories", categories.len());
            CategoryLoad {
                categories,
                error: None,
            }
        }
        Err(e) => {
            let reason = format!("{:#}", e);
            tracing::warn!("⚠️ Ignoring category file: {}", reason);
            CategoryLoad {
                categories: Vec::new(),
                error: Some(reason),
            }
        }
    }
}

fn read_categories(path: &Path) -> anyhow::Result<Vec<ProductCategory>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Cannot read category file {}", path.display()))?;
    parse_categories(&String::from_utf8_lossy(&bytes))
        .with_context(|| format!("Invalid category file {}", path.display()))
}
