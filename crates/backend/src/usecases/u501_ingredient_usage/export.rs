use anyhow::{Context, Result};
use contracts::enums::ingredient::IngredientFamily;
use contracts::projections::p900_ingredient_usage::UsageRecord;
use std::path::Path;

pub const USAGE_FILE_NAME: &str = "ingredient_usage.csv";

/// Header of the long-form usage table
pub fn usage_headers() -> Vec<String> {
    let mut headers: Vec<String> = [
        "Year",
        "Month",
        "Machine",
        "Product Name",
        "Total Bean",
        "Total Powder",
        "Total Syrup",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect();
    for family in IngredientFamily::ALL {
        headers.extend(family.members().iter().map(|i| i.display_name().to_string()));
    }
    headers
}

/// Full-precision cell; `{}` on f64 is the shortest text that parses back exactly
fn mass_cell(value: f64) -> String {
    value.to_string()
}

fn usage_row(record: &UsageRecord) -> Vec<String> {
    let mut row = vec![
        record.year.to_string(),
        record.month.to_string(),
        record.machine.clone(),
        record.product_name.clone(),
        mass_cell(record.total_bean),
        mass_cell(record.total_powder),
        mass_cell(record.total_syrup),
    ];
    for family in IngredientFamily::ALL {
        let allocation = record.allocation(family);
        row.extend(
            family
                .members()
                .iter()
                .map(|i| mass_cell(allocation.get(i).copied().unwrap_or(0.0))),
        );
    }
    row
}

/// One row per usage record, UTF-8 with BOM
pub fn write_usage_csv(records: &[UsageRecord], path: &Path) -> Result<()> {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    {
        let mut writer = csv::Writer::from_writer(&mut bytes);
        writer.write_record(usage_headers())?;
        for record in records {
            writer.write_record(usage_row(record))?;
        }
        writer.flush()?;
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Usage table written: {} ({} rows)", path.display(), records.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::ingredient::Ingredient;

    #[test]
    fn test_write_usage_csv() {
        let mut powder = IngredientFamily::Powder.zeroed();
        powder.insert(Ingredient::MilkPowder, 192.0);
        let record = UsageRecord {
            year: 2024,
            month: 7,
            machine: "A".into(),
            product_name: "latte".into(),
            total_bean: 54.0,
            total_powder: 192.0,
            total_syrup: 0.0,
            powder,
            syrup: IngredientFamily::Syrup.zeroed(),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(USAGE_FILE_NAME);
        write_usage_csv(&[record], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.trim_start_matches('\u{feff}').lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Year,Month,Machine,Product Name,Total Bean"));
        assert_eq!(header.split(',').count(), 7 + 12);
        assert!(lines.next().unwrap().starts_with("2024,7,A,latte,54,192,0,192,0"));
    }

    #[test]
    fn test_usage_row_keeps_full_precision() {
        let mut powder = IngredientFamily::Powder.zeroed();
        for i in [
            Ingredient::MilkPowder,
            Ingredient::VanillaPowder,
            Ingredient::ChocoPowder,
        ] {
            powder.insert(i, 100.0 / 3.0);
        }
        let record = UsageRecord {
            year: 2024,
            month: 7,
            machine: "A".into(),
            product_name: "blend".into(),
            total_bean: 0.0,
            total_powder: 100.0,
            total_syrup: 0.0,
            powder,
            syrup: IngredientFamily::Syrup.zeroed(),
        };

        let row = usage_row(&record);
        let milk_col = usage_headers()
            .iter()
            .position(|h| h == "밀크 파우더")
            .unwrap();
        assert_eq!(row[milk_col].parse::<f64>().unwrap(), 100.0 / 3.0);
        assert_ne!(row[milk_col], "33.33");
    }
}
