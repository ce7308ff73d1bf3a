use contracts::domain::a001_sales_record::SalesRecord;
use contracts::domain::a003_product_category::ProductCategory;
use std::collections::HashMap;

/// Left-joins categories onto sales records by exact product name.
/// The first category row of a name wins. Returns the number of records
/// left without a category.
pub fn apply_categories(records: &mut [SalesRecord], categories: &[ProductCategory]) -> usize {
    let mut index: HashMap<&str, &str> = HashMap::new();
    for c in categories {
        index
            .entry(c.product_name.as_str())
            .or_insert(c.category.as_str());
    }

    let mut uncategorized = 0;
    for record in records.iter_mut() {
        record.product_category = index
            .get(record.product_name.as_str())
            .map(|c| c.to_string());
        if record.product_category.is_none() {
            uncategorized += 1;
        }
    }

    if uncategorized > 0 {
        tracing::debug!("{} sales records have no product category", uncategorized);
    }
    uncategorized
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_apply_categories() {
        let t = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut records = vec![
            SalesRecord::new("A", "아메리카노", Some(1.0), t),
            SalesRecord::new("A", "Hot 아메리카노", Some(1.0), t),
        ];
        let categories = vec![
            ProductCategory {
                product_name: "아메리카노".into(),
                category: "커피".into(),
            },
            ProductCategory {
                product_name: "아메리카노".into(),
                category: "중복".into(),
            },
        ];

        let uncategorized = apply_categories(&mut records, &categories);
        assert_eq!(uncategorized, 1);
        assert_eq!(records[0].product_category.as_deref(), Some("커피"));
        assert_eq!(records[1].product_category, None);
    }
}
