use contracts::dashboards::d402_sales_pivot::{PivotGranularity, SalesPivot, SalesPivotRow};
use contracts::domain::a001_sales_record::SalesRecord;
use std::collections::{BTreeMap, BTreeSet};

/// Period key of a record at the given resolution
pub fn period_key(record: &SalesRecord, granularity: PivotGranularity) -> Vec<i32> {
    let year = record.year();
    let month = record.month() as i32;
    match granularity {
        PivotGranularity::Month => vec![year, month],
        PivotGranularity::Week => vec![year, month, record.iso_week() as i32],
        PivotGranularity::Day => vec![year, month, record.day() as i32],
    }
}

/// Sales by period x machine. Rows are sorted by period; every row holds
/// every machine of the data (0.0 when it sold nothing) and a row total.
pub fn build_pivot(records: &[SalesRecord], granularity: PivotGranularity) -> SalesPivot {
    let machines: BTreeSet<String> = records.iter().map(|r| r.machine.clone()).collect();

    let mut cells: BTreeMap<Vec<i32>, BTreeMap<String, f64>> = BTreeMap::new();
    for record in records {
        let row = cells
            .entry(period_key(record, granularity))
            .or_insert_with(|| machines.iter().map(|m| (m.clone(), 0.0)).collect());
        *row.entry(record.machine.clone()).or_insert(0.0) += record.sales_amount();
    }

    let rows = cells
        .into_iter()
        .map(|(period, values)| SalesPivotRow {
            total: values.values().sum(),
            period,
            values,
        })
        .collect();

    SalesPivot {
        granularity,
        machines: machines.into_iter().collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sale(machine: &str, month: u32, day: u32, sales: f64) -> SalesRecord {
        let t = NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        SalesRecord::new(machine, "라떼", Some(1.0), t).with_total_sales(sales)
    }

    fn data() -> Vec<SalesRecord> {
        vec![
            sale("B", 7, 2, 3000.0),
            sale("A", 7, 1, 2000.0),
            sale("A", 7, 1, 1500.0),
            sale("A", 8, 5, 4000.0),
        ]
    }

    #[test]
    fn test_monthly_pivot_with_totals() {
        let pivot = build_pivot(&data(), PivotGranularity::Month);

        assert_eq!(pivot.machines, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(pivot.rows.len(), 2);

        let july = &pivot.rows[0];
        assert_eq!(july.period, vec![2024, 7]);
        assert_eq!(july.values["A"], 3500.0);
        assert_eq!(july.values["B"], 3000.0);
        assert_eq!(july.total, 6500.0);

        let august = &pivot.rows[1];
        assert_eq!(august.values["B"], 0.0);
        assert_eq!(august.total, 4000.0);
    }

    #[test]
    fn test_weekly_and_daily_keys() {
        let weekly = build_pivot(&data(), PivotGranularity::Week);
        // 2024-07-01 and 07-02 share ISO week 27
        assert_eq!(weekly.rows[0].period, vec![2024, 7, 27]);
        assert_eq!(weekly.rows[0].total, 6500.0);

        let daily = build_pivot(&data(), PivotGranularity::Day);
        let days: Vec<Vec<i32>> = daily.rows.iter().map(|r| r.period.clone()).collect();
        assert_eq!(days, vec![vec![2024, 7, 1], vec![2024, 7, 2], vec![2024, 8, 5]]);
    }

    #[test]
    fn test_empty_pivot() {
        let pivot = build_pivot(&[], PivotGranularity::Day);
        assert!(pivot.machines.is_empty());
        assert!(pivot.rows.is_empty());
    }
}
