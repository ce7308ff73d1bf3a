use super::service::build_pivot;
use crate::shared::format::format_cell;
use crate::shared::workbook::{Sheet, Workbook};
use contracts::dashboards::d402_sales_pivot::{PivotGranularity, SalesPivot};
use contracts::domain::a001_sales_record::SalesRecord;

pub const EXPORT_FILE_NAME: &str = "vending_sales_report.zip";

const GRANULARITIES: [PivotGranularity; 3] = [
    PivotGranularity::Month,
    PivotGranularity::Week,
    PivotGranularity::Day,
];

/// Period key columns, one column per machine, then `Total`
pub fn pivot_sheet(pivot: &SalesPivot) -> Sheet {
    let mut headers: Vec<String> = pivot
        .granularity
        .key_columns()
        .iter()
        .map(|c| c.to_string())
        .collect();
    headers.extend(pivot.machines.iter().cloned());
    headers.push("Total".into());

    let mut sheet = Sheet::new(pivot.granularity.sheet_name(), headers);
    for row in &pivot.rows {
        let mut cells: Vec<String> = row.period.iter().map(|v| v.to_string()).collect();
        cells.extend(
            pivot
                .machines
                .iter()
                .map(|m| format_cell(row.values.get(m).copied().unwrap_or(0.0))),
        );
        cells.push(format_cell(row.total));
        sheet.push_row(cells);
    }
    sheet
}

/// Monthly, weekly and daily sales sheets
pub fn build_workbook(records: &[SalesRecord]) -> Workbook {
    let mut workbook = Workbook::new();
    for granularity in GRANULARITIES {
        workbook.add_sheet(pivot_sheet(&build_pivot(records, granularity)));
    }
    workbook
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_sales_workbook() {
        let t = NaiveDate::from_ymd_opt(2024, 7, 3)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let records = vec![
            SalesRecord::new("A", "라떼", Some(1.0), t).with_total_sales(2500.0),
            SalesRecord::new("B", "라떼", Some(1.0), t).with_total_sales(1000.0),
        ];
        let workbook = build_workbook(&records);

        let names: Vec<&str> = workbook.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["월별 매출", "주차별 매출", "일별 매출"]);

        let monthly = &workbook.sheets[0];
        assert_eq!(monthly.headers, vec!["Year", "Month", "A", "B", "Total"]);
        assert_eq!(monthly.rows[0], vec!["2024", "7", "2500", "1000", "3500"]);

        let daily = &workbook.sheets[2];
        assert_eq!(daily.headers[2], "Day");
        assert_eq!(daily.rows[0][2], "3");
    }
}
