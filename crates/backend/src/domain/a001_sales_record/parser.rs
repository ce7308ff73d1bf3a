use crate::shared::csv_table::{cell, numeric_cell, CsvTable};
use chrono::{NaiveDate, NaiveDateTime};
use contracts::domain::a001_sales_record::SalesRecord;

const ORDER_TIME: &[&str] = &["Order Time", "주문시간", "주문 시간"];
const PRODUCT_NAME: &[&str] = &["Product Name", "제품명", "상품명"];
const QUANTITY_ORDERED: &[&str] = &["Quantity Ordered", "주문수량", "수량"];
const TOTAL_SALES: &[&str] = &["Total Sales", "매출", "총 매출"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parsed rows of one sales export
#[derive(Debug, Default)]
pub struct ParsedSales {
    pub records: Vec<SalesRecord>,
    /// Rows dropped for a missing product name or order time
    pub skipped_rows: usize,
}

/// Parses an order timestamp; a bare date means midnight
pub fn parse_order_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    // fractional seconds are not used by any view
    let s = s.split('.').next().unwrap_or(s);

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parses one machine's sales CSV text
pub fn parse_sales_csv(
    text: &str,
    machine: &str,
    file_month: Option<u32>,
) -> Result<ParsedSales, csv::Error> {
    let table = CsvTable::parse(text)?;

    let order_time_col = table.column(ORDER_TIME);
    let product_col = table.column(PRODUCT_NAME);
    let quantity_col = table.column(QUANTITY_ORDERED);
    let sales_col = table.column(TOTAL_SALES);

    if order_time_col.is_none() || product_col.is_none() {
        tracing::warn!(
            "Sales export for machine {} lacks Order Time or Product Name columns: {:?}",
            machine,
            table.headers()
        );
    }

    let mut parsed = ParsedSales {
        records: Vec::with_capacity(table.records().len()),
        skipped_rows: table.skipped(),
    };

    for (idx, record) in table.records().iter().enumerate() {
        let Some(product_name) = cell(record, product_col) else {
            parsed.skipped_rows += 1;
            continue;
        };

        let raw_time = cell(record, order_time_col).unwrap_or_default();
        let Some(order_time) = parse_order_time(&raw_time) else {
            tracing::warn!(
                "Skipping sales row {} of machine {}: unparseable order time '{}'",
                idx + 2,
                machine,
                raw_time
            );
            parsed.skipped_rows += 1;
            continue;
        };

        parsed.records.push(SalesRecord {
            machine: machine.to_string(),
            file_month,
            product_name,
            quantity_ordered: numeric_cell(record, quantity_col),
            total_sales: numeric_cell(record, sales_col),
            order_time,
            product_category: None,
        });
    }

    Ok(parsed)
}
