use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// One order line from a machine's monthly sales export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Machine code taken from the export file name
    pub machine: String,
    /// Month number from the export file name (`A_sales_7.csv` -> 7)
    pub file_month: Option<u32>,
    /// Product name as sold
    pub product_name: String,
    /// Raw parsed quantity; None when the cell was empty or not numeric
    pub quantity_ordered: Option<f64>,
    pub total_sales: Option<f64>,
    pub order_time: NaiveDateTime,
    /// Filled by the category join, None when the product is not categorized
    pub product_category: Option<String>,
}

impl SalesRecord {
    pub fn new(
        machine: impl Into<String>,
        product_name: impl Into<String>,
        quantity_ordered: Option<f64>,
        order_time: NaiveDateTime,
    ) -> Self {
        Self {
            machine: machine.into(),
            file_month: None,
            product_name: product_name.into(),
            quantity_ordered,
            total_sales: None,
            order_time,
            product_category: None,
        }
    }

    pub fn with_total_sales(mut self, total_sales: f64) -> Self {
        self.total_sales = Some(total_sales);
        self
    }

    pub fn year(&self) -> i32 {
        self.order_time.year()
    }

    pub fn month(&self) -> u32 {
        self.order_time.month()
    }

    pub fn day(&self) -> u32 {
        self.order_time.day()
    }

    /// ISO-8601 week number
    pub fn iso_week(&self) -> u32 {
        self.order_time.iso_week().week()
    }

    pub fn weekday(&self) -> Weekday {
        self.order_time.weekday()
    }

    pub fn hour(&self) -> u32 {
        self.order_time.hour()
    }

    /// Quantity coerced to a non-negative number; missing or invalid is 0
    pub fn quantity(&self) -> f64 {
        coerce_quantity(self.quantity_ordered)
    }

    pub fn sales_amount(&self) -> f64 {
        self.total_sales.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

/// Coerce a parsed quantity: None, NaN, infinite and negative values become 0
pub fn coerce_quantity(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}
