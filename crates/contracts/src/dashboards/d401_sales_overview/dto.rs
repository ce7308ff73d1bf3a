use serde::{Deserialize, Serialize};

/// Label used for "no machine filter"
pub const ALL_MACHINES: &str = "전체";

/// Month / machine selection applied to the overview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesFilter {
    /// Order month; None keeps every month
    pub month: Option<u32>,
    /// Machine code; None or "전체" keeps every machine
    pub machine: Option<String>,
}

impl SalesFilter {
    pub fn machine_code(&self) -> Option<&str> {
        self.machine
            .as_deref()
            .filter(|m| !m.is_empty() && *m != ALL_MACHINES)
    }
}

/// KPI block and comparison series of the overview tab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesOverview {
    pub total_sales: f64,
    pub total_orders: f64,
    /// Product with the largest ordered quantity
    pub top_item: Option<String>,
    /// Sales per (month, machine) across the whole unfiltered data set
    pub monthly_by_machine: Vec<MachineMonthTotal>,
    /// Sales per day of month within the filter
    pub daily_sales: Vec<DayTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineMonthTotal {
    pub month: u32,
    pub machine: String,
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTotal {
    pub day: u32,
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub product_name: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayTotal {
    /// English weekday name, Monday first
    pub weekday: String,
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourTotal {
    pub hour: u32,
    pub total_sales: f64,
}

/// Everything the sales tabs show for one filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesDashboard {
    pub filter: SalesFilter,
    pub overview: SalesOverview,
    pub top_products: Vec<ProductQuantity>,
    pub categories: Vec<CategoryTotal>,
    pub weekdays: Vec<WeekdayTotal>,
    pub hours: Vec<HourTotal>,
}
