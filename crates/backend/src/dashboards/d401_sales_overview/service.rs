use contracts::dashboards::d401_sales_overview::{
    CategoryTotal, DayTotal, HourTotal, MachineMonthTotal, ProductQuantity, SalesDashboard,
    SalesFilter, SalesOverview, WeekdayTotal,
};
use contracts::domain::a001_sales_record::SalesRecord;
use std::collections::BTreeMap;

pub const TOP_PRODUCTS_LIMIT: usize = 10;

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Months present in the data, ascending
pub fn available_months(records: &[SalesRecord]) -> Vec<u32> {
    let mut months: Vec<u32> = records.iter().map(|r| r.month()).collect();
    months.sort_unstable();
    months.dedup();
    months
}

/// Fills an absent month with the latest month of the data
pub fn resolve_filter(records: &[SalesRecord], filter: &SalesFilter) -> SalesFilter {
    SalesFilter {
        month: filter
            .month
            .or_else(|| available_months(records).last().copied()),
        machine: filter.machine.clone(),
    }
}

pub fn apply_filter<'a>(records: &'a [SalesRecord], filter: &SalesFilter) -> Vec<&'a SalesRecord> {
    records
        .iter()
        .filter(|r| filter.month.is_none_or(|m| r.month() == m))
        .filter(|r| filter.machine_code().is_none_or(|code| r.machine == code))
        .collect()
}

/// KPIs of the filtered rows. The month x machine comparison always spans
/// the whole data set.
pub fn overview(all: &[SalesRecord], filtered: &[&SalesRecord]) -> SalesOverview {
    let total_sales = filtered.iter().map(|r| r.sales_amount()).sum();
    let total_orders = filtered.iter().map(|r| r.quantity()).sum();

    let mut monthly: BTreeMap<(u32, String), f64> = BTreeMap::new();
    for r in all {
        *monthly.entry((r.month(), r.machine.clone())).or_insert(0.0) += r.sales_amount();
    }

    let mut daily: BTreeMap<u32, f64> = BTreeMap::new();
    for r in filtered {
        *daily.entry(r.day()).or_insert(0.0) += r.sales_amount();
    }

    SalesOverview {
        total_sales,
        total_orders,
        top_item: top_products(filtered, 1)
            .into_iter()
            .next()
            .map(|p| p.product_name),
        monthly_by_machine: monthly
            .into_iter()
            .map(|((month, machine), total_sales)| MachineMonthTotal {
                month,
                machine,
                total_sales,
            })
            .collect(),
        daily_sales: daily
            .into_iter()
            .map(|(day, total_sales)| DayTotal { day, total_sales })
            .collect(),
    }
}

/// Products by ordered quantity, largest first; ties keep name order
pub fn top_products(filtered: &[&SalesRecord], limit: usize) -> Vec<ProductQuantity> {
    let mut quantities: BTreeMap<&str, f64> = BTreeMap::new();
    for r in filtered {
        *quantities.entry(r.product_name.as_str()).or_insert(0.0) += r.quantity();
    }

    let mut products: Vec<ProductQuantity> = quantities
        .into_iter()
        .map(|(name, quantity)| ProductQuantity {
            product_name: name.to_string(),
            quantity,
        })
        .collect();
    products.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));
    products.truncate(limit);
    products
}

/// Sales per category; uncategorized rows are left out
pub fn category_sales(filtered: &[&SalesRecord]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for r in filtered {
        if let Some(category) = r.product_category.as_deref() {
            *totals.entry(category).or_insert(0.0) += r.sales_amount();
        }
    }
    totals
        .into_iter()
        .map(|(category, total_sales)| CategoryTotal {
            category: category.to_string(),
            total_sales,
        })
        .collect()
}

/// Sales per weekday, Monday to Sunday, days without sales at 0
pub fn weekday_sales(filtered: &[&SalesRecord]) -> Vec<WeekdayTotal> {
    let mut totals = [0.0_f64; 7];
    for r in filtered {
        totals[r.weekday().num_days_from_monday() as usize] += r.sales_amount();
    }
    WEEKDAY_NAMES
        .iter()
        .zip(totals)
        .map(|(name, total_sales)| WeekdayTotal {
            weekday: name.to_string(),
            total_sales,
        })
        .collect()
}

/// Sales per hour of day, only hours with orders
pub fn hourly_sales(filtered: &[&SalesRecord]) -> Vec<HourTotal> {
    let mut totals: BTreeMap<u32, f64> = BTreeMap::new();
    for r in filtered {
        *totals.entry(r.hour()).or_insert(0.0) += r.sales_amount();
    }
    totals
        .into_iter()
        .map(|(hour, total_sales)| HourTotal { hour, total_sales })
        .collect()
}

/// Builds every sales view for one filter
pub fn build_dashboard(records: &[SalesRecord], filter: &SalesFilter) -> SalesDashboard {
    let filter = resolve_filter(records, filter);
    let filtered = apply_filter(records, &filter);

    if filtered.is_empty() {
        tracing::warn!(
            "⚠️ No sales for month={:?}, machine={:?}",
            filter.month,
            filter.machine_code()
        );
    }

    SalesDashboard {
        overview: overview(records, &filtered),
        top_products: top_products(&filtered, TOP_PRODUCTS_LIMIT),
        categories: category_sales(&filtered),
        weekdays: weekday_sales(&filtered),
        hours: hourly_sales(&filtered),
        filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sale(machine: &str, product: &str, qty: f64, sales: f64, t: NaiveDateTime) -> SalesRecord {
        SalesRecord::new(machine, product, Some(qty), t).with_total_sales(sales)
    }

    fn data() -> Vec<SalesRecord> {
        let mut latte = sale("A", "라떼", 3.0, 9000.0, at(7, 1, 9));
        latte.product_category = Some("커피".into());
        vec![
            latte,
            sale("A", "레몬에이드", 1.0, 3500.0, at(7, 1, 14)),
            sale("B", "라떼", 2.0, 6000.0, at(7, 2, 9)),
            sale("A", "아메리카노", 5.0, 10000.0, at(6, 30, 8)),
        ]
    }

    #[test]
    fn test_default_filter_uses_latest_month() {
        let records = data();
        let dashboard = build_dashboard(&records, &SalesFilter::default());

        assert_eq!(dashboard.filter.month, Some(7));
        assert_eq!(dashboard.overview.total_sales, 18500.0);
        assert_eq!(dashboard.overview.total_orders, 6.0);
        assert_eq!(dashboard.overview.top_item.as_deref(), Some("라떼"));
    }

    #[test]
    fn test_machine_filter() {
        let records = data();
        let filter = SalesFilter {
            month: Some(7),
            machine: Some("A".into()),
        };
        let dashboard = build_dashboard(&records, &filter);
        assert_eq!(dashboard.overview.total_sales, 12500.0);

        let all = SalesFilter {
            month: Some(7),
            machine: Some("전체".into()),
        };
        assert_eq!(apply_filter(&records, &all).len(), 3);
    }

    #[test]
    fn test_monthly_comparison_ignores_filter() {
        let records = data();
        let dashboard = build_dashboard(&records, &SalesFilter::default());
        let monthly = &dashboard.overview.monthly_by_machine;

        assert_eq!(monthly.len(), 3);
        assert_eq!(
            monthly[0],
            MachineMonthTotal {
                month: 6,
                machine: "A".into(),
                total_sales: 10000.0
            }
        );
        assert_eq!(dashboard.overview.daily_sales.len(), 2);
    }

    #[test]
    fn test_weekday_order_and_zero_fill() {
        let records = data();
        let filtered = apply_filter(&records, &SalesFilter { month: Some(7), machine: None });
        let weekdays = weekday_sales(&filtered);

        let names: Vec<&str> = weekdays.iter().map(|w| w.weekday.as_str()).collect();
        assert_eq!(names, WEEKDAY_NAMES.to_vec());
        // 2024-07-01 is a Monday
        assert_eq!(weekdays[0].total_sales, 12500.0);
        assert_eq!(weekdays[1].total_sales, 6000.0);
        assert_eq!(weekdays[6].total_sales, 0.0);
    }

    #[test]
    fn test_top_categories_and_hours() {
        let records = data();
        let filtered: Vec<&SalesRecord> = records.iter().collect();

        let top = top_products(&filtered, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].product_name, "라떼");
        assert_eq!(top[0].quantity, 5.0);
        assert_eq!(top[1].product_name, "아메리카노");

        let categories = category_sales(&filtered);
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].total_sales, 9000.0);

        let hours: Vec<u32> = hourly_sales(&filtered).iter().map(|h| h.hour).collect();
        assert_eq!(hours, vec![8, 9, 14]);
    }

    #[test]
    fn test_empty_data() {
        let dashboard = build_dashboard(&[], &SalesFilter::default());
        assert_eq!(dashboard.filter.month, None);
        assert_eq!(dashboard.overview.top_item, None);
        assert_eq!(dashboard.weekdays.len(), 7);
        assert!(dashboard.top_products.is_empty());
    }
}
