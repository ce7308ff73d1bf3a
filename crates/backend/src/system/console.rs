use crate::shared::format::{format_cell, format_won};
use contracts::dashboards::d400_ingredient_summary::IngredientSummary;
use contracts::dashboards::d401_sales_overview::SalesDashboard;
use contracts::enums::ingredient::IngredientFamily;

/// Prints the sales views of one filter
pub fn print_sales_dashboard(dashboard: &SalesDashboard) {
    let month = dashboard
        .filter
        .month
        .map(|m| format!("{}월", m))
        .unwrap_or_else(|| "-".into());
    let machine = dashboard.filter.machine_code().unwrap_or("전체");

    println!("\n📊 매출 개요 ({}, 자판기: {})", month, machine);
    if dashboard.top_products.is_empty() {
        println!("  ⚠️ 선택한 조건에 해당하는 데이터가 없습니다.");
        return;
    }

    let overview = &dashboard.overview;
    println!("  💵 총 매출:      {}", format_won(overview.total_sales));
    println!("  🧾 총 주문 수량: {}", format_cell(overview.total_orders));
    println!(
        "  🔥 인기 메뉴:    {}",
        overview.top_item.as_deref().unwrap_or("-")
    );

    println!("\n📈 자판기 월 매출 비교");
    for row in &overview.monthly_by_machine {
        println!("  {:>2}월 {:<10} {}", row.month, row.machine, format_won(row.total_sales));
    }

    println!("\n📅 일별 매출");
    for row in &overview.daily_sales {
        println!("  {:>2}일 {}", row.day, format_won(row.total_sales));
    }

    println!("\n🏆 Top {} 인기 메뉴", dashboard.top_products.len());
    for (rank, p) in dashboard.top_products.iter().enumerate() {
        println!("  {:>2}. {} ({})", rank + 1, p.product_name, format_cell(p.quantity));
    }

    println!("\n📊 카테고리별 매출");
    for c in &dashboard.categories {
        println!("  {:<12} {}", c.category, format_won(c.total_sales));
    }

    println!("\n📆 요일별 매출");
    for w in &dashboard.weekdays {
        println!("  {:<10} {}", w.weekday, format_won(w.total_sales));
    }

    println!("\n⏰ 시간대별 매출");
    for h in &dashboard.hours {
        println!("  {:>2}시 {}", h.hour, format_won(h.total_sales));
    }
}

/// Prints bean bags, powder bags and syrup containers per (year, month, machine)
pub fn print_ingredient_summary(summary: &IngredientSummary) {
    println!("\n🥣 원재료 사용량");
    if summary.is_empty() {
        println!("  ⚠️ 선택한 자판기에 해당하는 원재료 데이터가 없습니다.");
        return;
    }

    println!("\n☕ 원두");
    for row in &summary.beans {
        println!(
            "  {}-{:02} {:<10} {} g ({} 봉)",
            row.key.year,
            row.key.month,
            row.key.machine,
            format_cell(row.total_bean),
            format_cell(row.bag_count)
        );
    }

    for family in IngredientFamily::ALL {
        println!("\n{} {}", family_icon(family), family.display_name());
        for row in summary.family_rows(family) {
            let used: Vec<String> = row
                .package_counts
                .iter()
                .filter(|(_, count)| **count > 0.0)
                .map(|(i, count)| format!("{} {}", i.display_name(), format_cell(*count)))
                .collect();
            println!(
                "  {}-{:02} {:<10} {}",
                row.key.year,
                row.key.month,
                row.key.machine,
                if used.is_empty() { "-".to_string() } else { used.join(", ") }
            );
        }
    }
}

fn family_icon(family: IngredientFamily) -> &'static str {
    match family {
        IngredientFamily::Powder => "🥄",
        IngredientFamily::Syrup => "🍯",
    }
}
