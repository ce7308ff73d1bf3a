use crate::shared::format::format_cell;
use crate::shared::workbook::{Sheet, Workbook};
use contracts::dashboards::d400_ingredient_summary::{
    FamilySummaryRow, IngredientSummary, PeriodMachine,
};
use contracts::enums::ingredient::IngredientFamily;

pub const EXPORT_FILE_NAME: &str = "원재료_사용량_요약.zip";

const BEAN_SHEET: &str = "원두 사용량";

fn family_sheet_name(family: IngredientFamily) -> &'static str {
    match family {
        IngredientFamily::Powder => "파우더 사용량",
        IngredientFamily::Syrup => "시럽 사용량",
    }
}

fn key_headers() -> Vec<String> {
    vec!["Year".into(), "Month".into(), "Machine".into()]
}

fn key_cells(key: &PeriodMachine) -> Vec<String> {
    vec![
        key.year.to_string(),
        key.month.to_string(),
        key.machine.clone(),
    ]
}

/// Bean, powder and syrup sheets: grams per type followed by package counts
pub fn build_workbook(summary: &IngredientSummary) -> Workbook {
    let mut workbook = Workbook::new();

    let mut headers = key_headers();
    headers.push("Total Bean".into());
    headers.push("봉 수".into());
    let mut beans = Sheet::new(BEAN_SHEET, headers);
    for row in &summary.beans {
        let mut cells = key_cells(&row.key);
        cells.push(format_cell(row.total_bean));
        cells.push(format_cell(row.bag_count));
        beans.push_row(cells);
    }
    workbook.add_sheet(beans);

    for family in IngredientFamily::ALL {
        workbook.add_sheet(family_sheet(family, summary.family_rows(family)));
    }

    workbook
}

fn family_sheet(family: IngredientFamily, rows: &[FamilySummaryRow]) -> Sheet {
    let members = family.members();

    let mut headers = key_headers();
    headers.extend(members.iter().map(|i| i.display_name().to_string()));
    headers.extend(
        members
            .iter()
            .map(|i| format!("{} ({})", i.display_name(), family.package_label())),
    );

    let mut sheet = Sheet::new(family_sheet_name(family), headers);
    for row in rows {
        let mut cells = key_cells(&row.key);
        cells.extend(
            members
                .iter()
                .map(|i| format_cell(row.totals.get(i).copied().unwrap_or(0.0))),
        );
        cells.extend(
            members
                .iter()
                .map(|i| format_cell(row.package_counts.get(i).copied().unwrap_or(0.0))),
        );
        sheet.push_row(cells);
    }
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_ingredient_summary::summarize;
    use contracts::enums::ingredient::Ingredient;
    use contracts::projections::p900_ingredient_usage::UsageRecord;

    #[test]
    fn test_workbook_sheets_and_columns() {
        let mut syrup = IngredientFamily::Syrup.zeroed();
        syrup.insert(Ingredient::LemonSyrup, 2600.0);
        let record = UsageRecord {
            year: 2024,
            month: 7,
            machine: "A".into(),
            product_name: "lemonade".into(),
            total_bean: 2500.0,
            total_powder: 0.0,
            total_syrup: 2600.0,
            powder: IngredientFamily::Powder.zeroed(),
            syrup,
        };
        let workbook = build_workbook(&summarize(&[record]));

        let names: Vec<&str> = workbook.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["원두 사용량", "파우더 사용량", "시럽 사용량"]);

        let beans = &workbook.sheets[0];
        assert_eq!(beans.headers.last().map(String::as_str), Some("봉 수"));
        assert_eq!(beans.rows[0], vec!["2024", "7", "A", "2500", "2.5"]);

        let powders = &workbook.sheets[1];
        assert_eq!(powders.headers.len(), 3 + 12);
        assert!(powders.headers.contains(&"밀크 파우더 (봉 수)".to_string()));

        let syrups = &workbook.sheets[2];
        let col = syrups
            .headers
            .iter()
            .position(|h| h == "레몬 시럽 (통 수)")
            .unwrap();
        assert_eq!(syrups.rows[0][col], "2");
    }
}
