use crate::shared::format::round2;
use contracts::dashboards::d400_ingredient_summary::{
    BeanSummaryRow, FamilySummaryRow, IngredientSummary, PeriodMachine,
};
use contracts::enums::ingredient::{Allocation, IngredientFamily, BEAN_BAG_GRAMS};
use contracts::projections::p900_ingredient_usage::UsageRecord;
use std::collections::BTreeMap;

#[derive(Default)]
struct GroupTotals {
    bean: f64,
    powder: Option<Allocation>,
    syrup: Option<Allocation>,
}

/// Groups usage records by (year, month, machine) into the bean, powder and
/// syrup summary tables, with package counts rounded to two decimals.
/// Only groups that have records appear.
pub fn summarize(records: &[UsageRecord]) -> IngredientSummary {
    let mut groups: BTreeMap<PeriodMachine, GroupTotals> = BTreeMap::new();

    for record in records {
        let key = PeriodMachine {
            year: record.year,
            month: record.month,
            machine: record.machine.clone(),
        };
        let totals = groups.entry(key).or_default();
        totals.bean += record.total_bean;
        add_into(
            totals
                .powder
                .get_or_insert_with(|| IngredientFamily::Powder.zeroed()),
            &record.powder,
        );
        add_into(
            totals
                .syrup
                .get_or_insert_with(|| IngredientFamily::Syrup.zeroed()),
            &record.syrup,
        );
    }

    let mut summary = IngredientSummary::default();
    for (key, totals) in groups {
        summary.beans.push(BeanSummaryRow {
            key: key.clone(),
            total_bean: totals.bean,
            bag_count: round2(totals.bean / BEAN_BAG_GRAMS),
        });
        summary.powders.push(family_row(
            key.clone(),
            IngredientFamily::Powder,
            totals.powder.unwrap_or_else(|| IngredientFamily::Powder.zeroed()),
        ));
        summary.syrups.push(family_row(
            key,
            IngredientFamily::Syrup,
            totals.syrup.unwrap_or_else(|| IngredientFamily::Syrup.zeroed()),
        ));
    }

    summary
}

/// Keeps only the rows of one machine; None keeps everything
pub fn filter_machine(records: &[UsageRecord], machine: Option<&str>) -> Vec<UsageRecord> {
    match machine {
        Some(m) => records.iter().filter(|r| r.machine == m).cloned().collect(),
        None => records.to_vec(),
    }
}

fn add_into(target: &mut Allocation, values: &Allocation) {
    for (ingredient, grams) in values {
        *target.entry(*ingredient).or_insert(0.0) += grams;
    }
}

fn family_row(key: PeriodMachine, family: IngredientFamily, totals: Allocation) -> FamilySummaryRow {
    let package_counts = totals
        .iter()
        .map(|(i, grams)| (*i, round2(grams / family.package_grams())))
        .collect();
    FamilySummaryRow {
        key,
        family,
        totals,
        package_counts,
    }
}
