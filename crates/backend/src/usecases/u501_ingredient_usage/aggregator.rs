use super::splitter::{split_usage, IngredientSplit};
use crate::shared::normalize::{clean_machine_id, normalize_name};
use contracts::domain::a001_sales_record::SalesRecord;
use contracts::domain::a002_recipe::RecipeEntry;
use contracts::enums::ingredient::IngredientFamily;
use contracts::projections::p900_ingredient_usage::UsageRecord;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Usage records of a run plus the join diagnostics
#[derive(Debug, Default)]
pub struct AggregateOutcome {
    pub records: Vec<UsageRecord>,
    /// Normalized product names without a recipe row, by machine, first-seen order
    pub unmatched: BTreeMap<String, Vec<String>>,
    /// Normalized names appearing on several recipe rows, by machine
    pub duplicate_recipes: BTreeMap<String, Vec<String>>,
}

/// Order-line masses before the per-ingredient split
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct LineTotals {
    bean: f64,
    powder: f64,
    syrup: f64,
}

impl LineTotals {
    /// Per-serving recipe masses scaled by the ordered quantity
    fn for_recipe(recipe: &RecipeEntry, quantity: f64) -> Self {
        let mut totals = Self {
            bean: recipe.bean * quantity,
            ..Self::default()
        };
        for family in IngredientFamily::ALL {
            *totals.family_mut(family) = recipe.family_grams(family) * quantity;
        }
        totals
    }

    fn family_mut(&mut self, family: IngredientFamily) -> &mut f64 {
        match family {
            IngredientFamily::Powder => &mut self.powder,
            IngredientFamily::Syrup => &mut self.syrup,
        }
    }
}

/// Recipe lookup of one machine by normalized product name.
/// The first row of a duplicated name is the one joined.
struct RecipeIndex<'a> {
    by_name: HashMap<&'a str, &'a RecipeEntry>,
    duplicates: Vec<String>,
}

impl<'a> RecipeIndex<'a> {
    fn build(entries: &'a [RecipeEntry]) -> Self {
        let mut by_name: HashMap<&str, &RecipeEntry> = HashMap::new();
        let mut duplicates = Vec::new();

        for entry in entries {
            let name = entry.product_name.as_str();
            if by_name.contains_key(name) {
                if !duplicates.iter().any(|d: &String| d == name) {
                    duplicates.push(name.to_string());
                }
            } else {
                by_name.insert(name, entry);
            }
        }

        Self {
            by_name,
            duplicates,
        }
    }

    fn get(&self, normalized_name: &str) -> Option<&'a RecipeEntry> {
        self.by_name.get(normalized_name).copied()
    }
}

/// Joins sales to recipes and derives per-record ingredient usage.
///
/// Every sales record yields exactly one usage record. Records of machines
/// missing from `recipes_by_machine` carry zero usage and are not listed as
/// unmatched. `recipes_by_machine` is keyed by cleaned machine id.
pub fn aggregate(
    sales: &[SalesRecord],
    recipes_by_machine: &HashMap<String, Vec<RecipeEntry>>,
) -> AggregateOutcome {
    let mut outcome = AggregateOutcome::default();

    // machines in order of first appearance
    let mut machines: Vec<String> = Vec::new();
    let mut by_machine: HashMap<String, Vec<&SalesRecord>> = HashMap::new();
    for record in sales {
        let machine = clean_machine_id(&record.machine);
        by_machine
            .entry(machine.clone())
            .or_insert_with(|| {
                machines.push(machine);
                Vec::new()
            })
            .push(record);
    }

    for machine in machines {
        let rows = by_machine.remove(&machine).unwrap_or_default();

        let Some(entries) = recipes_by_machine.get(&machine) else {
            outcome
                .records
                .extend(rows.iter().map(|r| zero_usage(r, &machine)));
            continue;
        };

        let index = RecipeIndex::build(entries);
        let mut unmatched: Vec<String> = Vec::new();
        let mut unmatched_seen: HashSet<String> = HashSet::new();

        for row in rows {
            let product_name = normalize_name(&row.product_name);
            let quantity = row.quantity();

            let record = match index.get(&product_name) {
                Some(recipe) => {
                    let totals = LineTotals::for_recipe(recipe, quantity);
                    let split =
                        split_usage(recipe.ingredients.as_deref(), totals.powder, totals.syrup);
                    usage_record(row, &machine, product_name, totals, split)
                }
                None => {
                    if unmatched_seen.insert(product_name.clone()) {
                        unmatched.push(product_name.clone());
                    }
                    usage_record(
                        row,
                        &machine,
                        product_name,
                        LineTotals::default(),
                        IngredientSplit::zeroed(),
                    )
                }
            };
            outcome.records.push(record);
        }

        if !unmatched.is_empty() {
            outcome.unmatched.insert(machine.clone(), unmatched);
        }
        if !index.duplicates.is_empty() {
            outcome.duplicate_recipes.insert(machine, index.duplicates);
        }
    }

    outcome
}

fn zero_usage(row: &SalesRecord, machine: &str) -> UsageRecord {
    usage_record(
        row,
        machine,
        normalize_name(&row.product_name),
        LineTotals::default(),
        IngredientSplit::zeroed(),
    )
}

fn usage_record(
    row: &SalesRecord,
    machine: &str,
    product_name: String,
    totals: LineTotals,
    split: IngredientSplit,
) -> UsageRecord {
    UsageRecord {
        year: row.year(),
        month: row.month(),
        machine: machine.to_string(),
        product_name,
        total_bean: totals.bean,
        total_powder: totals.powder,
        total_syrup: totals.syrup,
        powder: split.powder,
        syrup: split.syrup,
    }
}
