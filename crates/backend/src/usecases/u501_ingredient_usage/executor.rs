use super::aggregator::aggregate;
use crate::domain::a002_recipe::{service as recipe_service, RecipeError};
use crate::shared::normalize::clean_machine_id;
use contracts::domain::a001_sales_record::SalesRecord;
use contracts::domain::a002_recipe::RecipeEntry;
use contracts::projections::p900_ingredient_usage::{IngredientUsageReport, UsageWarning};
use std::collections::HashMap;
use std::path::PathBuf;

/// Executor for the ingredient usage UseCase.
///
/// Loads each machine's recipe once per run, then aggregates. A missing or
/// unreadable recipe only affects its own machine.
pub struct IngredientUsageExecutor {
    recipe_dir: PathBuf,
}

impl IngredientUsageExecutor {
    pub fn new(recipe_dir: impl Into<PathBuf>) -> Self {
        Self {
            recipe_dir: recipe_dir.into(),
        }
    }

    /// Computes usage records and diagnostics for the given sales
    pub fn run(&self, sales: &[SalesRecord]) -> IngredientUsageReport {
        let started_at = std::time::Instant::now();
        let mut warnings = Vec::new();

        let recipes = self.load_recipes(sales, &mut warnings);
        let outcome = aggregate(sales, &recipes);

        for (machine, products) in &outcome.duplicate_recipes {
            let warning = UsageWarning::DuplicateRecipeProducts {
                machine: machine.clone(),
                products: products.clone(),
            };
            tracing::warn!("{}", warning);
            warnings.push(warning);
        }

        for (machine, products) in &outcome.unmatched {
            let warning = UsageWarning::UnmatchedProducts {
                machine: machine.clone(),
                products: products.clone(),
            };
            tracing::warn!("❗ {}", warning);
            warnings.push(warning);
        }

        tracing::info!(
            "Ingredient usage finished: records={}, machines_with_recipe={}, warnings={}, elapsed_ms={}",
            outcome.records.len(),
            recipes.len(),
            warnings.len(),
            started_at.elapsed().as_millis()
        );

        IngredientUsageReport {
            records: outcome.records,
            unmatched: outcome.unmatched,
            warnings,
        }
    }

    /// Recipe entries by cleaned machine id, one load per machine
    fn load_recipes(
        &self,
        sales: &[SalesRecord],
        warnings: &mut Vec<UsageWarning>,
    ) -> HashMap<String, Vec<RecipeEntry>> {
        let mut recipes: HashMap<String, Vec<RecipeEntry>> = HashMap::new();
        let mut attempted: Vec<String> = Vec::new();

        for record in sales {
            let machine = clean_machine_id(&record.machine);
            if attempted.contains(&machine) {
                continue;
            }
            attempted.push(machine.clone());

            match recipe_service::load_recipe(&self.recipe_dir, &machine) {
                Ok(entries) => {
                    recipes.insert(machine, entries);
                }
                Err(e) => {
                    tracing::warn!("⚠️ {}", e);
                    warnings.push(warning_for(e));
                }
            }
        }

        recipes
    }
}

fn warning_for(error: RecipeError) -> UsageWarning {
    match error {
        RecipeError::NotFound { machine, .. } => UsageWarning::RecipeNotFound { machine },
        RecipeError::Unreadable { machine, reason } => {
            UsageWarning::RecipeUnreadable { machine, reason }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::enums::ingredient::Ingredient;

    const HEADER: &str = "제품명,원료명,원두 글라인딩 양,1번 파우더량(S),2번 파우더량(S),시럽량(S)\n";

    fn sale(machine: &str, product: &str, qty: f64) -> SalesRecord {
        let t = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        SalesRecord::new(machine, product, Some(qty), t)
    }

    #[test]
    fn test_missing_recipe_file_degrades_one_machine() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("A_Recipe.csv"),
            format!("{}라떼,밀크 파우더,18,5,5,0\n레몬에이드,\"레몬 시럽, 메론 시럽\",0,0,0,20\n", HEADER),
        )
        .unwrap();

        let executor = IngredientUsageExecutor::new(dir.path());
        let report = executor.run(&[
            sale("A", "HOT 라떼", 3.0),
            sale("A", "레몬에이드", 1.0),
            sale("Z", "라떼", 2.0),
            sale("Z", "라떼", 1.0),
        ]);

        assert_eq!(report.records.len(), 4);
        assert_eq!(
            report.warnings,
            vec![UsageWarning::RecipeNotFound {
                machine: "Z".into()
            }]
        );

        for r in report.records.iter().filter(|r| r.machine == "Z") {
            assert_eq!(r.total_bean + r.total_powder + r.total_syrup, 0.0);
        }

        let latte = &report.records[0];
        assert!((latte.powder[&Ingredient::MilkPowder] - 192.0).abs() < 1e-9);

        let ade = &report.records[1];
        assert!((ade.syrup[&Ingredient::LemonSyrup] - 34.0).abs() < 1e-9);
        assert!((ade.syrup[&Ingredient::MelonSyrup] - 34.0).abs() < 1e-9);
    }

    #[test]
    fn test_unreadable_recipe_and_unmatched_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("B_Recipe.csv"), "Name,Bean\nLatte,18\n").unwrap();
        std::fs::write(
            dir.path().join("A_Recipe.csv"),
            format!("{}라떼,밀크 파우더,18,5,5,0\n", HEADER),
        )
        .unwrap();

        let report = IngredientUsageExecutor::new(dir.path()).run(&[
            sale("A", "모카", 1.0),
            sale("A", "모카", 2.0),
            sale("B", "라떼", 1.0),
        ]);

        assert_eq!(report.unmatched["A"], vec!["모카".to_string()]);
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, UsageWarning::RecipeUnreadable { machine, .. } if machine == "B")));
        assert!(report.warnings.iter().any(|w| matches!(
            w,
            UsageWarning::UnmatchedProducts { machine, products } if machine == "A" && products.len() == 1
        )));
    }

    #[test]
    fn test_empty_sales_give_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = IngredientUsageExecutor::new(dir.path()).run(&[]);
        assert!(report.records.is_empty());
        assert!(report.warnings.is_empty());
    }
}
