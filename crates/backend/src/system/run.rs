use crate::dashboards::{d400_ingredient_summary, d401_sales_overview, d402_sales_pivot};
use crate::domain::{a001_sales_record, a003_product_category};
use crate::shared::config::Config;
use crate::usecases::u501_ingredient_usage::{export as usage_export, IngredientUsageExecutor};
use anyhow::{Context, Result};
use contracts::dashboards::d400_ingredient_summary::IngredientSummary;
use contracts::dashboards::d401_sales_overview::SalesDashboard;
use contracts::projections::p900_ingredient_usage::UsageWarning;
use serde::Serialize;
use std::path::PathBuf;

pub const DIAGNOSTICS_FILE_NAME: &str = "run_diagnostics.json";

/// Run-level warnings written next to the exports
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunDiagnostics {
    pub generated_at: String,
    pub sales_records: usize,
    pub skipped_files: Vec<String>,
    pub skipped_rows: usize,
    pub uncategorized_records: usize,
    /// Why the category table was ignored, when it was
    pub category_error: Option<String>,
    pub usage_records: usize,
    pub warnings: Vec<UsageWarning>,
}

/// Everything one run produced
#[derive(Debug)]
pub struct RunOutput {
    pub dashboard: SalesDashboard,
    pub ingredient_summary: IngredientSummary,
    pub diagnostics: RunDiagnostics,
    pub written_files: Vec<PathBuf>,
}

/// Loads the inputs named by the config, builds every view and writes the
/// exports into the output folder.
pub fn run_report(config: &Config) -> Result<RunOutput> {
    let started_at = std::time::Instant::now();

    let categories = a003_product_category::repository::load_categories(&config.category_file());
    let mut sales = a001_sales_record::service::load_sales_folder(&config.data_dir())?;
    let uncategorized =
        a003_product_category::service::apply_categories(&mut sales.records, &categories.categories);

    let filter = config.report.filter();
    let dashboard = d401_sales_overview::build_dashboard(&sales.records, &filter);

    let executor = IngredientUsageExecutor::new(config.recipe_dir());
    let usage = executor.run(&sales.records);
    let selected =
        d400_ingredient_summary::filter_machine(&usage.records, filter.machine_code());
    if selected.is_empty() && !usage.records.is_empty() {
        tracing::warn!(
            "⚠️ No ingredient usage for machine {:?}",
            filter.machine_code()
        );
    }
    let ingredient_summary = d400_ingredient_summary::summarize(&selected);

    let output_dir = config.output_dir();
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output dir {}", output_dir.display()))?;

    let mut written_files = Vec::new();

    let sales_path = output_dir.join(d402_sales_pivot::export::EXPORT_FILE_NAME);
    d402_sales_pivot::export::build_workbook(&sales.records).save(&sales_path)?;
    written_files.push(sales_path);

    let summary_path = output_dir.join(d400_ingredient_summary::export::EXPORT_FILE_NAME);
    d400_ingredient_summary::export::build_workbook(&ingredient_summary).save(&summary_path)?;
    written_files.push(summary_path);

    let usage_path = output_dir.join(usage_export::USAGE_FILE_NAME);
    usage_export::write_usage_csv(&usage.records, &usage_path)?;
    written_files.push(usage_path);

    let diagnostics = RunDiagnostics {
        generated_at: chrono::Local::now().to_rfc3339(),
        sales_records: sales.records.len(),
        skipped_files: sales.skipped_files,
        skipped_rows: sales.skipped_rows,
        uncategorized_records: uncategorized,
        category_error: categories.error,
        usage_records: usage.records.len(),
        warnings: usage.warnings,
    };
    let diagnostics_path = output_dir.join(DIAGNOSTICS_FILE_NAME);
    let json = serde_json::to_string_pretty(&diagnostics)?;
    std::fs::write(&diagnostics_path, json)
        .with_context(|| format!("Failed to write {}", diagnostics_path.display()))?;
    written_files.push(diagnostics_path);

    tracing::info!(
        "Report run finished: sales={}, usage={}, warnings={}, elapsed_ms={}",
        diagnostics.sales_records,
        diagnostics.usage_records,
        diagnostics.warnings.len(),
        started_at.elapsed().as_millis()
    );

    Ok(RunOutput {
        dashboard,
        ingredient_summary,
        diagnostics,
        written_files,
    })
}
