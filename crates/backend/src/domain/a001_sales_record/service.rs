use super::file_name::parse_sales_file_name;
use super::parser::parse_sales_csv;
use anyhow::Context;
use contracts::domain::a001_sales_record::SalesRecord;
use std::path::{Path, PathBuf};

/// Sales records of every export in a folder
#[derive(Debug, Default)]
pub struct SalesLoad {
    pub records: Vec<SalesRecord>,
    /// Files ignored because of their name or an unreadable body
    pub skipped_files: Vec<String>,
    pub skipped_rows: usize,
}

/// Loads every `<machine>_sales_<month>.csv` in `dir`, in file name order.
/// A missing folder yields an empty load.
pub fn load_sales_folder(dir: &Path) -> anyhow::Result<SalesLoad> {
    let started_at = std::time::Instant::now();
    let mut load = SalesLoad::default();

    if !dir.exists() {
        tracing::warn!("Sales folder not found: {}", dir.display());
        return Ok(load);
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Cannot list sales folder {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();

    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let Some(parsed_name) = parse_sales_file_name(&file_name) else {
            tracing::warn!(
                "Skipping {}: expected <machine>_sales_<month>.csv",
                file_name
            );
            load.skipped_files.push(file_name);
            continue;
        };

        let text = match std::fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", file_name, e);
                load.skipped_files.push(file_name);
                continue;
            }
        };

        match parse_sales_csv(&text, &parsed_name.machine, Some(parsed_name.month)) {
            Ok(parsed) => {
                tracing::debug!(
                    "Loaded {}: {} rows, {} skipped",
                    file_name,
                    parsed.records.len(),
                    parsed.skipped_rows
                );
                load.skipped_rows += parsed.skipped_rows;
                load.records.extend(parsed.records);
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {}", file_name, e);
                load.skipped_files.push(file_name);
            }
        }
    }

    tracing::info!(
        "Sales load finished: records={}, skipped_files={}, skipped_rows={}, elapsed_ms={}",
        load.records.len(),
        load.skipped_files.len(),
        load.skipped_rows,
        started_at.elapsed().as_millis()
    );

    Ok(load)
}
