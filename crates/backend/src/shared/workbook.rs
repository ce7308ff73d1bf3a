use anyhow::{Context, Result};
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// One named table of an export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// CSV text of the sheet, UTF-8 with BOM so spreadsheet tools pick the encoding
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(vec![0xEF, 0xBB, 0xBF]);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("CSV flush failed for sheet {}: {}", self.name, e))
    }
}

/// Ordered set of sheets written as one zip archive, one `<sheet>.csv` entry each
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, sheet: Sheet) -> &mut Self {
        self.sheets.push(sheet);
        self
    }

    pub fn write_to<W: Write + Seek>(&self, out: W) -> Result<W> {
        let mut zip = ZipWriter::new(out);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for sheet in &self.sheets {
            zip.start_file(format!("{}.csv", sheet.name), options)
                .with_context(|| format!("Failed to start sheet {}", sheet.name))?;
            zip.write_all(&sheet.to_csv()?)?;
        }

        Ok(zip.finish()?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        self.write_to(file)?;
        tracing::info!(
            "Workbook written: {} ({} sheets)",
            path.display(),
            self.sheets.len()
        );
        Ok(())
    }
}
