use csv::StringRecord;

/// Header-addressed view over a CSV text.
///
/// Columns are located by a list of accepted header names (case-insensitive,
/// surrounding whitespace ignored), so Korean and English exports share one
/// reader.
pub struct CsvTable {
    headers: StringRecord,
    records: Vec<StringRecord>,
    skipped: usize,
}

impl CsvTable {
    /// Parses CSV text with a header row. A UTF-8 BOM is stripped.
    /// Malformed records are skipped with a warning; a malformed header fails.
    pub fn parse(text: &str) -> Result<Self, csv::Error> {
        let text = text.trim_start_matches('\u{FEFF}');

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for result in reader.records() {
            match result {
                Ok(r) => records.push(r),
                Err(e) => {
                    tracing::warn!("Skipping malformed CSV record: {}", e);
                    skipped += 1;
                }
            }
        }

        Ok(Self {
            headers,
            records,
            skipped,
        })
    }

    /// Index of the first header matching any of `names`
    pub fn column(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| {
            self.headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
        })
    }

    pub fn headers(&self) -> Vec<&str> {
        self.headers.iter().collect()
    }

    pub fn records(&self) -> &[StringRecord] {
        &self.records
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Trimmed cell text, None when the column is absent or the cell is empty
pub fn cell(record: &StringRecord, column: Option<usize>) -> Option<String> {
    column
        .and_then(|i| record.get(i))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Numeric cell; None when absent, empty or not a number
pub fn numeric_cell(record: &StringRecord, column: Option<usize>) -> Option<f64> {
    cell(record, column).and_then(|v| parse_decimal(&v))
}

/// Parses a number that may use a comma decimal separator or thousands
/// grouping (`1,234.5`, `12,5`, `₩3,000`)
pub fn parse_decimal(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '₩')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains('.') {
        cleaned.replace(',', "")
    } else if cleaned.matches(',').count() == 1 && !looks_grouped(&cleaned) {
        cleaned.replace(',', ".")
    } else {
        cleaned.replace(',', "")
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `1,234` style: exactly three digits after the last comma
fn looks_grouped(s: &str) -> bool {
    s.rsplit(',')
        .next()
        .is_some_and(|tail| tail.len() == 3 && tail.chars().all(|c| c.is_ascii_digit()))
}
